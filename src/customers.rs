//! Customers

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a CPF.
pub const NATIONAL_ID_DIGITS: usize = 11;

/// Checkout form errors. Messages are shown to the customer as-is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    /// At least one field is blank.
    #[error("Por favor, preencha todos os campos.")]
    MissingFields,

    /// The e-mail address does not look like one.
    #[error("Por favor, insira um e-mail válido.")]
    InvalidEmail,

    /// The CPF does not have exactly 11 digits.
    #[error("O CPF deve conter 11 dígitos.")]
    InvalidNationalId,
}

/// Customer details embedded in an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    /// Full name
    pub name: String,

    /// E-mail address
    pub email: String,

    /// CPF as typed by the customer, usually masked
    #[serde(rename = "cpf")]
    pub national_id: String,
}

impl Customer {
    /// Check the checkout form rules.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: blank fields, then e-mail shape, then CPF length.
    pub fn validate(&self) -> Result<(), CustomerError> {
        if [&self.name, &self.email, &self.national_id]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(CustomerError::MissingFields);
        }

        if !looks_like_email(&self.email) {
            return Err(CustomerError::InvalidEmail);
        }

        if national_id_digits(&self.national_id).len() != NATIONAL_ID_DIGITS {
            return Err(CustomerError::InvalidNationalId);
        }

        Ok(())
    }
}

/// Digits of a CPF with any mask characters stripped.
pub fn national_id_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Mask the first 11 digits of `value` as `000.000.000-00`, as far as there are digits.
pub fn format_national_id(value: &str) -> String {
    let mut formatted = String::with_capacity(14);

    for (index, digit) in value
        .chars()
        .filter(char::is_ascii_digit)
        .take(NATIONAL_ID_DIGITS)
        .enumerate()
    {
        match index {
            3 | 6 => formatted.push('.'),
            9 => formatted.push('-'),
            _ => {}
        }

        formatted.push(digit);
    }

    formatted
}

/// `\S+@\S+\.\S+` anywhere in the value. `None` only if the pattern failed to compile.
static EMAIL_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").ok());

fn looks_like_email(value: &str) -> bool {
    EMAIL_SHAPE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer {
            name: "Maria Souza".to_string(),
            email: "maria@example.com".to_string(),
            national_id: "123.456.789-01".to_string(),
        }
    }

    #[test]
    fn valid_customer_passes() {
        assert_eq!(customer().validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_missing() {
        let blank = Customer {
            name: "  ".to_string(),
            ..customer()
        };

        assert_eq!(blank.validate(), Err(CustomerError::MissingFields));
    }

    #[test]
    fn email_shape_is_checked() {
        for email in [
            "maria",
            "maria@example",
            "@example.com",
            "maria@.com",
            "maria@example.",
            "maria @example.com",
        ] {
            let invalid = Customer {
                email: email.to_string(),
                ..customer()
            };

            assert_eq!(
                invalid.validate(),
                Err(CustomerError::InvalidEmail),
                "{email}"
            );
        }

        for email in [
            "a@b.c",
            "first.last@mail.example.com.br",
            "x a@b.co",
            "a@b@c.d",
        ] {
            assert!(looks_like_email(email), "{email}");
        }
    }

    #[test]
    fn national_id_needs_eleven_digits() {
        let short = Customer {
            national_id: "123.456.789".to_string(),
            ..customer()
        };

        assert_eq!(short.validate(), Err(CustomerError::InvalidNationalId));

        let unmasked = Customer {
            national_id: "12345678901".to_string(),
            ..customer()
        };

        assert_eq!(unmasked.validate(), Ok(()));
    }

    #[test]
    fn national_id_mask_is_applied_progressively() {
        assert_eq!(format_national_id("123"), "123");
        assert_eq!(format_national_id("1234"), "123.4");
        assert_eq!(format_national_id("1234567"), "123.456.7");
        assert_eq!(format_national_id("12345678901"), "123.456.789-01");
        assert_eq!(format_national_id("123.456.789-0199"), "123.456.789-01");
        assert_eq!(format_national_id("abc"), "");
    }

    #[test]
    fn national_id_serializes_as_cpf() -> testresult::TestResult {
        let json = serde_json::to_value(customer())?;

        assert_eq!(json["cpf"], "123.456.789-01");

        Ok(())
    }
}
