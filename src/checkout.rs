//! Checkout
//!
//! Checkout does not take payment. It produces a pre-filled WhatsApp message for the store and
//! a confirmation e-mail for the customer.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
    customers::Customer,
    orders::{OrderItem, RegistrationStatus},
    pricing::format_brl,
};

/// Characters left unescaped in a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Subject of the confirmation e-mail.
pub const CONFIRMATION_SUBJECT: &str = "[Pedido Taimin] - não responda";

const PENDING_CLOSING: &str = "Aguardo as instruções para cadastramento*, pagamento e entrega.\n*venda mediante aprovação de cadastro";
const REGISTERED_CLOSING: &str = "Cadastro válido, Aguardo as instruções para pagamento e entrega.";

/// Closing line of the WhatsApp message.
pub const fn closing_line(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Pending => PENDING_CLOSING,
        RegistrationStatus::Registered => REGISTERED_CLOSING,
    }
}

/// One line per item: `  - NAME (2x) - R$150,00`.
pub fn item_summary(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "  - {} ({}x) - {}",
                item.name,
                item.quantity,
                format_brl(item.line_total())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Message the customer sends the store over WhatsApp.
pub fn whatsapp_message(
    customer: &Customer,
    items: &[OrderItem],
    total_price: u64,
    status: RegistrationStatus,
) -> String {
    format!(
        "Olá! Meu nome é {} (CPF: {}) e gostaria de fazer o seguinte pedido:\n\n{}\n\n*Total: {}*\n\n{}",
        customer.name,
        customer.national_id,
        item_summary(items),
        format_brl(total_price),
        closing_line(status),
    )
}

/// `wa.me` deep link opening a chat with `number` and `message` pre-filled.
///
/// Non-digits in `number` are dropped; the message is escaped like a URI component.
pub fn whatsapp_url(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();

    format!(
        "https://wa.me/{digits}?text={}",
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

/// Confirmation e-mail sent after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEmail {
    /// Customer address
    pub to: String,

    /// Store address
    pub cc: String,

    /// Subject line
    pub subject: &'static str,

    /// Plain-text body
    pub body: String,
}

/// Build the confirmation e-mail for a checkout.
pub fn confirmation_email(
    customer: &Customer,
    items: &[OrderItem],
    total_price: u64,
    whatsapp_number: &str,
    store_email: &str,
) -> ConfirmationEmail {
    let body = format!(
        "Olá, {}!\n\nRecebemos o seu pedido:\n\n{}\n\nTotal: {}\n\nPara concluir, fale conosco pelo WhatsApp {} ou responda para {}.",
        customer.name,
        item_summary(items),
        format_brl(total_price),
        whatsapp_number,
        store_email,
    );

    ConfirmationEmail {
        to: customer.email.clone(),
        cc: store_email.to_string(),
        subject: CONFIRMATION_SUBJECT,
        body,
    }
}

#[cfg(test)]
mod tests {
    use crate::products::ProductId;

    use super::*;

    fn customer() -> Customer {
        Customer {
            name: "Ana Lima".to_string(),
            email: "ana@example.com".to_string(),
            national_id: "111.111.111-11".to_string(),
        }
    }

    fn items() -> Vec<OrderItem> {
        vec![OrderItem {
            product_id: ProductId::new(1),
            name: "BAO HE WAN".to_string(),
            unit_price: 7_500,
            quantity: 2,
        }]
    }

    #[test]
    fn message_for_a_new_customer_asks_for_registration() {
        let message = whatsapp_message(&customer(), &items(), 15_000, RegistrationStatus::Pending);

        let expected = format!(
            "Olá! Meu nome é Ana Lima (CPF: 111.111.111-11) e gostaria de fazer o seguinte pedido:\n\n  - BAO HE WAN (2x) - {total}\n\n*Total: {total}*\n\n{PENDING_CLOSING}",
            total = format_brl(15_000),
        );

        assert_eq!(message, expected);
    }

    #[test]
    fn message_for_a_known_customer_skips_registration() {
        let message =
            whatsapp_message(&customer(), &items(), 15_000, RegistrationStatus::Registered);

        assert!(message.ends_with(REGISTERED_CLOSING));
        assert!(!message.contains("cadastramento"));
    }

    #[test]
    fn url_escapes_like_a_uri_component() {
        let url = whatsapp_url("+55 (11) 99999-0000", "Olá! *Total*: 1 & 2\n(ok)");

        assert_eq!(
            url,
            "https://wa.me/5511999990000?text=Ol%C3%A1!%20*Total*%3A%201%20%26%202%0A(ok)"
        );
    }

    #[test]
    fn confirmation_email_copies_the_store() {
        let email = confirmation_email(
            &customer(),
            &items(),
            15_000,
            "5511999990000",
            "loja@example.com",
        );

        assert_eq!(email.to, "ana@example.com");
        assert_eq!(email.cc, "loja@example.com");
        assert_eq!(email.subject, "[Pedido Taimin] - não responda");
        assert!(email.body.contains("BAO HE WAN (2x)"));
    }
}
