//! Administrator credentials.

use std::fmt;

use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminCredentialsError {
    #[error("admin password cannot be empty")]
    Empty,
}

/// Digest of the administrator password.
///
/// Only the SHA-256 digest is kept; the raw password is wiped as soon as it has been hashed.
#[derive(Clone)]
pub struct AdminCredentials {
    digest: [u8; 32],
}

impl AdminCredentials {
    /// Hash `password` and wipe it.
    ///
    /// # Errors
    ///
    /// Returns [`AdminCredentialsError::Empty`] when the password is blank.
    pub fn from_password(mut password: String) -> Result<Self, AdminCredentialsError> {
        if password.trim().is_empty() {
            password.zeroize();

            return Err(AdminCredentialsError::Empty);
        }

        let digest = hash_password(&password);

        password.zeroize();

        Ok(Self { digest })
    }

    /// Whether `candidate` is the administrator password.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate = hash_password(candidate);

        self.digest
            .iter()
            .zip(candidate.iter())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminCredentials(**redacted**)")
    }
}

impl Drop for AdminCredentials {
    fn drop(&mut self) {
        self.digest.zeroize();
    }
}

fn hash_password(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn verify_accepts_only_the_configured_password() -> TestResult {
        let credentials = AdminCredentials::from_password("s3nha-da-loja".to_string())?;

        assert!(credentials.verify("s3nha-da-loja"));
        assert!(!credentials.verify("s3nha-da-loja "));
        assert!(!credentials.verify(""));

        Ok(())
    }

    #[test]
    fn blank_password_is_rejected() {
        assert_eq!(
            AdminCredentials::from_password("  ".to_string()).err(),
            Some(AdminCredentialsError::Empty)
        );
    }

    #[test]
    fn debug_output_is_redacted() -> TestResult {
        let credentials = AdminCredentials::from_password("secret".to_string())?;

        assert_eq!(format!("{credentials:?}"), "AdminCredentials(**redacted**)");

        Ok(())
    }
}
