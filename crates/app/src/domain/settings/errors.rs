//! Settings service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsServiceError {
    #[error("setting not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("stored setting has an unexpected shape")]
    Malformed(#[source] serde_json::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SettingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<serde_json::Error> for SettingsServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error)
    }
}
