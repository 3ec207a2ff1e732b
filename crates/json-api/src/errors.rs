//! Shared HTTP error responses

use std::error::Error;

use salvo::http::StatusError;
use tracing::error;
use vitrine::validation::FieldErrors;

/// Remediation shown when the database cannot be reached.
pub(crate) const STORAGE_UNAVAILABLE: &str =
    "The store database is unavailable; check DATABASE_URL and retry.";

/// `503` for a storage failure, logging `context` and the source error.
pub(crate) fn storage_unavailable(context: &str, source: &dyn Error) -> StatusError {
    error!("{context}: {source}");

    StatusError::service_unavailable().brief(STORAGE_UNAVAILABLE)
}

/// `400` listing every field message as `field: message` lines.
pub(crate) fn invalid_fields(brief: &str, errors: &FieldErrors) -> StatusError {
    let detail = errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n");

    StatusError::bad_request().brief(brief).detail(detail)
}
