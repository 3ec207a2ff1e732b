//! Settings Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::domain::settings::SettingsServiceError;

use crate::errors::storage_unavailable;

pub(crate) fn into_status_error(error: SettingsServiceError) -> StatusError {
    match error {
        SettingsServiceError::NotFound => StatusError::not_found().brief("Setting not found"),
        SettingsServiceError::MissingRequiredData | SettingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid setting payload")
        }
        SettingsServiceError::Malformed(source) => {
            error!("stored popup setting is malformed: {source}");

            StatusError::internal_server_error()
        }
        SettingsServiceError::Sql(source) => {
            storage_unavailable("settings storage failed", &source)
        }
    }
}
