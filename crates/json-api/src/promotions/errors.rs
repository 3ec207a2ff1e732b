//! Promotion Errors

use salvo::http::StatusError;
use tracing::warn;

use vitrine_app::domain::products::ProductsServiceError;

use crate::errors::{invalid_fields, storage_unavailable};

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::InvalidFields(errors) => {
            warn!("rejected bulk promotion: {errors}");

            invalid_fields("Invalid promotion payload", &errors)
        }
        ProductsServiceError::InvalidPrice(source) => {
            warn!("bulk promotion produced an invalid price: {source}");

            StatusError::bad_request().brief("Invalid promotion payload")
        }
        ProductsServiceError::AlreadyExists
        | ProductsServiceError::NotFound
        | ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::conflict().brief("Products changed during the bulk promotion; retry")
        }
        ProductsServiceError::Sql(source) => {
            storage_unavailable("failed to apply bulk promotion", &source)
        }
    }
}
