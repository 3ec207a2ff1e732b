//! Product Errors

use salvo::http::StatusError;
use tracing::warn;

use vitrine_app::domain::products::ProductsServiceError;

use crate::errors::{invalid_fields, storage_unavailable};

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::InvalidFields(errors) => {
            warn!("rejected product payload: {errors}");

            invalid_fields("Invalid product payload", &errors)
        }
        ProductsServiceError::InvalidPrice(source) => {
            warn!("rejected promotion price: {source}");

            StatusError::bad_request().brief("Invalid promotion price")
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            storage_unavailable("product storage failed", &source)
        }
    }
}
