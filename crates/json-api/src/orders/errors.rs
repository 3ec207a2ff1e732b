//! Order Errors

use salvo::http::StatusError;

use vitrine_app::domain::orders::OrdersServiceError;

use crate::errors::storage_unavailable;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(source) => storage_unavailable("order storage failed", &source),
    }
}
