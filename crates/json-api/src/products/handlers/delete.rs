//! Delete Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use vitrine::products::ProductId;

use crate::{extensions::*, products::errors::into_status_error};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductId::new(product.into_inner());

    state
        .app
        .products
        .delete_product(product)
        .await
        .map_err(into_status_error)?;

    info!(product_id = %product, "deleted product");

    Ok(StatusCode::OK)
}
