//! Update Product Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use vitrine::products::ProductId;
use vitrine_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse, requests::ProductDetailsRequest},
};

/// Product Update Handler
///
/// Replaces every editable field except the promotion, which has its own endpoint. A new price
/// at or below a stored promotional price is rejected.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product fields"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_id = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<ProductDetailsRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductId::new(product.into_inner());
    let details = json.into_inner().into_details()?;

    let span = tracing::Span::current();

    span.record("product_id", tracing::field::display(product));
    span.record("price", details.price);

    let updated = state
        .app
        .products
        .update_product(product, ProductUpdate { details })
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_id = %product, price = updated.price, "updated product");

    Ok(Json(ProductResponse::new(updated, state.today())))
}
