//! Create Product Handler

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use tracing::info;
use vitrine_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse, requests::ProductRequest},
};

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product fields"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let (details, promotion) = json.into_inner().into_parts()?;

    let product = state
        .app
        .products
        .create_product(NewProduct { details, promotion })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/admin/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(product_id = %product.id, name = %product.name, "created product");

    Ok(Json(ProductResponse::new(product, state.today())))
}
