//! Product Visibility Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use vitrine::products::ProductId;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        get::ProductResponse,
        requests::{VisibilityRequest, parse_visibility},
    },
};

/// Product Visibility Handler
///
/// Lists, marks out of stock, or hides a product.
#[endpoint(
    tags("products"),
    summary = "Change Product Visibility",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Visibility changed"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown visibility"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<VisibilityRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductId::new(product.into_inner());
    let visibility = parse_visibility(&json.into_inner().visibility)?;

    let updated = state
        .app
        .products
        .update_visibility(product, visibility)
        .await
        .map_err(into_status_error)?;

    info!(product_id = %product, %visibility, "changed product visibility");

    Ok(Json(ProductResponse::new(updated, state.today())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vitrine::products::Visibility;
    use vitrine_app::domain::products::MockProductsService;

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(repo: MockProductsService) -> TestResult<Service> {
        Mocks::with_products(repo)
            .into_service(Router::with_path("products/{product}/visibility").put(handler))
    }

    #[tokio::test]
    async fn test_hide_product() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_visibility()
            .once()
            .withf(|id, visibility| *id == ProductId::new(4) && *visibility == Visibility::Hidden)
            .return_once(|_, visibility| {
                let mut product = make_product(4);

                product.visibility = visibility;

                Ok(product)
            });

        let body: ProductResponse = TestClient::put("http://example.com/products/4/visibility")
            .json(&json!({ "visibility": "hidden" }))
            .send(&make_service(repo)?)
            .await
            .take_json()
            .await?;

        assert_eq!(body.visibility, "hidden");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_visibility_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_visibility().never();

        let res = TestClient::put("http://example.com/products/4/visibility")
            .json(&json!({ "visibility": "archived" }))
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
