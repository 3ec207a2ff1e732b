//! Product Promotion Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::info;
use vitrine::products::ProductId;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse, requests::PromotionRequest},
};

/// Product Promotion Handler
///
/// Sets the product's promotion, or clears it when no promotional price is given.
#[endpoint(
    tags("products"),
    summary = "Set Product Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion saved"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid promotion window"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<PromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductId::new(product.into_inner());
    let promotion = json.into_inner().into_window()?;

    let updated = state
        .app
        .products
        .set_promotion(product, promotion)
        .await
        .map_err(into_status_error)?;

    info!(
        product_id = %product,
        promo_price = ?updated.promo_price,
        "saved product promotion"
    );

    Ok(Json(ProductResponse::new(updated, state.today())))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;
    use vitrine::{promotions::PromotionWindow, validation::FieldErrors};
    use vitrine_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(repo: MockProductsService) -> TestResult<Service> {
        Mocks::with_products(repo)
            .into_service(Router::with_path("products/{product}/promotion").put(handler))
    }

    #[tokio::test]
    async fn test_set_promotion_forwards_window() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_set_promotion()
            .once()
            .withf(|id, promotion| {
                *id == ProductId::new(5)
                    && *promotion
                        == Some(PromotionWindow {
                            promo_price: 2_990,
                            promo_start_date: Some(date(2025, 6, 1)),
                            promo_end_date: Some(date(2025, 6, 30)),
                        })
            })
            .return_once(|_, promotion| {
                let mut product = make_product(5);

                if let Some(promotion) = promotion {
                    promotion.apply_to(&mut product);
                }

                Ok(product)
            });

        let res = TestClient::put("http://example.com/products/5/promotion")
            .json(&json!({
                "promo_price": 2990,
                "promo_start_date": "2025-06-01",
                "promo_end_date": "2025-06-30"
            }))
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_body_clears_promotion() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_set_promotion()
            .once()
            .withf(|_, promotion| promotion.is_none())
            .return_once(|_, _| Ok(make_product(5)));

        let res = TestClient::put("http://example.com/products/5/promotion")
            .json(&json!({}))
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_window_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_set_promotion().once().return_once(|_, _| {
            let mut errors = FieldErrors::new();

            errors.insert("promo_end_date", "Data final é obrigatória.");

            Err(ProductsServiceError::InvalidFields(errors))
        });

        let res = TestClient::put("http://example.com/products/5/promotion")
            .json(&json!({ "promo_price": 2990 }))
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
