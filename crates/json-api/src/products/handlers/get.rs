//! Get Product Handler

use jiff::civil::Date;
use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use vitrine::{
    pricing::format_brl,
    products::{Product, ProductId},
    promotions::{effective_price, is_promotion_active},
};

use crate::{extensions::*, products::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Base price in centavos
    pub price: u64,

    /// Discounted price in centavos
    pub promo_price: Option<u64>,

    /// First promotion day
    pub promo_start_date: Option<String>,

    /// Last promotion day
    pub promo_end_date: Option<String>,

    /// Whether the discounted price applies on the reference date
    pub promotion_active: bool,

    /// Price charged on the reference date, in centavos
    pub effective_price: u64,

    /// `effective_price` formatted as BRL
    pub effective_price_display: String,

    pub image_url: String,

    pub category: String,

    pub action: Option<String>,

    pub indication: Option<String>,

    pub quantity_info: Option<String>,

    /// `in_stock`, `out_of_stock` or `hidden`
    pub visibility: String,

    /// Dosage form derived from the name
    pub dosage_form: Option<String>,
}

impl ProductResponse {
    pub(crate) fn new(product: Product, on: Date) -> Self {
        let promotion_active = is_promotion_active(&product, on);
        let effective_price = effective_price(&product, on);

        Self {
            id: product.id.into_inner(),
            promotion_active,
            effective_price,
            effective_price_display: format_brl(effective_price),
            promo_start_date: product.promo_start_date.map(|date| date.to_string()),
            promo_end_date: product.promo_end_date.map(|date| date.to_string()),
            visibility: product.visibility.as_str().to_string(),
            dosage_form: product.dosage_form().map(str::to_string),
            name: product.name,
            price: product.price,
            promo_price: product.promo_price,
            image_url: product.image_url,
            category: product.category,
            action: product.action,
            indication: product.indication,
            quantity_info: product.quantity_info,
        }
    }
}

/// Get Product Handler
///
/// Returns a product priced on the given date, today by default.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    on: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let on = on.into_reference_date(state.today())?;

    let product = state
        .app
        .products
        .get_product(ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(product, on)))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vitrine::promotions::PromotionWindow;
    use vitrine_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(repo: MockProductsService) -> TestResult<Service> {
        Mocks::with_products(repo)
            .into_service(Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_product() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .withf(|id| *id == ProductId::new(7))
            .return_once(|_| Ok(make_product(7)));

        let mut res = TestClient::get("http://example.com/products/7")
            .send(&make_service(repo)?)
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 7);
        assert_eq!(body.effective_price, 4_990);
        assert_eq!(body.dosage_form.as_deref(), Some("Cápsula"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_prices_on_reference_date() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_get_product().once().return_once(|_| {
            let mut product = make_product(7);

            PromotionWindow {
                promo_price: 3_990,
                promo_start_date: Some(date(2025, 3, 1)),
                promo_end_date: Some(date(2025, 3, 31)),
            }
            .apply_to(&mut product);

            Ok(product)
        });

        let body: ProductResponse = TestClient::get("http://example.com/products/7?on=2025-03-31")
            .send(&make_service(repo)?)
            .await
            .take_json()
            .await?;

        assert!(body.promotion_active, "promotion should apply on its last day");
        assert_eq!(body.effective_price, 3_990);
        assert_eq!(body.promo_end_date.as_deref(), Some("2025-03-31"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/products/7")
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_reference_date_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_get_product().never();

        let res = TestClient::get("http://example.com/products/7?on=amanha")
            .send(&make_service(repo)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/products/abc")
            .send(&make_service(MockProductsService::new())?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
