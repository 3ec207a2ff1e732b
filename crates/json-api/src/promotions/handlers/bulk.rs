//! Bulk Promotion Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use vitrine::promotions::BulkPromotion;

use crate::{
    extensions::*,
    products::requests::parse_date,
    promotions::errors::into_status_error,
};

/// Bulk Promotion Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkPromotionRequest {
    /// Percentage off every base price; absent clears every promotion
    #[serde(default)]
    pub discount_percent: Option<f64>,

    /// First day (`YYYY-MM-DD`)
    #[serde(default)]
    pub promo_start_date: Option<String>,

    /// Last day (`YYYY-MM-DD`)
    #[serde(default)]
    pub promo_end_date: Option<String>,
}

impl BulkPromotionRequest {
    fn into_bulk_promotion(self) -> Result<BulkPromotion, StatusError> {
        let discount_percent = self
            .discount_percent
            .map(Decimal::try_from)
            .transpose()
            .or_400("could not parse \"discount_percent\"")?;

        Ok(BulkPromotion {
            discount_percent,
            promo_start_date: parse_date(self.promo_start_date, "promo_start_date")?,
            promo_end_date: parse_date(self.promo_end_date, "promo_end_date")?,
        })
    }
}

/// Bulk Promotion Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkPromotionResponse {
    /// Number of products changed
    pub updated: u64,

    /// Number of products left alone because the discount rounds to no saving
    pub skipped: u64,
}

/// Bulk Promotion Handler
///
/// Applies a percentage discount to every product, or clears every promotion, atomically.
#[endpoint(
    tags("promotions"),
    summary = "Apply Bulk Promotion",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Promotion applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid percentage or dates"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BulkPromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<BulkPromotionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let promotion = json.into_inner().into_bulk_promotion()?;

    let summary = state
        .app
        .products
        .apply_bulk_promotion(promotion)
        .await
        .map_err(into_status_error)?;

    info!(
        updated = summary.updated,
        skipped = summary.skipped,
        discount_percent = ?promotion.discount_percent,
        "applied bulk promotion"
    );

    Ok(Json(BulkPromotionResponse {
        updated: summary.updated,
        skipped: summary.skipped,
    }))
}
