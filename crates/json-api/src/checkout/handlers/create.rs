//! Checkout Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use vitrine::pricing::format_brl;
use vitrine_app::domain::checkout::data::CheckoutReceipt;

use crate::{
    checkout::{errors::into_status_error, requests::CheckoutPayload},
    extensions::*,
    observability::record_checkout,
    orders::responses::OrderItemResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// Recorded order, absent when recording failed
    pub order_id: Option<Uuid>,
    pub order_recorded: bool,

    /// `pending` for first-time customers, `registered` otherwise
    pub customer_status: String,
    pub items: Vec<OrderItemResponse>,

    /// Centavos
    pub total_price: u64,
    pub total_display: String,

    /// Pre-filled WhatsApp message
    pub message: String,

    /// Link that opens WhatsApp with `message`
    pub whatsapp_url: String,
}

impl From<CheckoutReceipt> for CheckoutResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        Self {
            order_id: receipt.order_id.map(|id| id.into_uuid()),
            order_recorded: receipt.order_recorded,
            customer_status: receipt.customer_status.as_str().to_string(),
            items: receipt.items.into_iter().map(Into::into).collect(),
            total_display: format_brl(receipt.total_price),
            total_price: receipt.total_price,
            message: receipt.message,
            whatsapp_url: receipt.whatsapp_url,
        }
    }
}

/// Checkout Handler
///
/// Prices the cart, honouring recent price quotes, records the order and returns the WhatsApp
/// hand-off. A failure to record the order is reported in `order_recorded` rather than as an
/// error.
#[endpoint(
    tags("storefront"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Checkout completed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid customer or empty cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product"),
        (status_code = StatusCode::CONFLICT, description = "Product unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutPayload>,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner().into_request()?;

    let receipt = state
        .app
        .checkout
        .checkout(request)
        .await
        .map_err(into_status_error)?;

    record_checkout(receipt.order_recorded, receipt.customer_status.as_str());

    info!(
        order_id = ?receipt.order_id,
        order_recorded = receipt.order_recorded,
        total_price = receipt.total_price,
        "checkout completed"
    );

    Ok(Json(receipt.into()))
}
