//! Order Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use vitrine::pricing::format_brl;

use crate::{
    extensions::*,
    observability::record_flagged_duplicates,
    orders::{errors::into_status_error, responses::OrderResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderResponse>,

    /// Number of orders flagged as duplicates
    pub duplicates: usize,

    /// Sum of every order total, in centavos
    pub total_price: u64,
    pub total_display: String,
}

/// Order Index Handler
///
/// Returns every order with its duplicate flag. Newly detected duplicates get the duplicate
/// marker written to their observation first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let flagged = state
        .app
        .orders
        .list_flagged_orders()
        .await
        .map_err(into_status_error)?;

    let duplicates = flagged.iter().filter(|flagged| flagged.duplicate).count();
    let total_price = flagged
        .iter()
        .fold(0_u64, |total, flagged| total.saturating_add(flagged.order.total_price));

    record_flagged_duplicates(duplicates);

    Ok(Json(OrdersResponse {
        orders: flagged
            .into_iter()
            .map(|flagged| {
                OrderResponse::new(flagged.order, flagged.duplicate, &state.app.store.time_zone)
            })
            .collect(),
        duplicates,
        total_price,
        total_display: format_brl(total_price),
    }))
}
