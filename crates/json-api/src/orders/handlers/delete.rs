//! Delete Order Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use vitrine::orders::OrderId;

use crate::{extensions::*, orders::errors::into_status_error};

/// Delete Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeleteOrderRequest {
    /// Admin password, asked again before an order is removed
    pub password: String,
}

/// Delete Order Handler
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Wrong confirmation password"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<DeleteOrderRequest>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let order = OrderId::from_uuid(order.into_inner());

    if !state.app.admin.verify(&json.into_inner().password) {
        warn!(order_id = %order, "order deletion refused: wrong password");

        return Err(StatusError::forbidden().brief("Senha incorreta."));
    }

    state
        .app
        .orders
        .delete_order(order)
        .await
        .map_err(into_status_error)?;

    info!(order_id = %order, "deleted order");

    Ok(StatusCode::OK)
}
