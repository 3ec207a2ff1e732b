//! Update Order Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use vitrine::{
    duplicates::DUPLICATE_MARKER,
    orders::{OrderId, RegistrationStatus, SaleStatus},
};
use vitrine_app::domain::orders::data::OrderUpdate;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
};

/// Update Order Request
///
/// Only the fields present change.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    /// `open` or `completed`
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub observation: Option<String>,

    /// `pending` or `registered`
    #[serde(default)]
    pub customer_status: Option<String>,
}

impl UpdateOrderRequest {
    fn into_update(self) -> Result<OrderUpdate, StatusError> {
        Ok(OrderUpdate {
            status: self
                .status
                .map(|status| status.trim().parse::<SaleStatus>())
                .transpose()
                .or_400("unknown sale status")?,
            observation: self.observation,
            customer_status: self
                .customer_status
                .map(|status| status.trim().parse::<RegistrationStatus>())
                .transpose()
                .or_400("unknown registration status")?,
        })
    }
}

/// Update Order Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let order = OrderId::from_uuid(order.into_inner());
    let update = json.into_inner().into_update()?;

    let updated = state
        .app
        .orders
        .update_order(order, update)
        .await
        .map_err(into_status_error)?;

    info!(
        order_id = %order,
        status = updated.status.as_str(),
        customer_status = updated.customer_status.as_str(),
        "updated order"
    );

    let duplicate = updated.observation.starts_with(DUPLICATE_MARKER);

    Ok(Json(OrderResponse::new(
        updated,
        duplicate,
        &state.app.store.time_zone,
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vitrine_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::test_helpers::{Mocks, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> TestResult<Service> {
        Mocks::with_orders(orders)
            .into_service(Router::with_path("orders/{order}").patch(handler))
    }

    #[tokio::test]
    async fn test_complete_order() -> TestResult {
        let order = make_order("222.222.222-22", 1);
        let id = order.id;

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order()
            .once()
            .withf(move |order_id, update| {
                *order_id == id
                    && *update
                        == OrderUpdate {
                            status: Some(SaleStatus::Completed),
                            observation: None,
                            customer_status: None,
                        }
            })
            .return_once(move |_, _| {
                let mut order = order;

                order.status = SaleStatus::Completed;

                Ok(order)
            });

        let body: OrderResponse = TestClient::patch(format!("http://example.com/orders/{id}"))
            .json(&json!({ "status": "completed" }))
            .send(&make_service(orders)?)
            .await
            .take_json()
            .await?;

        assert_eq!(body.status, "completed");
        assert_eq!(body.status_label, "Concluída");
        assert!(!body.duplicate, "a plain order is not a duplicate");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_order().never();

        let res = TestClient::patch(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "status": "cancelled" }))
            .send(&make_service(orders)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .json(&json!({ "observation": "Entregar após as 18h" }))
            .send(&make_service(orders)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
