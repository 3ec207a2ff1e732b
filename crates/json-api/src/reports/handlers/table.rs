//! Orders Table Handler

use salvo::prelude::*;
use vitrine::reports::orders_table;

use crate::extensions::*;

use super::{attach_as, load_orders};

/// Orders Table Handler
///
/// Every order as a text table, followed by the grand total.
#[endpoint(
    tags("reports"),
    summary = "Orders Table",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Plain-text table"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<String, StatusError> {
    let state = depot.state_or_500()?;
    let orders = load_orders(state).await?;

    attach_as(res, "attachment; filename=\"pedidos.txt\"");

    Ok(orders_table(&orders, &state.app.store.time_zone))
}
