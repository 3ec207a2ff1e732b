//! WhatsApp Report Handler

use salvo::prelude::*;
use vitrine::reports::whatsapp_report;

use crate::extensions::*;

use super::{attach_as, load_orders};

/// WhatsApp Report Handler
///
/// Every order, newest first, formatted for pasting into WhatsApp.
#[endpoint(
    tags("reports"),
    summary = "Orders WhatsApp Report",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Plain-text report"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<String, StatusError> {
    let state = depot.state_or_500()?;
    let orders = load_orders(state).await?;

    attach_as(res, "attachment; filename=\"relatorio-pedidos.txt\"");

    Ok(whatsapp_report(&orders, &state.app.store.time_zone))
}
