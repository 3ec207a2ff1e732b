//! Announcement Handler

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AnnouncementResponse {
    /// Message to show in the popup
    pub text: String,
}

/// Announcement Handler
///
/// Returns the popup message while it is switched on and unexpired, otherwise `204 No Content`.
/// Settings failures also produce `204` so the storefront still loads.
#[endpoint(
    tags("storefront"),
    summary = "Current Announcement",
    responses(
        (status_code = StatusCode::OK, description = "Popup to show", body = AnnouncementResponse),
        (status_code = StatusCode::NO_CONTENT, description = "Nothing to show"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state_or_500()?;

    let popup = match state.app.settings.get_popup().await {
        Ok(popup) => popup,
        Err(error) => {
            warn!(%error, "could not load popup; showing none");

            res.status_code(StatusCode::NO_CONTENT);

            return Ok(());
        }
    };

    if popup.is_visible(Timestamp::now()) {
        res.render(Json(AnnouncementResponse { text: popup.text }));
    } else {
        res.status_code(StatusCode::NO_CONTENT);
    }

    Ok(())
}
