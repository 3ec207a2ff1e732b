//! Popup Settings Handlers

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    settings::{errors::into_status_error, responses::PopupPayload},
};

/// Get Popup Handler
///
/// Returns the stored popup, visible or not.
#[endpoint(
    tags("settings"),
    summary = "Get Popup",
    security(("bearer_auth" = []))
)]
pub(crate) async fn get_handler(depot: &mut Depot) -> Result<Json<PopupPayload>, StatusError> {
    let state = depot.state_or_500()?;

    let popup = state
        .app
        .settings
        .get_popup()
        .await
        .map_err(into_status_error)?;

    Ok(Json(popup.into()))
}

/// Update Popup Handler
#[endpoint(
    tags("settings"),
    summary = "Update Popup",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Popup saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid expiry"),
    ),
)]
pub(crate) async fn put_handler(
    json: JsonBody<PopupPayload>,
    depot: &mut Depot,
) -> Result<Json<PopupPayload>, StatusError> {
    let state = depot.state_or_500()?;
    let popup = json.into_inner().into_config()?;

    let saved = state
        .app
        .settings
        .update_popup(popup)
        .await
        .map_err(into_status_error)?;

    info!(
        active = saved.active,
        expires_at = ?saved.expires_at,
        "updated popup"
    );

    Ok(Json(saved.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vitrine::announcements::PopupConfig;
    use vitrine_app::domain::settings::{MockSettingsService, SettingsServiceError};

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(settings: MockSettingsService) -> TestResult<Service> {
        Mocks::with_settings(settings).into_service(
            Router::with_path("settings/popup")
                .get(get_handler)
                .put(put_handler),
        )
    }

    #[tokio::test]
    async fn test_get_popup_returns_stored_value() -> TestResult {
        let mut settings = MockSettingsService::new();

        settings.expect_get_popup().once().return_once(|| {
            Ok(PopupConfig {
                text: "Feriado: entregas na segunda".to_string(),
                expires_at: None,
                active: false,
            })
        });

        let body: PopupPayload = TestClient::get("http://example.com/settings/popup")
            .send(&make_service(settings)?)
            .await
            .take_json()
            .await?;

        assert_eq!(body.text, "Feriado: entregas na segunda");
        assert!(!body.active, "inactive popups are still returned to admins");

        Ok(())
    }

    #[tokio::test]
    async fn test_put_popup_parses_expiry() -> TestResult {
        let expires_at: Timestamp = "2025-12-24T23:59:59Z".parse()?;

        let mut settings = MockSettingsService::new();

        settings
            .expect_update_popup()
            .once()
            .withf(move |popup| {
                *popup
                    == PopupConfig {
                        text: "Natal".to_string(),
                        expires_at: Some(expires_at),
                        active: true,
                    }
            })
            .return_once(Ok);

        let res = TestClient::put("http://example.com/settings/popup")
            .json(&json!({
                "text": "  Natal ",
                "expires_at": "2025-12-24T23:59:59Z",
                "active": true
            }))
            .send(&make_service(settings)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_put_popup_bad_expiry_returns_400() -> TestResult {
        let mut settings = MockSettingsService::new();

        settings.expect_update_popup().never();

        let res = TestClient::put("http://example.com/settings/popup")
            .json(&json!({ "text": "Natal", "expires_at": "amanhã", "active": true }))
            .send(&make_service(settings)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_popup_returns_500() -> TestResult {
        let source = serde_json::from_str::<PopupConfig>("\"texto\"")
            .err()
            .ok_or("expected a decode error")?;

        let mut settings = MockSettingsService::new();

        settings
            .expect_get_popup()
            .once()
            .return_once(move || Err(SettingsServiceError::Malformed(source)));

        let res = TestClient::get("http://example.com/settings/popup")
            .send(&make_service(settings)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
