//! Popup payloads

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use vitrine::announcements::PopupConfig;

use crate::extensions::*;

/// Popup announcement
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PopupPayload {
    /// Message shown to visitors
    #[serde(default)]
    pub text: String,

    /// RFC 3339 instant after which the popup is hidden
    #[serde(default)]
    pub expires_at: Option<String>,

    /// Whether the popup is switched on
    #[serde(default)]
    pub active: bool,
}

impl From<PopupConfig> for PopupPayload {
    fn from(popup: PopupConfig) -> Self {
        Self {
            text: popup.text,
            expires_at: popup.expires_at.map(|expires_at| expires_at.to_string()),
            active: popup.active,
        }
    }
}

impl PopupPayload {
    pub(crate) fn into_config(self) -> Result<PopupConfig, StatusError> {
        Ok(PopupConfig {
            text: self.text.trim().to_string(),
            expires_at: self
                .expires_at
                .filter(|value| !value.trim().is_empty())
                .map(|value| value.trim().parse())
                .transpose()
                .or_400("could not parse \"expires_at\"")?,
            active: self.active,
        })
    }
}
