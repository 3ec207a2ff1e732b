//! Announcements

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Settings key the popup is stored under.
pub const POPUP_SETTING_KEY: &str = "popup";

/// Popup shown to visitors when they open the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Message
    pub text: String,

    /// Last instant the popup is shown; `None` means no expiry
    pub expires_at: Option<Timestamp>,

    /// Switch
    pub active: bool,
}

impl PopupConfig {
    /// Whether visitors should see the popup at `now`.
    pub fn is_visible(&self, now: Timestamp) -> bool {
        self.active
            && !self.text.trim().is_empty()
            && self.expires_at.is_none_or(|expires_at| now <= expires_at)
    }
}
