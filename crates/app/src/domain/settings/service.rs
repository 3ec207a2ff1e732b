//! Settings service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use vitrine::announcements::{POPUP_SETTING_KEY, PopupConfig};

use crate::{
    database::Db,
    domain::settings::{errors::SettingsServiceError, repository::PgSettingsRepository},
};

#[derive(Debug, Clone)]
pub struct PgSettingsService {
    db: Db,
    repository: PgSettingsRepository,
}

impl PgSettingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSettingsRepository::new(),
        }
    }
}

#[async_trait]
impl SettingsService for PgSettingsService {
    async fn get_popup(&self) -> Result<PopupConfig, SettingsServiceError> {
        let mut tx = self.db.begin().await?;

        let value = self.repository.get_setting(&mut tx, POPUP_SETTING_KEY).await?;

        tx.commit().await?;

        match value {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(PopupConfig::default()),
        }
    }

    #[tracing::instrument(
        name = "settings.service.update_popup",
        skip(self, popup),
        fields(active = popup.active, has_expiry = popup.expires_at.is_some()),
        err
    )]
    async fn update_popup(&self, popup: PopupConfig) -> Result<PopupConfig, SettingsServiceError> {
        let value = serde_json::to_value(&popup)?;

        let mut tx = self.db.begin().await?;

        let stored = self
            .repository
            .upsert_setting(&mut tx, POPUP_SETTING_KEY, &value)
            .await?;

        tx.commit().await?;

        info!(key = POPUP_SETTING_KEY, "updated setting");

        Ok(serde_json::from_value(stored)?)
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Retrieves the startup announcement, or an inactive one when none was saved.
    async fn get_popup(&self) -> Result<PopupConfig, SettingsServiceError>;

    /// Saves the startup announcement.
    async fn update_popup(&self, popup: PopupConfig) -> Result<PopupConfig, SettingsServiceError>;
}
