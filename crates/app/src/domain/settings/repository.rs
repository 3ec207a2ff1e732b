//! Settings Repository

use serde_json::Value;
use sqlx::{Postgres, Transaction, query_scalar, types::Json};

const GET_SETTING_SQL: &str = include_str!("sql/get_setting.sql");
const UPSERT_SETTING_SQL: &str = include_str!("sql/upsert_setting.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSettingsRepository;

impl PgSettingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_setting(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
    ) -> Result<Option<Value>, sqlx::Error> {
        let value: Option<Json<Value>> = query_scalar(GET_SETTING_SQL)
            .bind(key)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(value.map(|Json(value)| value))
    }

    pub(crate) async fn upsert_setting(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        value: &Value,
    ) -> Result<Value, sqlx::Error> {
        let Json(stored): Json<Value> = query_scalar(UPSERT_SETTING_SQL)
            .bind(key)
            .bind(Json(value))
            .fetch_one(&mut **tx)
            .await?;

        Ok(stored)
    }
}
