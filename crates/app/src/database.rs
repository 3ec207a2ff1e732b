//! Database connection management

use std::time::Duration;

use sqlx::{PgPool, Postgres, Transaction, postgres::PgPoolOptions};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired or the transaction cannot start.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Build a pool that opens connections on first use.
///
/// The storefront has to come up even while the database is unreachable; requests made in the
/// meantime fail individually with a storage error once `acquire_timeout` elapses.
///
/// # Errors
///
/// Returns an error only when `database_url` cannot be parsed.
pub fn connect_lazy(
    database_url: &str,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect_lazy(database_url)
}
