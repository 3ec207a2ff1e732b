//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    auth::{AdminCredentials, AdminCredentialsError},
    database::{self, Db},
    domain::{
        checkout::{CheckoutService, StoreCheckoutService, data::CheckoutSettings},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        settings::{PgSettingsService, SettingsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid database URL")]
    Database(#[source] sqlx::Error),

    #[error("invalid admin password")]
    AdminPassword(#[from] AdminCredentialsError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub settings: Arc<dyn SettingsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub admin: Arc<AdminCredentials>,
    pub store: CheckoutSettings,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// The pool connects lazily, so an unreachable database does not prevent start-up; each
    /// request then fails with a storage error until the database is back.
    ///
    /// # Errors
    ///
    /// Returns an error when the database URL cannot be parsed or the admin password is blank.
    pub fn from_database_url(
        url: &str,
        acquire_timeout: Duration,
        admin_password: String,
        store: CheckoutSettings,
    ) -> Result<Self, AppInitError> {
        let pool =
            database::connect_lazy(url, acquire_timeout).map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));
        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db.clone()));

        Ok(Self {
            checkout: Arc::new(StoreCheckoutService::new(
                Arc::clone(&products),
                Arc::clone(&orders),
                store.clone(),
            )),
            products,
            orders,
            settings: Arc::new(PgSettingsService::new(db)),
            admin: Arc::new(AdminCredentials::from_password(admin_password)?),
            store,
        })
    }
}
