//! Server configuration module

use clap::Parser;

use crate::config::{
    admin::AdminConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::StoreConfig,
};

pub(crate) mod admin;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;

/// Vitrine JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "vitrine-json", about = "Vitrine storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Store contact and calendar settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Administrator settings.
    #[command(flatten)]
    pub admin: AdminConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 7] = [
        "vitrine-json",
        "--database-url",
        "postgres://localhost/vitrine",
        "--admin-password",
        "segredo",
        "--whatsapp-number",
        "+55 (11) 98765-4321",
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.store.timezone, "America/Sao_Paulo");
        assert_eq!(config.store.store_email, "mtc@taimin.com.br");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);

        Ok(())
    }

    #[test]
    fn missing_admin_password_is_rejected() {
        let args = REQUIRED
            .iter()
            .copied()
            .filter(|arg| *arg != "--admin-password" && *arg != "segredo");

        assert!(ServerConfig::try_parse_from(args).is_err());
    }
}
