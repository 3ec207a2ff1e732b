//! Admin Config

use clap::Args;

/// Administrator settings.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Password for the admin routes and order deletion
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,
}
