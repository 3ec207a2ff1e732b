//! Store Config

use clap::Args;

/// Store contact and calendar settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// IANA time zone whose calendar date decides promotion validity
    #[arg(long, env = "STORE_TIMEZONE", default_value = "America/Sao_Paulo")]
    pub timezone: String,

    /// WhatsApp number orders are sent to
    #[arg(long, env = "WHATSAPP_NUMBER")]
    pub whatsapp_number: String,

    /// Store e-mail, copied on order confirmations
    #[arg(long, env = "STORE_EMAIL", default_value = "mtc@taimin.com.br")]
    pub store_email: String,
}
