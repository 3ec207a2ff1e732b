//! Vitrine JSON API Server

use std::process;

use jiff::tz::TimeZone;
use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use vitrine_app::{context::AppContext, domain::checkout::data::CheckoutSettings};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod checkout;
mod config;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod promotions;
mod reports;
mod router;
mod settings;
mod shutdown;
mod state;
mod storefront;
#[cfg(test)]
mod test_helpers;

/// Vitrine JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    }

    let time_zone = match TimeZone::get(&config.store.timezone) {
        Ok(time_zone) => time_zone,
        Err(tz_error) => {
            error!(timezone = %config.store.timezone, "unknown store time zone: {tz_error}");

            process::exit(1);
        }
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.database.acquire_timeout(),
        config.admin.admin_password.clone(),
        CheckoutSettings {
            time_zone,
            whatsapp_number: config.store.whatsapp_number.clone(),
            store_email: config.store.store_email.clone(),
        },
    ) {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .hoop(observability::request_logging)
        .push(router::app_router());

    let doc = OpenApi::new("Vitrine API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
