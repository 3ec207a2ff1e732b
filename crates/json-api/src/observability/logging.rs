//! Log subscriber

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::observability::{LogFormat, LoggingConfig};

use super::ObservabilityError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Directives applied when `RUST_LOG` holds a bare level rather than a full filter.
const QUIET_DEPENDENCIES: &str = "hyper=warn,sqlx=warn,salvo_core=info";

pub(super) fn init_subscriber(logging: &LoggingConfig) -> Result<(), ObservabilityError> {
    tracing_subscriber::registry()
        .with(format_layer(logging.log_format))
        .with(env_filter(&logging.log_level))
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_file(true).boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    }
}

fn filter_directives(log_level: &str) -> String {
    let log_level = log_level.trim();

    if log_level.contains('=') || log_level.contains(',') {
        log_level.to_string()
    } else {
        format!("{log_level},{QUIET_DEPENDENCIES}")
    }
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(log_level)).unwrap_or_else(|_| {
        EnvFilter::new(format!("info,{QUIET_DEPENDENCIES}"))
    })
}
