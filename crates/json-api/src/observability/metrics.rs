//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

#[derive(Debug)]
struct StoreMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    checkouts_total: IntCounterVec,
    flagged_duplicate_orders: IntGauge,
}

static STORE_METRICS: OnceLock<Option<StoreMetrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a completed checkout by whether its order was stored and the customer's registration.
pub(crate) fn record_checkout(order_recorded: bool, registration: &str) {
    let Some(metrics) = metrics() else {
        return;
    };

    let order_recorded = if order_recorded { "true" } else { "false" };

    metrics
        .checkouts_total
        .with_label_values(&[order_recorded, registration])
        .inc();
}

/// Publish how many orders the latest admin listing flagged as duplicates.
pub(crate) fn record_flagged_duplicates(count: usize) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .flagged_duplicate_orders
        .set(i64::try_from(count).unwrap_or(i64::MAX));
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static StoreMetrics> {
    STORE_METRICS.get_or_init(build_metrics).as_ref()
}

/// Register a freshly created collector, logging and giving up on either failure.
fn registered<C>(registry: &Registry, name: &str, created: prometheus::Result<C>) -> Option<C>
where
    C: Collector + Clone + 'static,
{
    let metric = created
        .inspect_err(|source| error!("failed to create {name} metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!("failed to register {name} metric: {source}"))
        .ok()?;

    Some(metric)
}

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

fn build_metrics() -> Option<StoreMetrics> {
    let registry = Registry::new();

    let requests_total = registered(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "vitrine_json_http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = registered(
        &registry,
        "request_duration",
        HistogramVec::new(
            HistogramOpts::new(
                "vitrine_json_http_request_duration_seconds",
                "HTTP request latency in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = registered(
        &registry,
        "requests_in_flight",
        IntGauge::new(
            "vitrine_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        ),
    )?;

    let checkouts_total = registered(
        &registry,
        "checkouts_total",
        IntCounterVec::new(
            Opts::new(
                "vitrine_json_checkouts_total",
                "Completed checkouts by whether the order was stored and by registration.",
            ),
            &["order_recorded", "registration"],
        ),
    )?;

    let flagged_duplicate_orders = registered(
        &registry,
        "flagged_duplicate_orders",
        IntGauge::new(
            "vitrine_json_flagged_duplicate_orders",
            "Orders flagged as duplicates by the latest admin order listing.",
        ),
    )?;

    Some(StoreMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        checkouts_total,
        flagged_duplicate_orders,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
