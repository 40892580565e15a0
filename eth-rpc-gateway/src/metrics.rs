//! Prometheus metrics for the gateway
//!
//! Collectors live in a private [`Registry`] held in [`Metrics`], which is
//! shared with handlers as application data. Request metrics are recorded by
//! the [`track_requests`] middleware; upstream outcomes by the API handlers.
//! On Linux the registry also carries the standard `process_*` collectors.

use std::time::Instant;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error,
};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

use crate::error::GatewayError;

/// Paths excluded from request tracking
const UNTRACKED_PATHS: &[&str] = &["/", "/metrics"];

/// Label used when no route matched the request
const UNMATCHED: &str = "unmatched";

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_duration: HistogramVec,
    upstream_requests: IntCounterVec,
}

impl Metrics {
    /// Create and register all collectors in a fresh registry
    pub fn new() -> Result<Self, GatewayError> {
        let registry = Registry::new();

        let app_info = IntGaugeVec::new(
            Opts::new("app_info", "Eth Balance gateway build information"),
            &["version"],
        )?;
        app_info
            .with_label_values(&[env!("CARGO_PKG_VERSION")])
            .set(1);

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests served"),
            &["method", "path", "status"],
        )?;
        let http_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            ),
            &["method", "path", "status"],
        )?;
        let upstream_requests = IntCounterVec::new(
            Opts::new("upstream_requests_total", "JSON-RPC calls made to the upstream"),
            &["rpc_method", "outcome"],
        )?;

        registry.register(Box::new(app_info))?;
        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(http_duration.clone()))?;
        registry.register(Box::new(upstream_requests.clone()))?;

        // CPU, memory and file descriptor gauges, read from procfs on scrape
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            http_requests,
            http_duration,
            upstream_requests,
        })
    }

    /// Record one served HTTP request
    pub fn observe_request(&self, method: &str, path: &str, status: u16, seconds: f64) {
        let status = status.to_string();
        let labels = [method, path, status.as_str()];
        self.http_requests.with_label_values(&labels).inc();
        self.http_duration.with_label_values(&labels).observe(seconds);
    }

    /// Record the outcome of one upstream call
    pub fn observe_upstream<T>(&self, rpc_method: &str, result: &Result<T, GatewayError>) {
        let outcome = match result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        self.upstream_requests
            .with_label_values(&[rpc_method, outcome])
            .inc();
    }

    /// Render the registry in the Prometheus text exposition format
    pub fn render(&self) -> Result<String, GatewayError> {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| GatewayError::Metrics(prometheus::Error::Msg(e.to_string())))
    }
}

/// Middleware recording count and latency of every tracked request
///
/// Requests are labelled by matched route pattern, so path parameters do not
/// create new series.
pub async fn track_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let metrics = req.app_data::<web::Data<Metrics>>().cloned();
    let method = req.method().to_string();
    let start = Instant::now();

    let res = next.call(req).await?;

    if let Some(metrics) = metrics {
        let path = res
            .request()
            .match_pattern()
            .unwrap_or_else(|| UNMATCHED.to_string());
        if !UNTRACKED_PATHS.contains(&path.as_str()) {
            metrics.observe_request(
                &method,
                &path,
                res.status().as_u16(),
                start.elapsed().as_secs_f64(),
            );
        }
    }

    Ok(res)
}
