use actix_web::{middleware::from_fn, web, App, HttpServer};
use eth_rpc_gateway::{
    api,
    config::Config,
    gateway::Gateway,
    metrics::{track_requests, Metrics},
    rpc::HttpTransport,
    telemetry,
};
use eyre::{Result, WrapErr};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Application entry point
///
/// 1. Loads configuration
/// 2. Sets up logging
/// 3. Builds the upstream transport, gateway and metrics
/// 4. Starts the HTTP server with all endpoints
#[actix_web::main] // Actix will build a multithreaded runtime
async fn main() -> Result<()> {
    // Load configuration from environment variables
    let config = Config::from_env().wrap_err("Failed to load config")?;

    telemetry::init(&config.log_level)?;

    let transport = HttpTransport::new(&config);
    info!("Forwarding JSON-RPC calls to {}", config.upstream_url);

    let gateway = web::Data::new(Gateway::new(Arc::new(transport)));
    let metrics = web::Data::new(Metrics::new().wrap_err("Failed to register metrics")?);

    let bind_addr = format!("{}:{}", config.host, config.port);
    info!("App running on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(track_requests))
            // Add logging middleware
            .wrap(TracingLogger::default())
            // Shared between requests
            .app_data(gateway.clone())
            .app_data(metrics.clone())
            .configure(api::configure)
    })
    .workers(config.workers)
    .bind(&bind_addr)
    .wrap_err_with(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .wrap_err("HTTP server failed")
}
