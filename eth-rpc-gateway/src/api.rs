use crate::{
    error::GatewayError,
    gateway::{Gateway, GET_BALANCE, GET_TRANSACTION_BY_HASH},
    metrics::Metrics,
};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Route listing endpoint
pub const ROOT_ROUTE: &str = "/";

/// Balance lookup endpoint
pub const BALANCE_ROUTE: &str = "/address/balance/{address}";

/// Transaction lookup endpoint
pub const TRANSACTION_ROUTE: &str = "/address/transaction/{address}";

/// Prometheus exposition endpoint
pub const METRICS_ROUTE: &str = "/metrics";

/// Every registered route pattern, in registration order
pub const ROUTES: &[&str] = &[ROOT_ROUTE, BALANCE_ROUTE, TRANSACTION_ROUTE, METRICS_ROUTE];

/// Body of a successful balance lookup
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BalanceResponse {
    /// Balance in ether
    pub balance: f64,
}

/// List the registered routes
///
/// Patterns are reported in actix-web's own syntax, so a path parameter
/// reads `{address}` rather than `<address>`.
async fn list_routes() -> HttpResponse {
    HttpResponse::Ok().json(ROUTES)
}

/// Latest balance of an address, in ether
async fn balance(
    address: web::Path<String>,
    gateway: web::Data<Gateway>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, GatewayError> {
    let address = address.into_inner();
    debug!("Balance requested for {}", address);

    let result = gateway.get_balance(&address).await;
    metrics.observe_upstream(GET_BALANCE, &result);

    Ok(HttpResponse::Ok().json(BalanceResponse { balance: result? }))
}

/// Transaction by hash, exactly as the upstream reports it
async fn transaction(
    tx_hash: web::Path<String>,
    gateway: web::Data<Gateway>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, GatewayError> {
    let tx_hash = tx_hash.into_inner();
    debug!("Transaction requested for {}", tx_hash);

    let result = gateway.get_transaction(&tx_hash).await;
    metrics.observe_upstream(GET_TRANSACTION_BY_HASH, &result);

    Ok(HttpResponse::Ok().json(result?))
}

/// Prometheus metrics in text exposition format
async fn render_metrics(metrics: web::Data<Metrics>) -> Result<HttpResponse, GatewayError> {
    let body = metrics.render()?;
    Ok(HttpResponse::Ok()
        .content_type(prometheus::TEXT_FORMAT)
        .body(body))
}

/// Configure the API routes for the service
///
/// Handlers expect `web::Data<Gateway>` and `web::Data<Metrics>` to be
/// registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    info!("Registering routes: {}", ROUTES.join(", "));
    cfg.route(ROOT_ROUTE, web::get().to(list_routes))
        .route(BALANCE_ROUTE, web::get().to(balance))
        .route(TRANSACTION_ROUTE, web::get().to(transaction))
        .route(METRICS_ROUTE, web::get().to(render_metrics));
}
