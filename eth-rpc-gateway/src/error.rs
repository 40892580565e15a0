use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::jsonrpc::JsonRpcErrorDetail;

/// Gateway error types
///
/// Every failure of the single upstream call lands in one of these variants.
/// Upstream unavailability and upstream JSON-RPC errors are reported to the
/// caller as `404 Not Found`, matching the REST surface existing clients rely on.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The upstream could not be reached or the exchange was cut short
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with an HTTP status other than 200
    #[error("Upstream returned HTTP status {0}")]
    UpstreamStatus(u16),

    /// The upstream answered 200 with a JSON-RPC error object
    #[error("Upstream JSON-RPC error: {0}")]
    Upstream(JsonRpcErrorDetail),

    /// The upstream answered 200 with a body we cannot interpret
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Metrics could not be registered or encoded
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl GatewayError {
    /// Machine-readable error code included in response bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Transport(_) | GatewayError::UpstreamStatus(_) => "UPSTREAM_UNAVAILABLE",
            GatewayError::Upstream(_) => "UPSTREAM_ERROR",
            GatewayError::MalformedResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
            GatewayError::Metrics(_) => "METRICS_ERROR",
        }
    }

    /// Outcome label recorded for upstream calls that failed with this error
    ///
    /// `internal` marks failures on our side that never reached the upstream.
    pub fn outcome(&self) -> &'static str {
        match self {
            GatewayError::Transport(_) | GatewayError::UpstreamStatus(_) => "unavailable",
            GatewayError::Upstream(_) => "rpc_error",
            GatewayError::MalformedResponse(_) => "malformed",
            GatewayError::Metrics(_) => "internal",
        }
    }
}

/// Structured error response for the API
///
/// Upstream error codes and messages are logged but never copied in here.
#[derive(Serialize)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,

    /// Machine-readable error code
    error_code: String,
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = match self {
            GatewayError::MalformedResponse(_) => self.to_string(),
            _ => status.canonical_reason().unwrap_or("Error").to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error,
            error_code: self.error_code().to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            GatewayError::Transport(_)
            | GatewayError::UpstreamStatus(_)
            | GatewayError::Upstream(_) => StatusCode::NOT_FOUND,
            GatewayError::MalformedResponse(_) | GatewayError::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
