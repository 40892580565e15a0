use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::{
    config::Config,
    error::GatewayError,
    models::jsonrpc::{JsonRpcRequest, JsonRpcResponse},
};

#[cfg(test)]
use mockall::automock;

/// Carries one JSON-RPC request to the upstream node and decodes its answer
///
/// Implementations make exactly one attempt per call. Anything other than a
/// 200 with a decodable JSON-RPC body is an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, GatewayError>;
}

/// HTTP transport for a single upstream JSON-RPC endpoint
#[derive(Clone, Debug)]
pub struct HttpTransport {
    /// Shared connection pool
    client: reqwest::Client,
    /// `{upstream_url}/{api_key}`
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport posting to the endpoint described by `config`
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(config.rpc_endpoint())
    }

    /// Create a transport posting to an explicit endpoint URL
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// URL every request is posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, GatewayError> {
        debug!(
            "request payload is {}",
            serde_json::to_string(request).unwrap_or_default()
        );

        // `json` sets Content-Type: application/json
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Got back status code {} and body {}", status.as_u16(), body);

        if status != StatusCode::OK {
            return Err(GatewayError::UpstreamStatus(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::MalformedResponse(format!("not a JSON-RPC response: {}", e))
        })
    }
}
