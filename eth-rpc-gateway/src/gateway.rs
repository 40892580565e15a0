use crate::{
    error::GatewayError,
    models::jsonrpc::{parse_hex_u256, wei_to_ether, JsonRpcRequest},
    rpc::RpcTransport,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// JSON-RPC method backing the balance route
pub const GET_BALANCE: &str = "eth_getBalance";

/// JSON-RPC method backing the transaction route
pub const GET_TRANSACTION_BY_HASH: &str = "eth_getTransactionByHash";

/// Block tag sent with every balance query
pub const LATEST_BLOCK: &str = "latest";

/// Gateway service translating REST lookups into upstream JSON-RPC calls
///
/// Each operation builds one request, sends it through the transport once and
/// interprets the answer. There are no retries and no caching.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn RpcTransport>,
}

impl Gateway {
    /// Creates a new gateway on top of the given transport
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Fetch the latest balance of `address`, in ether
    ///
    /// The address is forwarded verbatim; the upstream is the one to reject
    /// anything that is not a valid address.
    ///
    /// # Returns
    ///
    /// * `Result<f64, GatewayError>` - The balance on success. A `result` that
    ///   is not a 0x-prefixed hex quantity is a `MalformedResponse`.
    #[instrument(skip(self), err)]
    pub async fn get_balance(&self, address: &str) -> Result<f64, GatewayError> {
        let request = JsonRpcRequest::new(
            GET_BALANCE,
            vec![address.to_string(), LATEST_BLOCK.to_string()],
        );
        let result = self.call(request).await?;

        let hex = result.as_str().ok_or_else(|| {
            GatewayError::MalformedResponse(format!("balance result is not a string: {}", result))
        })?;
        debug!("pre-parsed balance is {}", hex);

        let wei = parse_hex_u256(hex).map_err(GatewayError::MalformedResponse)?;
        debug!("parsed balance is {} wei", wei);

        Ok(wei_to_ether(wei))
    }

    /// Fetch a transaction by hash
    ///
    /// The upstream `result` is returned untouched, `null` included when the
    /// hash is unknown upstream.
    #[instrument(skip(self), err)]
    pub async fn get_transaction(&self, tx_hash: &str) -> Result<Value, GatewayError> {
        let request = JsonRpcRequest::new(GET_TRANSACTION_BY_HASH, vec![tx_hash.to_string()]);
        self.call(request).await
    }

    async fn call(&self, request: JsonRpcRequest) -> Result<Value, GatewayError> {
        let response = self.transport.send(&request).await?;

        response.into_result().map_err(|error| {
            warn!(method = %request.method, id = %request.id, "{}", error);
            GatewayError::Upstream(error)
        })
    }
}
