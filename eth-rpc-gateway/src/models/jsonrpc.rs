use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JSON-RPC protocol version sent on every request
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request structure
///
/// Every outbound call carries positional string parameters and a freshly
/// generated correlation id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC protocol version (always "2.0")
    pub jsonrpc: String,

    /// Method name to call
    pub method: String,

    /// Positional method parameters
    pub params: Vec<String>,

    /// Request identifier, a random UUID rendered as 32 hex characters
    pub id: String,
}

impl JsonRpcRequest {
    /// Create a new request for `method` with a fresh random id
    pub fn new(method: &str, params: Vec<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// JSON-RPC 2.0 successful response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcSuccess<T> {
    /// JSON-RPC protocol version. Some providers leave it out.
    #[serde(default)]
    pub jsonrpc: String,

    /// Request identifier echoed by the server. Never checked.
    #[serde(default)]
    pub id: serde_json::Value,

    /// Method result
    pub result: T,
}

/// JSON-RPC 2.0 error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// JSON-RPC protocol version
    #[serde(default)]
    pub jsonrpc: String,

    /// Request identifier echoed by the server, null or absent on parse errors
    #[serde(default)]
    pub id: serde_json::Value,

    /// Error details. Any value is accepted here: the presence of the
    /// member is what marks the call as failed.
    #[serde(deserialize_with = "lenient_error_detail")]
    pub error: JsonRpcErrorDetail,
}

/// JSON-RPC 2.0 error detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorDetail {
    /// Error code (0 when the upstream sent none)
    #[serde(default)]
    pub code: i64,

    /// Error message
    #[serde(default)]
    pub message: String,

    /// Additional error data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// A decoded JSON-RPC 2.0 response
///
/// A body carrying an `error` member always decodes as `Failure`, whatever
/// the member holds, so the variants are listed in that order. A body with
/// neither `result` nor `error` does not decode at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcResponse {
    Failure(JsonRpcError),
    Success(JsonRpcSuccess<serde_json::Value>),
}

impl JsonRpcResponse {
    /// Split the response into its result or its error detail
    pub fn into_result(self) -> Result<serde_json::Value, JsonRpcErrorDetail> {
        match self {
            JsonRpcResponse::Success(success) => Ok(success.result),
            JsonRpcResponse::Failure(failure) => Err(failure.error),
        }
    }
}

impl JsonRpcErrorDetail {
    /// Interpret an arbitrary `error` member
    ///
    /// Well-formed error objects decode field by field. Anything else (a bare
    /// string, `null`, a non-numeric code) is kept whole in `data`.
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Self>(value.clone()) {
            Ok(detail) => detail,
            Err(_) => Self {
                code: 0,
                message: value
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string()),
                data: Some(value),
            },
        }
    }
}

fn lenient_error_detail<'de, D>(deserializer: D) -> Result<JsonRpcErrorDetail, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(JsonRpcErrorDetail::from_value(value))
}

impl std::fmt::Display for JsonRpcErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)?;
        if let Some(data) = &self.data {
            write!(f, " ({})", data)?;
        }
        Ok(())
    }
}

/// Parse a hexadecimal string into a `U256` value.
///
/// Expects a string starting with "0x" followed by at least one hex digit.
///
/// # Arguments
///
/// * `hex` - The hexadecimal string
///
/// # Returns
///
/// * `Result<U256, String>` - Parsed value or error message
pub fn parse_hex_u256(hex: &str) -> Result<U256, String> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .ok_or_else(|| "Hex value must start with 0x".to_string())?;
    if digits.is_empty() {
        return Err("Hex value has no digits".to_string());
    }
    U256::from_str_radix(digits, 16).map_err(|e| format!("Invalid hex value: {}", e))
}

/// Number of wei in one ether, as a multiplier
pub const WEI_TO_ETHER: f64 = 1e-18;

/// Convert an amount of wei to ether.
///
/// The integer is first rounded to the nearest `f64` and then scaled by
/// `1e-18`, so results match the usual `float(wei) * 1e-18` computation.
pub fn wei_to_ether(wei: U256) -> f64 {
    // Decimal rendering is exact and `f64::from_str` rounds correctly.
    let wei = wei.to_string().parse::<f64>().unwrap_or(f64::INFINITY);
    wei * WEI_TO_ETHER
}
