//! Minimal JSON-RPC client and 32-byte ABI word decoding.

use anyhow::{Context, Result, anyhow, bail};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

/// JSON-RPC transport for a single endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Sends a single JSON-RPC request and returns its `result` field.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        debug!(method, "sending json-rpc request");
        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&RpcRequest {
                jsonrpc: "2.0",
                id: 1,
                method,
                params,
            })
            .send()
            .await
            .with_context(|| format!("rpc transport failure for {method}"))?
            .error_for_status()
            .with_context(|| format!("rpc http error for {method}"))?
            .json()
            .await
            .with_context(|| format!("malformed rpc response for {method}"))?;

        if let Some(error) = response.error {
            bail!("rpc error {} for {}: {}", error.code, method, error.message);
        }
        response
            .result
            .ok_or_else(|| anyhow!("rpc response for {method} missing result"))
    }

    /// `eth_call` against `to` with raw calldata, at the latest block.
    pub async fn eth_call(&self, to: &str, calldata: &str) -> Result<String> {
        let result = self
            .call("eth_call", json!([{ "to": to, "data": calldata }, "latest"]))
            .await?;
        result
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("eth_call returned non-string result"))
    }
}

/// Parses a `0x`-prefixed hex quantity of any length.
pub fn parse_hex_u256(value: &str) -> Result<U256> {
    let digits = value.trim_start_matches("0x");
    U256::from_str_radix(digits, 16).with_context(|| format!("invalid hex quantity {value}"))
}

/// Extracts the `index`-th 32-byte word from ABI-encoded return data.
pub fn decode_word(data: &str, index: usize) -> Result<U256> {
    let digits = data.trim_start_matches("0x");
    let start = index * 64;
    let end = start + 64;
    if digits.len() < end {
        bail!(
            "abi return data too short: wanted word {index}, got {} hex chars",
            digits.len()
        );
    }
    U256::from_str_radix(&digits[start..end], 16)
        .with_context(|| format!("invalid abi word at index {index}"))
}

/// Decodes a signed integer (up to 32 bits wide, sign-extended to a full
/// word, as int24 ticks are) from ABI return data.
pub fn decode_word_i32(data: &str, index: usize) -> Result<i32> {
    // Sign extension fills the low 32 bits with the correct two's
    // complement pattern, so truncating is exact.
    Ok(decode_word(data, index)?.low_u64() as u32 as i32)
}
