// ============================================================================
// RPC CLIENT - SOLO COMUNICACIÓN JSON-RPC con el cluster (Stateless)
// ============================================================================

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: (&'a str, RpcCommitment),
}

#[derive(Debug, Serialize)]
struct RpcCommitment {
    commitment: &'static str,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

/// Cliente JSON-RPC mínimo
#[derive(Clone)]
pub struct RpcClient {
    rpc_url: String,
}

impl RpcClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
        }
    }

    /// `getBalance` en lamports
    pub async fn get_balance(&self, pubkey: &str) -> Result<u64, String> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "getBalance",
            params: (pubkey, RpcCommitment { commitment: "confirmed" }),
        };

        let response = Request::post(&self.rpc_url)
            .json(&request)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }

        let body = response
            .json::<RpcResponse<BalanceResult>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        parse_balance_response(body)
    }
}

fn parse_balance_response(body: RpcResponse<BalanceResult>) -> Result<u64, String> {
    if let Some(error) = body.error {
        return Err(format!("RPC error {}: {}", error.code, error.message));
    }
    body.result
        .map(|r| r.value)
        .ok_or_else(|| "RPC response without result".to_string())
}
