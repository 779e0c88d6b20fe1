use async_trait::async_trait;
use domain::ProviderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::traits::WalletProvider;

#[derive(Clone)]
pub struct HttpWalletConfig {
    pub rpc_url: String,
}

/// 通过 HTTP JSON-RPC 访问钱包 (例如本地桌面钱包暴露的 RPC 端口)
pub struct HttpWalletProvider {
    config: HttpWalletConfig,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpWalletProvider {
    pub fn new(config: HttpWalletConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.config.rpc_url
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ProviderError>,
}

impl RpcResponse {
    fn into_result(self) -> Result<Value, ProviderError> {
        match self.error {
            Some(err) => Err(err),
            // `null` 也是合法结果 (例如回执尚未产生)
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("wallet rpc -> id={} method={}", id, method);

        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let resp = self
            .client
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::internal(format!("Wallet request {} failed: {}", method, e))
            })?;

        let parsed: RpcResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(method, e))?;

        parsed.into_result()
    }
}
