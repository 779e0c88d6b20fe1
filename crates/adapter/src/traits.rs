use anyhow::Result;
use async_trait::async_trait;
use domain::{AddChainParameter, Address, ProviderError, B256};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::types::{FrameContext, TransactionReceipt, TransactionRequest};

/// EIP-1193 风格的钱包能力。由外部注入，测试里可以替换成假实现。
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let value = self.request("eth_requestAccounts", json!([])).await?;
        decode("eth_requestAccounts", value)
    }

    async fn chain_id(&self) -> Result<String, ProviderError> {
        let value = self.request("eth_chainId", json!([])).await?;
        decode("eth_chainId", value)
    }

    async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderError> {
        self.request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": chain_id }]),
        )
        .await?;
        Ok(())
    }

    async fn add_chain(&self, chain: &AddChainParameter) -> Result<(), ProviderError> {
        self.request("wallet_addEthereumChain", json!([chain]))
            .await?;
        Ok(())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ProviderError> {
        let value = self.request("eth_sendTransaction", json!([tx])).await?;
        decode("eth_sendTransaction", value)
    }

    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        let value = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        decode("eth_getTransactionReceipt", value)
    }
}

/// 宿主 (frame SDK) 的加载入口。加载完成前界面只显示占位。
#[async_trait]
pub trait FrameSdk: Send + Sync {
    async fn load(&self) -> Result<FrameContext>;
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(|e| ProviderError::invalid_response(method, e))
}
