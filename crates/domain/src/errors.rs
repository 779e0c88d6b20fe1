use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// 钱包 (EIP-1193) 返回的错误对象，`message` 直接展示给用户。
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProviderError {
    pub const USER_REJECTED: i64 = 4001;
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    pub fn invalid_response(method: &str, reason: impl std::fmt::Display) -> Self {
        Self::internal(format!("Invalid response for {}: {}", method, reason))
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN
    }
}

#[derive(Debug, Error)]
pub enum ChainSwitchError {
    // 其它切换失败原样透传钱包的错误信息
    #[error("{0}")]
    Rejected(#[source] ProviderError),
    #[error("Failed to add {chain_name} network to your wallet")]
    AddFailed {
        chain_name: String,
        #[source]
        source: ProviderError,
    },
    #[error("Wallet is still on chain {actual}, expected {expected}")]
    StillWrongChain { expected: u64, actual: String },
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("{0}")]
    Rpc(#[from] ProviderError),
    #[error("Transaction {0} reverted")]
    Reverted(B256),
}

/// 一次提交流程中可能出现的全部错误，最终都会被转成状态文本。
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No Ethereum wallet detected. Please install a wallet like MetaMask.")]
    NoWallet,
    #[error("Wallet did not return any accounts")]
    NoAccounts,
    #[error("{0}")]
    Wallet(#[from] ProviderError),
    #[error(transparent)]
    ChainSwitch(#[from] ChainSwitchError),
    #[error("Failed to encode comment metadata: {0}")]
    Payload(#[from] serde_json::Error),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_round_trips_wallet_shape() {
        let raw = serde_json::json!({
            "code": 4902,
            "message": "Unrecognized chain ID \"0x2105\"."
        });
        let err: ProviderError = serde_json::from_value(raw).unwrap();
        assert!(err.is_unrecognized_chain());
        assert_eq!(err.to_string(), "Unrecognized chain ID \"0x2105\".");
        assert!(err.data.is_none());
    }

    #[test]
    fn submit_error_messages() {
        assert_eq!(
            SubmitError::NoWallet.to_string(),
            "No Ethereum wallet detected. Please install a wallet like MetaMask."
        );

        let add = SubmitError::from(ChainSwitchError::AddFailed {
            chain_name: "Base".to_string(),
            source: ProviderError::new(ProviderError::USER_REJECTED, "User rejected"),
        });
        assert_eq!(add.to_string(), "Failed to add Base network to your wallet");

        let rejected = SubmitError::from(ChainSwitchError::Rejected(ProviderError::new(
            ProviderError::USER_REJECTED,
            "User rejected the request.",
        )));
        assert_eq!(rejected.to_string(), "User rejected the request.");

        let reverted = SubmitError::from(TransactionError::Reverted(B256::ZERO));
        assert!(reverted.to_string().ends_with("reverted"));
    }
}
