use domain::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameContext {
    /// 当前页面地址，作为评论的 targetUri
    pub location: String,
}

/// `eth_sendTransaction` 的参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// 拜占庭分叉前的回执没有 status 字段，视为成功。
    pub fn succeeded(&self) -> bool {
        match self.status.as_deref() {
            Some(s) => domain::parse_quantity(s).map_or(true, |code| code != 0),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_status() {
        let hash = B256::repeat_byte(0x01);
        let raw = serde_json::json!({
            "transactionHash": hash,
            "blockNumber": "0x10",
            "status": "0x1",
            "gasUsed": "0x5208"
        });
        let receipt: TransactionReceipt = serde_json::from_value(raw).unwrap();
        assert_eq!(receipt.transaction_hash, hash);
        assert!(receipt.succeeded());

        let reverted = TransactionReceipt {
            status: Some("0x0".to_string()),
            ..receipt
        };
        assert!(!reverted.succeeded());
    }
}
