use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// 目标链的描述：既用于链 ID 比对，也用于 `wallet_addEthereumChain` 注册。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    pub id: u64,
    pub name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

/// `wallet_addEthereumChain` 的参数对象 (EIP-3085)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameter {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl ChainSpec {
    pub const BASE_CHAIN_ID: u64 = 8453;

    pub fn base() -> Self {
        Self {
            id: Self::BASE_CHAIN_ID,
            name: "Base".to_string(),
            native_currency: NativeCurrency {
                name: "ETH".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://mainnet.base.org".to_string()],
            block_explorer_urls: vec!["https://basescan.org".to_string()],
        }
    }

    /// 钱包侧的链 ID 表示法，例如 8453 -> "0x2105"
    pub fn hex_id(&self) -> String {
        format!("0x{:x}", self.id)
    }

    /// 钱包可能返回大写或带前导零的十六进制，这里按数值比较。
    pub fn matches(&self, reported: &str) -> bool {
        parse_quantity(reported) == Some(self.id)
    }

    pub fn add_chain_parameter(&self) -> AddChainParameter {
        AddChainParameter {
            chain_id: self.hex_id(),
            chain_name: self.name.clone(),
            native_currency: self.native_currency.clone(),
            rpc_urls: self.rpc_urls.clone(),
            block_explorer_urls: self.block_explorer_urls.clone(),
        }
    }

    pub fn explorer_tx_url(&self, tx_hash: &str) -> Option<String> {
        self.block_explorer_urls
            .first()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
    }
}

/// 解析 JSON-RPC 的十六进制数量 ("0x2105")；十进制字符串也接受。
pub fn parse_quantity(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_chain_hex_id() {
        let base = ChainSpec::base();
        assert_eq!(base.hex_id(), "0x2105");
        assert!(base.matches("0x2105"));
        assert!(base.matches("0X2105"));
        assert!(base.matches("0x02105"));
        assert!(!base.matches("0x1"));
        assert!(!base.matches("garbage"));
    }

    #[test]
    fn add_chain_parameter_uses_wallet_field_names() {
        let value = serde_json::to_value(ChainSpec::base().add_chain_parameter()).unwrap();
        assert_eq!(value["chainId"], "0x2105");
        assert_eq!(value["chainName"], "Base");
        assert_eq!(value["nativeCurrency"]["decimals"], 18);
        assert_eq!(value["rpcUrls"][0], "https://mainnet.base.org");
        assert_eq!(value["blockExplorerUrls"][0], "https://basescan.org");
    }

    #[test]
    fn explorer_link() {
        let url = ChainSpec::base().explorer_tx_url("0xabc").unwrap();
        assert_eq!(url, "https://basescan.org/tx/0xabc");
    }
}
