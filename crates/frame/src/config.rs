use anyhow::Context;
use config::ConfigError;
use domain::{Address, ChainSpec, CommentMetadata, NativeCurrency};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::form::CardOptions;

const ENV_PREFIX: &str = "COMMENTS_";

#[derive(Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub wallet: WalletSettings,
    pub chain: ChainSettings,
    pub contract: ContractSettings,
    pub frame: FrameSettings,
    pub submission: SubmissionSettings,
}

#[derive(Deserialize, Clone, Default)]
pub struct WalletSettings {
    // 不配置即视为“没有钱包”
    pub rpc_url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct ChainSettings {
    pub id: u64,
    pub name: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
    pub rpc_url: String,
    pub explorer_url: String,
}

#[derive(Deserialize, Clone)]
pub struct ContractSettings {
    pub address: String,
}

#[derive(Deserialize, Clone)]
pub struct FrameSettings {
    pub location: String,
    pub metadata_source: String,
}

#[derive(Deserialize, Clone)]
pub struct SubmissionSettings {
    pub deadline_secs: u64,
    pub poll_interval_ms: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load(&run_mode, collect_env_vars(std::env::vars()))
    }

    fn load(run_mode: &str, env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env_json = serde_json::to_string(&env_map)
            .map_err(|e| ConfigError::Message(format!("Failed to encode environment: {}", e)))?;

        let s = config::Config::builder()
            .set_default("chain.id", ChainSpec::BASE_CHAIN_ID)?
            .set_default("chain.name", "Base")?
            .set_default("chain.currency_name", "ETH")?
            .set_default("chain.currency_symbol", "ETH")?
            .set_default("chain.currency_decimals", 18)?
            .set_default("chain.rpc_url", "https://mainnet.base.org")?
            .set_default("chain.explorer_url", "https://basescan.org")?
            .set_default(
                "contract.address",
                "0xb262c9278fbcac384ef59fc49e24d800152e19b1",
            )?
            .set_default("frame.location", "https://frame.local/")?
            .set_default("frame.metadata_source", "farcaster-frame")?
            .set_default("submission.deadline_secs", 3600)?
            .set_default("submission.poll_interval_ms", 2000)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }

    pub fn chain_spec(&self) -> ChainSpec {
        let c = &self.chain;
        ChainSpec {
            id: c.id,
            name: c.name.clone(),
            native_currency: NativeCurrency {
                name: c.currency_name.clone(),
                symbol: c.currency_symbol.clone(),
                decimals: c.currency_decimals,
            },
            rpc_urls: vec![c.rpc_url.clone()],
            block_explorer_urls: vec![c.explorer_url.clone()],
        }
    }

    pub fn card_options(&self) -> anyhow::Result<CardOptions> {
        let contract_address: Address = self
            .contract
            .address
            .parse()
            .with_context(|| format!("Invalid contract address: {}", self.contract.address))?;

        Ok(CardOptions {
            chain: self.chain_spec(),
            contract_address,
            metadata: CommentMetadata::new(self.frame.metadata_source.clone()),
            deadline_secs: self.submission.deadline_secs,
            poll_interval: Duration::from_millis(self.submission.poll_interval_ms),
        })
    }
}

/// COMMENTS_WALLET__RPC_URL -> wallet.rpc_url
fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
