use adapter::{CommentsV1, WalletProvider};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use domain::{Address, Bytes, ChainSpec, CommentMetadata, ProviderError, B256};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::form::CardOptions;

pub const TX_HASH: B256 = B256::repeat_byte(0x5a);

pub fn options() -> CardOptions {
    CardOptions {
        chain: ChainSpec::base(),
        contract_address: Address::repeat_byte(0xc0),
        metadata: CommentMetadata::new("farcaster-frame"),
        deadline_secs: 3600,
        poll_interval: Duration::from_millis(1),
    }
}

/// 按脚本应答的内存钱包，记录收到的每个方法名。
pub struct MockWallet {
    accounts: Vec<Address>,
    chain_id: Mutex<String>,
    follow_switch: bool,
    switch_error: Option<ProviderError>,
    add_error: Option<ProviderError>,
    send_error: Option<ProviderError>,
    receipt_status: &'static str,
    send_gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<String>>,
    added: Mutex<Vec<Value>>,
    sent: Mutex<Vec<Value>>,
}

impl MockWallet {
    pub const ACCOUNT: Address = Address::repeat_byte(0xa1);

    pub fn on_chain(chain_id: &str) -> Self {
        Self {
            accounts: vec![Self::ACCOUNT],
            chain_id: Mutex::new(chain_id.to_string()),
            follow_switch: true,
            switch_error: None,
            add_error: None,
            send_error: None,
            receipt_status: "0x1",
            send_gate: None,
            calls: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_switch_error(mut self, err: ProviderError) -> Self {
        self.switch_error = Some(err);
        self
    }

    pub fn with_add_error(mut self, err: ProviderError) -> Self {
        self.add_error = Some(err);
        self
    }

    /// 切换请求返回成功，但链 ID 不变
    pub fn ignoring_switch(mut self) -> Self {
        self.follow_switch = false;
        self
    }

    pub fn without_accounts(mut self) -> Self {
        self.accounts.clear();
        self
    }

    pub fn with_send_error(mut self, err: ProviderError) -> Self {
        self.send_error = Some(err);
        self
    }

    pub fn reverting(mut self) -> Self {
        self.receipt_status = "0x0";
        self
    }

    /// `eth_sendTransaction` 会一直挂起，直到 gate 被通知
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.send_gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|m| *m == method).count()
    }

    pub fn current_chain(&self) -> String {
        self.chain_id.lock().unwrap().clone()
    }

    pub fn added_chains(&self) -> Vec<Value> {
        self.added.lock().unwrap().clone()
    }

    /// 每笔 `eth_sendTransaction` 里编码的评论正文
    pub fn posted_contents(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|tx| {
                let data: Bytes = serde_json::from_value(tx["data"].clone()).unwrap();
                CommentsV1::postCommentAsAuthorCall::abi_decode(&data, true)
                    .unwrap()
                    .commentData
                    .content
            })
            .collect()
    }

    fn follow(&self, params: &Value) {
        if !self.follow_switch {
            return;
        }
        if let Some(id) = params[0]["chainId"].as_str() {
            *self.chain_id.lock().unwrap() = id.to_string();
        }
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.lock().unwrap().push(method.to_string());

        match method {
            "eth_requestAccounts" => Ok(json!(self.accounts)),
            "eth_chainId" => Ok(json!(self.current_chain())),
            "wallet_switchEthereumChain" => match &self.switch_error {
                Some(err) => Err(err.clone()),
                None => {
                    self.follow(&params);
                    Ok(Value::Null)
                }
            },
            "wallet_addEthereumChain" => {
                self.added.lock().unwrap().push(params[0].clone());
                match &self.add_error {
                    Some(err) => Err(err.clone()),
                    None => {
                        self.follow(&params);
                        Ok(Value::Null)
                    }
                }
            }
            "eth_sendTransaction" => {
                self.sent.lock().unwrap().push(params[0].clone());
                if let Some(gate) = &self.send_gate {
                    gate.notified().await;
                }
                match &self.send_error {
                    Some(err) => Err(err.clone()),
                    None => Ok(json!(TX_HASH)),
                }
            }
            "eth_getTransactionReceipt" => Ok(json!({
                "transactionHash": params[0],
                "blockNumber": "0x1",
                "status": self.receipt_status
            })),
            other => Err(ProviderError::new(
                ProviderError::METHOD_NOT_FOUND,
                format!("The method {} does not exist", other),
            )),
        }
    }
}
