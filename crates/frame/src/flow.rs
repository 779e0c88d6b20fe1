use adapter::{CommentsContract, PendingTransaction, WalletProvider};
use chrono::Utc;
use domain::{
    deadline_after, Address, Bytes, ChainSwitchError, CommentPayload, SubmissionStatus,
    SubmitError, B256,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::form::CardOptions;
use crate::status::StatusFeed;

/// 一次提交的完整流水线：
/// Connecting -> ChainCheck -> [Switching] -> Preparing -> Sending -> Confirming
pub struct SubmissionFlow<'a> {
    wallet: Option<&'a Arc<dyn WalletProvider>>,
    options: &'a CardOptions,
    location: &'a str,
    status: &'a StatusFeed,
}

impl<'a> SubmissionFlow<'a> {
    pub fn new(
        wallet: Option<&'a Arc<dyn WalletProvider>>,
        options: &'a CardOptions,
        location: &'a str,
        status: &'a StatusFeed,
    ) -> Self {
        Self {
            wallet,
            options,
            location,
            status,
        }
    }

    pub async fn run(&self, content: &str) -> Result<B256, SubmitError> {
        let (wallet, author) = self.connect().await?;
        self.ensure_chain(&**wallet).await?;
        let (contract, payload) = self.prepare(wallet, author, content)?;
        let pending = self.send(&contract, &payload).await?;
        self.confirm(pending).await
    }

    fn report(&self, status: SubmissionStatus) {
        self.status.publish(status);
    }

    // --- 1. 连接钱包，取第一个账户 ---
    async fn connect(&self) -> Result<(&'a Arc<dyn WalletProvider>, Address), SubmitError> {
        self.report(SubmissionStatus::Connecting);

        let wallet = self.wallet.ok_or(SubmitError::NoWallet)?;
        let accounts = wallet.request_accounts().await?;
        let author = accounts.first().copied().ok_or(SubmitError::NoAccounts)?;
        info!("Wallet connected as {}", author);

        Ok((wallet, author))
    }

    // --- 2. 校验链 ID，必要时切换 / 注册 ---
    async fn ensure_chain(&self, wallet: &dyn WalletProvider) -> Result<(), SubmitError> {
        let chain = &self.options.chain;
        let current = wallet.chain_id().await?;
        if chain.matches(&current) {
            return Ok(());
        }

        warn!(
            "Wallet is on chain {}, switching to {} ({})",
            current,
            chain.name,
            chain.hex_id()
        );
        self.report(SubmissionStatus::WrongChain {
            chain_name: chain.name.clone(),
            chain_id: chain.id,
        });

        if let Err(switch_err) = wallet.switch_chain(&chain.hex_id()).await {
            if !switch_err.is_unrecognized_chain() {
                return Err(ChainSwitchError::Rejected(switch_err).into());
            }

            // 钱包里没有这条链：注册后由钱包自己完成切换
            self.report(SubmissionStatus::SwitchingChain {
                chain_name: chain.name.clone(),
            });
            wallet
                .add_chain(&chain.add_chain_parameter())
                .await
                .map_err(|source| ChainSwitchError::AddFailed {
                    chain_name: chain.name.clone(),
                    source,
                })?;
        }

        let after = wallet.chain_id().await?;
        if !chain.matches(&after) {
            return Err(ChainSwitchError::StillWrongChain {
                expected: chain.id,
                actual: after,
            }
            .into());
        }
        Ok(())
    }

    // --- 3. 构造合约句柄与评论数据 ---
    fn prepare(
        &self,
        wallet: &Arc<dyn WalletProvider>,
        author: Address,
        content: &str,
    ) -> Result<(CommentsContract, CommentPayload), SubmitError> {
        self.report(SubmissionStatus::Preparing);

        let contract =
            CommentsContract::connect(self.options.contract_address, wallet.clone(), author)
                .with_poll_interval(self.options.poll_interval);

        let deadline = deadline_after(Utc::now(), self.options.deadline_secs);
        let payload = CommentPayload::for_author(
            author,
            content,
            self.location,
            &self.options.metadata,
            deadline,
        )?;

        Ok((contract, payload))
    }

    // --- 4. 发送交易 ---
    async fn send(
        &self,
        contract: &CommentsContract,
        payload: &CommentPayload,
    ) -> Result<PendingTransaction, SubmitError> {
        self.report(SubmissionStatus::Sending);

        // TODO: app 签名与 nonce 仍是占位值，需要产品确认真实的签名方案后再补上
        let app_signature = Bytes::new();
        Ok(contract
            .post_comment_as_author(payload, &app_signature)
            .await?)
    }

    // --- 5. 等待一次确认 ---
    async fn confirm(&self, pending: PendingTransaction) -> Result<B256, SubmitError> {
        self.report(SubmissionStatus::Confirming);
        debug!("waiting for {} to be confirmed", pending.hash());

        let receipt = pending.wait().await?;
        Ok(receipt.transaction_hash)
    }
}
