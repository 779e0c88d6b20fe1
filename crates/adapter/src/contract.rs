use alloy_sol_types::{sol, SolCall};
use domain::{Address, Bytes, CommentPayload, TransactionError, B256, U256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::traits::WalletProvider;
use crate::types::{TransactionReceipt, TransactionRequest};

sol! {
    interface CommentsV1 {
        struct CommentData {
            string content;
            string metadata;
            string targetUri;
            bytes32 parentId;
            address author;
            address appSigner;
            uint256 nonce;
            uint256 deadline;
        }

        function postCommentAsAuthor(CommentData calldata commentData, bytes calldata appSignature) external;
    }
}

impl From<&CommentPayload> for CommentsV1::CommentData {
    fn from(p: &CommentPayload) -> Self {
        Self {
            content: p.content.clone(),
            metadata: p.metadata.clone(),
            targetUri: p.target_uri.clone(),
            parentId: p.parent_id_or_zero(),
            author: p.author,
            appSigner: p.app_signer,
            nonce: p.nonce,
            deadline: U256::from(p.deadline),
        }
    }
}

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// 绑定了签名账户的评论合约句柄
pub struct CommentsContract {
    address: Address,
    from: Address,
    provider: Arc<dyn WalletProvider>,
    poll_interval: Duration,
}

impl CommentsContract {
    pub fn connect(address: Address, provider: Arc<dyn WalletProvider>, from: Address) -> Self {
        Self {
            address,
            from,
            provider,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn encode_post_comment_as_author(payload: &CommentPayload, app_signature: &Bytes) -> Bytes {
        let call = CommentsV1::postCommentAsAuthorCall {
            commentData: payload.into(),
            appSignature: app_signature.clone(),
        };
        Bytes::from(call.abi_encode())
    }

    pub async fn post_comment_as_author(
        &self,
        payload: &CommentPayload,
        app_signature: &Bytes,
    ) -> Result<PendingTransaction, TransactionError> {
        let tx = TransactionRequest {
            from: self.from,
            to: self.address,
            data: Self::encode_post_comment_as_author(payload, app_signature),
        };
        let hash = self.provider.send_transaction(&tx).await?;
        info!("postCommentAsAuthor sent: {}", hash);

        Ok(PendingTransaction {
            hash,
            provider: self.provider.clone(),
            poll_interval: self.poll_interval,
        })
    }
}

/// 已广播、等待上链确认的交易
pub struct PendingTransaction {
    hash: B256,
    provider: Arc<dyn WalletProvider>,
    poll_interval: Duration,
}

impl PendingTransaction {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// 等到回执出现 (即一次确认)。没有超时。
    pub async fn wait(self) -> Result<TransactionReceipt, TransactionError> {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            match self.provider.transaction_receipt(self.hash).await? {
                Some(receipt) if receipt.succeeded() => return Ok(receipt),
                Some(_) => return Err(TransactionError::Reverted(self.hash)),
                None => debug!("receipt for {} not available yet", self.hash),
            }
        }
    }
}
