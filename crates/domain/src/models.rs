use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 输入框里的评论草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    content: String,
}

impl CommentDraft {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// 写进 `metadata` 字段的 JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMetadata {
    pub source: String,
}

impl CommentMetadata {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// 提交给合约的评论数据，每次提交现建，不保留。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPayload {
    pub content: String,
    pub metadata: String,
    pub target_uri: String,
    pub parent_id: Option<B256>,
    pub author: Address,
    pub app_signer: Address,
    pub nonce: U256,
    pub deadline: u64,
}

impl CommentPayload {
    /// 作者自己充当 app signer；nonce 固定为 0，没有从合约读取。
    pub fn for_author(
        author: Address,
        content: impl Into<String>,
        target_uri: impl Into<String>,
        metadata: &CommentMetadata,
        deadline: u64,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content: content.into(),
            metadata: serde_json::to_string(metadata)?,
            target_uri: target_uri.into(),
            parent_id: None,
            author,
            app_signer: author,
            nonce: U256::ZERO,
            deadline,
        })
    }

    /// 合约侧用全零表示“没有父评论”
    pub fn parent_id_or_zero(&self) -> B256 {
        self.parent_id.unwrap_or(B256::ZERO)
    }
}

/// 截止时间：unix 秒
pub fn deadline_after(now: DateTime<Utc>, ttl_secs: u64) -> u64 {
    (now.timestamp().max(0) as u64).saturating_add(ttl_secs)
}
