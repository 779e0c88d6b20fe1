use adapter::{FrameSdk, WalletProvider};
use anyhow::Context;
use domain::SubmissionStatus;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::form::{CardOptions, CommentCard};

pub const LOADING_TEXT: &str = "Loading...";

/// 评论卡片在某一时刻的快照，终端按它重绘。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub description: String,
    pub label: String,
    pub placeholder: String,
    pub content: String,
    pub status: Option<String>,
    pub button_label: String,
    pub button_disabled: bool,
}

impl CardView {
    pub fn of(card: &CommentCard) -> Self {
        let status = card.status();
        let posting = card.is_posting();
        Self {
            title: "Post an Onchain Comment".to_string(),
            description: format!(
                "Your comment will be stored on {} blockchain",
                card.options().chain.name
            ),
            label: "Your Comment".to_string(),
            placeholder: "Type your comment here...".to_string(),
            content: card.content(),
            status: (status != SubmissionStatus::Idle).then(|| status.to_string()),
            button_label: if posting { "Posting..." } else { "Post Comment" }.to_string(),
            button_disabled: !card.can_submit(),
        }
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+ {}", self.title)?;
        writeln!(f, "| {}", self.description)?;
        writeln!(f, "|")?;
        if self.content.is_empty() {
            writeln!(f, "| {}: ({})", self.label, self.placeholder)?;
        } else {
            writeln!(f, "| {}: {}", self.label, self.content)?;
        }
        if let Some(status) = &self.status {
            writeln!(f, "| {}", status)?;
        }
        let suffix = if self.button_disabled { " (disabled)" } else { "" };
        write!(f, "+ [ {} ]{}", self.button_label, suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameView {
    Loading,
    Card(CardView),
}

impl fmt::Display for FrameView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameView::Loading => write!(f, "{}", LOADING_TEXT),
            FrameView::Card(card) => write!(f, "{}", card),
        }
    }
}

/// 宿主 SDK 就绪前只渲染占位，就绪后渲染评论卡片。
pub struct Frame {
    card: Option<Arc<CommentCard>>,
}

impl Frame {
    pub fn loading() -> Self {
        Self { card: None }
    }

    pub async fn boot(
        sdk: &dyn FrameSdk,
        wallet: Option<Arc<dyn WalletProvider>>,
        options: CardOptions,
    ) -> anyhow::Result<Self> {
        let ctx = sdk.load().await.context("Frame SDK failed to load")?;
        info!("Frame loaded for {}", ctx.location);

        Ok(Self {
            card: Some(Arc::new(CommentCard::new(wallet, options, ctx.location))),
        })
    }

    pub fn is_sdk_loaded(&self) -> bool {
        self.card.is_some()
    }

    pub fn card(&self) -> Option<Arc<CommentCard>> {
        self.card.clone()
    }

    pub fn render(&self) -> FrameView {
        match &self.card {
            Some(card) => FrameView::Card(CardView::of(card)),
            None => FrameView::Loading,
        }
    }
}
