use adapter::WalletProvider;
use domain::{Address, ChainSpec, CommentDraft, CommentMetadata, SubmissionStatus, B256};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info};

use crate::flow::SubmissionFlow;
use crate::status::StatusFeed;

#[derive(Debug, Clone)]
pub struct CardOptions {
    pub chain: ChainSpec,
    pub contract_address: Address,
    pub metadata: CommentMetadata,
    pub deadline_secs: u64,
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted(B256),
    Failed,
    /// 输入为空，没有发起任何钱包调用
    Rejected,
    /// 已有提交在进行中，本次调用什么也没做
    Busy,
}

/// 评论卡片：持有草稿、状态和“提交中”标记。
pub struct CommentCard {
    wallet: Option<Arc<dyn WalletProvider>>,
    options: CardOptions,
    location: String,
    draft: Mutex<CommentDraft>,
    posting: Arc<AtomicBool>,
    status: StatusFeed,
}

/// 已拿到“提交中”标记并固定了草稿内容的一次提交。
/// 在 `CommentCard::begin` 里同步创建，之后可以交给别的任务执行。
pub struct Submission {
    content: String,
    _posting: PostingGuard,
}

impl CommentCard {
    pub fn new(
        wallet: Option<Arc<dyn WalletProvider>>,
        options: CardOptions,
        location: impl Into<String>,
    ) -> Self {
        Self {
            wallet,
            options,
            location: location.into(),
            draft: Mutex::new(CommentDraft::default()),
            posting: Arc::new(AtomicBool::new(false)),
            status: StatusFeed::new(),
        }
    }

    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    pub fn set_content(&self, text: impl Into<String>) {
        self.draft().set(text);
    }

    pub fn content(&self) -> String {
        self.draft().content().to_string()
    }

    pub fn is_posting(&self) -> bool {
        self.posting.load(Ordering::Acquire)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_posting() && !self.draft().is_blank()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status.current()
    }

    /// 按顺序收到每一次状态变化
    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    pub fn watch_status(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.watch()
    }

    /// 先占住“提交中”标记，再读取草稿；两步之间不会被别的提交插入。
    pub fn begin(&self) -> Result<Submission, SubmitOutcome> {
        let Some(posting) = PostingGuard::acquire(&self.posting) else {
            debug!("submit ignored: a comment is already being posted");
            return Err(SubmitOutcome::Busy);
        };

        let content = {
            let draft = self.draft();
            if draft.is_blank() {
                None
            } else {
                Some(draft.content().to_string())
            }
        };
        let Some(content) = content else {
            drop(posting);
            self.status.publish(SubmissionStatus::EmptyComment);
            return Err(SubmitOutcome::Rejected);
        };

        Ok(Submission {
            content,
            _posting: posting,
        })
    }

    pub async fn run(&self, submission: Submission) -> SubmitOutcome {
        let flow = SubmissionFlow::new(
            self.wallet.as_ref(),
            &self.options,
            &self.location,
            &self.status,
        );

        // submission 活到函数结束，标记在最后才释放
        match flow.run(&submission.content).await {
            Ok(tx_hash) => {
                info!("Comment posted in {}", tx_hash);
                self.status.publish(SubmissionStatus::Success { tx_hash });
                self.draft().clear();
                SubmitOutcome::Posted(tx_hash)
            }
            Err(e) => {
                error!("Error posting comment: {:?}", e);
                self.status.publish(SubmissionStatus::error(e.to_string()));
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        match self.begin() {
            Ok(submission) => self.run(submission).await,
            Err(outcome) => outcome,
        }
    }

    fn draft(&self) -> MutexGuard<'_, CommentDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 离开作用域时清除“提交中”标记，成功和失败路径都一样。
struct PostingGuard {
    flag: Arc<AtomicBool>,
}

impl PostingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for PostingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
