use domain::SubmissionStatus;
use tokio::sync::{broadcast, watch};
use tracing::debug;

// 一次提交最多九次状态变化，留足余量
const TRANSITION_BUFFER: usize = 32;

/// 状态发布：`watch` 保存当前值，`broadcast` 按顺序送出每一次变化，
/// 渲染端不会因为合并而漏掉中间状态。
pub struct StatusFeed {
    current: watch::Sender<SubmissionStatus>,
    transitions: broadcast::Sender<SubmissionStatus>,
}

impl StatusFeed {
    pub fn new() -> Self {
        let (current, _) = watch::channel(SubmissionStatus::Idle);
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            current,
            transitions,
        }
    }

    pub fn publish(&self, status: SubmissionStatus) {
        debug!("status -> {:?}", status);
        self.current.send_replace(status.clone());
        // 没有订阅者时直接丢弃
        let _ = self.transitions.send(status);
    }

    pub fn current(&self) -> SubmissionStatus {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionStatus> {
        self.transitions.subscribe()
    }

    pub fn watch(&self) -> watch::Receiver<SubmissionStatus> {
        self.current.subscribe()
    }
}

impl Default for StatusFeed {
    fn default() -> Self {
        Self::new()
    }
}
