use alloy_primitives::B256;
use std::fmt;

const FALLBACK_ERROR: &str = "Failed to post comment";

/// 卡片上展示的提交状态。只由提交流程修改，不做持久化。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    EmptyComment,
    Connecting,
    WrongChain {
        chain_name: String,
        chain_id: u64,
    },
    SwitchingChain {
        chain_name: String,
    },
    Preparing,
    Sending,
    Confirming,
    Success {
        tx_hash: B256,
    },
    Error {
        message: String,
    },
}

impl SubmissionStatus {
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        };
        Self::Error { message }
    }

    /// 一次提交的最后一个状态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::EmptyComment => write!(f, "Please enter a comment"),
            Self::Connecting => write!(f, "Connecting to wallet..."),
            Self::WrongChain {
                chain_name,
                chain_id,
            } => write!(
                f,
                "Please switch to {} network (Chain ID: {})",
                chain_name, chain_id
            ),
            Self::SwitchingChain { chain_name } => {
                write!(f, "Adding {} network to your wallet...", chain_name)
            }
            Self::Preparing => write!(f, "Preparing transaction..."),
            Self::Sending => write!(f, "Sending transaction..."),
            Self::Confirming => write!(f, "Transaction sent! Waiting for confirmation..."),
            Self::Success { tx_hash } => write!(
                f,
                "Comment posted successfully! Transaction hash: {}",
                tx_hash
            ),
            Self::Error { message } => write!(f, "Error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text() {
        assert_eq!(SubmissionStatus::Idle.to_string(), "");
        assert_eq!(
            SubmissionStatus::EmptyComment.to_string(),
            "Please enter a comment"
        );
        let wrong = SubmissionStatus::WrongChain {
            chain_name: "Base".to_string(),
            chain_id: 8453,
        };
        assert_eq!(
            wrong.to_string(),
            "Please switch to Base network (Chain ID: 8453)"
        );
        assert!(!wrong.is_terminal());
    }

    #[test]
    fn success_contains_hash() {
        let hash = B256::repeat_byte(0xab);
        let status = SubmissionStatus::Success { tx_hash: hash };
        let text = status.to_string();
        assert!(text.starts_with("Comment posted successfully! Transaction hash: "));
        assert!(text.contains(&hash.to_string()));
        assert!(status.is_terminal());
    }

    #[test]
    fn empty_error_message_falls_back() {
        assert_eq!(
            SubmissionStatus::error("  ").to_string(),
            "Error: Failed to post comment"
        );
        assert_eq!(
            SubmissionStatus::error("boom").to_string(),
            "Error: boom"
        );
    }
}
