mod chain;
mod errors;
mod models;
mod status;

pub use chain::{parse_quantity, AddChainParameter, ChainSpec, NativeCurrency};
pub use errors::{ChainSwitchError, ProviderError, SubmitError, TransactionError};
pub use models::{deadline_after, CommentDraft, CommentMetadata, CommentPayload};
pub use status::SubmissionStatus;

// 下游 crate 统一用这里的链上基础类型
pub use alloy_primitives::{Address, Bytes, B256, U256};
