mod contract;
mod drivers;
mod traits;
mod types;

pub use contract::{CommentsContract, CommentsV1, PendingTransaction};
pub use drivers::frame_host::StaticFrameSdk;
pub use drivers::http::{HttpWalletConfig, HttpWalletProvider};
pub use traits::{FrameSdk, WalletProvider};
pub use types::{FrameContext, TransactionReceipt, TransactionRequest};
