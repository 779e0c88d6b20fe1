use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::traits::FrameSdk;
use crate::types::FrameContext;

/// 终端里没有真正的宿主，页面地址来自配置。
pub struct StaticFrameSdk {
    location: String,
}

impl StaticFrameSdk {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

#[async_trait]
impl FrameSdk for StaticFrameSdk {
    async fn load(&self) -> Result<FrameContext> {
        if self.location.trim().is_empty() {
            anyhow::bail!("Frame location is empty");
        }
        info!("Frame SDK ready at {}", self.location);
        Ok(FrameContext {
            location: self.location.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_sdk_hands_out_location() {
        let sdk = StaticFrameSdk::new("https://frame.local/");
        let ctx = sdk.load().await.unwrap();
        assert_eq!(ctx.location, "https://frame.local/");

        assert!(StaticFrameSdk::new(" ").load().await.is_err());
    }
}
