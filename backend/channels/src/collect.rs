//! Reply sink that buffers a turn's replies for a request/response channel.

use async_trait::async_trait;
use cardbot_core::{OutboundMessage, ReplySink, Result};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct CollectingSink {
    replies: Mutex<Vec<OutboundMessage>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_replies(self) -> Vec<OutboundMessage> {
        self.replies.into_inner()
    }
}

#[async_trait]
impl ReplySink for CollectingSink {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        self.replies.lock().await.push(message);
        Ok(())
    }
}
