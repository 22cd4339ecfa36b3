use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{CardBotError, Result};
use crate::message::OutboundMessage;
use crate::traits::ReplySink;

/// Default buffer size for a per-turn reply channel.
const DEFAULT_BUFFER_SIZE: usize = 32;

/// A [`ReplySink`] backed by a bounded Tokio mpsc channel.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<OutboundMessage>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<OutboundMessage>) -> Self {
        Self { tx }
    }
}

/// Create a sink plus the receiver that drains it.
pub fn reply_channel() -> (ChannelSink, mpsc::Receiver<OutboundMessage>) {
    let (tx, rx) = mpsc::channel(DEFAULT_BUFFER_SIZE);
    (ChannelSink::new(tx), rx)
}

#[async_trait]
impl ReplySink for ChannelSink {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        debug!(has_card = message.has_card(), "Queueing reply");
        self.tx
            .send(message)
            .await
            .map_err(|e| CardBotError::ChannelClosed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sink_delivers_in_order() {
        let (sink, mut rx) = reply_channel();
        sink.send(OutboundMessage::text("one")).await.unwrap();
        sink.send(OutboundMessage::text("two")).await.unwrap();
        assert_eq!(rx.recv().await.unwrap().text, "one");
        assert_eq!(rx.recv().await.unwrap().text, "two");
    }

    #[tokio::test]
    async fn send_after_receiver_dropped_fails() {
        let (sink, rx) = reply_channel();
        drop(rx);
        let err = sink.send(OutboundMessage::text("lost")).await.unwrap_err();
        assert!(matches!(err, CardBotError::ChannelClosed(_)));
    }
}
