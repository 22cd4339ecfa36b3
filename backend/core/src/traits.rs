use async_trait::async_trait;

use crate::error::Result;
use crate::message::OutboundMessage;
use crate::types::RecognizedCardFields;

/// Destination for outbound replies of one conversation turn.
///
/// Passed explicitly into every stage that needs to reply.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<()>;
}

/// Converts a business-card image into structured contact fields.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Recognize the base64-encoded image.
    async fn recognize(&self, base64_image: &str) -> Result<RecognizedCardFields>;
}
