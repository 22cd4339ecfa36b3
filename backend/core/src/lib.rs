pub mod channel;
pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use channel::{reply_channel, ChannelSink};
pub use error::{CardBotError, Result};
pub use message::{CardAttachment, OutboundMessage, ADAPTIVE_CARD_CONTENT_TYPE};
pub use traits::{Recognizer, ReplySink};
pub use types::{AttachmentDescriptor, LocalAttachmentResult, RecognizedCardFields};
