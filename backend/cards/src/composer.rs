//! Reply texts and message shapes sent back to the user.

use cardbot_core::OutboundMessage;

use crate::assembler::AssembledCard;

pub const RECOGNIZED_TEXT: &str = "Here are the recognized details:";
pub const NOT_SAVED_TEXT: &str = "Attachment was not successfully saved to disk.";
pub const RECOGNITION_FAILED_TEXT: &str =
    "The business card could not be recognized. Please try again.";

/// One reply carrying the filled card.
pub fn compose_card_reply(card: AssembledCard) -> OutboundMessage {
    OutboundMessage::with_card(RECOGNIZED_TEXT, card.into_document())
}

/// Reply for an attachment that could not be downloaded or stored.
pub fn compose_not_saved() -> OutboundMessage {
    OutboundMessage::text(NOT_SAVED_TEXT)
}

/// Reply for an attachment the recognition service failed on.
pub fn compose_recognition_failed() -> OutboundMessage {
    OutboundMessage::text(RECOGNITION_FAILED_TEXT)
}
