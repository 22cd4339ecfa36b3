use serde::{Deserialize, Serialize};

/// Content type the channel uses to render an Adaptive Card attachment.
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// A message handed to the channel collaborator.
///
/// Serializes as `{text}` or `{text, attachments}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<CardAttachment>,
}

/// A renderable card document attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttachment {
    pub content_type: String,
    pub content: serde_json::Value,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_card(text: impl Into<String>, card: serde_json::Value) -> Self {
        Self {
            text: text.into(),
            attachments: vec![CardAttachment::adaptive(card)],
        }
    }

    pub fn has_card(&self) -> bool {
        !self.attachments.is_empty()
    }
}

impl CardAttachment {
    pub fn adaptive(content: serde_json::Value) -> Self {
        Self {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_only_message_has_no_attachments_key() {
        let v = serde_json::to_value(OutboundMessage::text("hi")).unwrap();
        assert_eq!(v, json!({ "text": "hi" }));
    }

    #[test]
    fn card_message_wraps_adaptive_card() {
        let msg = OutboundMessage::with_card("details", json!({ "type": "AdaptiveCard" }));
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["attachments"][0]["contentType"], ADAPTIVE_CARD_CONTENT_TYPE);
        assert_eq!(v["attachments"][0]["content"]["type"], "AdaptiveCard");
        assert!(msg.has_card());
    }
}
