//! Typed view of the placeholder slots in a card template.

use serde_json::Value;

/// Adaptive Card element type of an editable text field.
pub const TEXT_INPUT_TYPE: &str = "Input.Text";

/// Adaptive Card element type of an image.
pub const IMAGE_TYPE: &str = "Image";

/// What a text-input slot holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotId {
    Name,
    Email,
    Telephone,
    Organization,
    Website,
    /// An input the assembler does not fill.
    Unrecognized(String),
}

impl SlotId {
    /// The known semantic identifiers, in card order.
    pub const KNOWN: [SlotId; 5] = [
        SlotId::Name,
        SlotId::Email,
        SlotId::Telephone,
        SlotId::Organization,
        SlotId::Website,
    ];

    pub fn parse(id: &str) -> Self {
        match id {
            "myName" => Self::Name,
            "myEmail" => Self::Email,
            "myTel" => Self::Telephone,
            "myOrg" => Self::Organization,
            "myWeb" => Self::Website,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Name => "myName",
            Self::Email => "myEmail",
            Self::Telephone => "myTel",
            Self::Organization => "myOrg",
            Self::Website => "myWeb",
            Self::Unrecognized(id) => id,
        }
    }
}

/// Classification of one element in the template's slot sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    TextInput(SlotId),
    Image,
    Other,
}

impl SlotKind {
    /// Classify a template element by its `type` and `id`.
    pub fn of(element: &Value) -> Self {
        match element.get("type").and_then(Value::as_str) {
            Some(TEXT_INPUT_TYPE) => {
                let id = element.get("id").and_then(Value::as_str).unwrap_or_default();
                Self::TextInput(SlotId::parse(id))
            }
            Some(IMAGE_TYPE) => Self::Image,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_inputs() {
        let el = json!({ "type": "Input.Text", "id": "myOrg" });
        assert_eq!(SlotKind::of(&el), SlotKind::TextInput(SlotId::Organization));
    }

    #[test]
    fn unknown_input_id_is_kept() {
        let el = json!({ "type": "Input.Text", "id": "myFax" });
        assert_eq!(
            SlotKind::of(&el),
            SlotKind::TextInput(SlotId::Unrecognized("myFax".into()))
        );
    }

    #[test]
    fn classifies_image_and_other() {
        assert_eq!(SlotKind::of(&json!({ "type": "Image", "url": "" })), SlotKind::Image);
        assert_eq!(SlotKind::of(&json!({ "type": "TextBlock" })), SlotKind::Other);
        assert_eq!(SlotKind::of(&json!("not an element")), SlotKind::Other);
    }

    #[test]
    fn ids_round_trip_through_parse() {
        for id in SlotId::KNOWN {
            assert_eq!(SlotId::parse(id.as_str()), id);
        }
    }
}
