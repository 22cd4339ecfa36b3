//! Card assembler: fill a private copy of the template with recognized fields.

use cardbot_core::RecognizedCardFields;
use serde_json::Value;
use tracing::debug;

use crate::slot::{SlotId, SlotKind};
use crate::template::CardTemplate;

/// Value written into the telephone slot. Recognition does not return a
/// phone number yet.
pub const TELEPHONE_PLACEHOLDER: &str = "12345678";

/// A card document filled for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledCard {
    document: Value,
}

impl AssembledCard {
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn into_document(self) -> Value {
        self.document
    }
}

/// Fill the template's slots from `fields` and point its image at `image_path`.
///
/// Works on a deep copy; the shared template is never modified. Absent fields
/// keep the template's default value.
pub fn assemble(template: &CardTemplate, fields: &RecognizedCardFields, image_path: &str) -> AssembledCard {
    let mut document = template.instantiate();

    if let Some(slots) = document
        .pointer_mut(template.slot_pointer())
        .and_then(Value::as_array_mut)
    {
        for slot in slots.iter_mut() {
            match SlotKind::of(slot) {
                SlotKind::TextInput(id) => {
                    let value = match id {
                        SlotId::Name => fields.name.as_deref(),
                        SlotId::Email => fields.email.as_deref(),
                        SlotId::Organization => fields.organization.as_deref(),
                        SlotId::Website => fields.website.as_deref(),
                        SlotId::Telephone => Some(TELEPHONE_PLACEHOLDER),
                        SlotId::Unrecognized(_) => None,
                    };
                    if let Some(value) = value {
                        set_string(slot, "value", value);
                    }
                }
                SlotKind::Image => set_string(slot, "url", image_path),
                SlotKind::Other => {}
            }
        }
    }

    debug!(image = image_path, "Assembled card");
    AssembledCard { document }
}

fn set_string(slot: &mut Value, key: &str, value: &str) {
    if let Some(obj) = slot.as_object_mut() {
        obj.insert(key.to_string(), Value::String(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DEFAULT_SLOT_POINTER;

    fn jane() -> RecognizedCardFields {
        RecognizedCardFields {
            name: Some("Jane Doe".into()),
            email: Some("jane@acme.com".into()),
            organization: Some("Acme".into()),
            website: Some("acme.com".into()),
        }
    }

    fn slot<'a>(card: &'a AssembledCard, id: &str) -> &'a Value {
        card.document()
            .pointer(DEFAULT_SLOT_POINTER)
            .and_then(Value::as_array)
            .and_then(|slots| slots.iter().find(|s| s["id"] == id))
            .unwrap()
    }

    fn image(card: &AssembledCard) -> &Value {
        card.document()
            .pointer(DEFAULT_SLOT_POINTER)
            .and_then(Value::as_array)
            .and_then(|slots| slots.iter().find(|s| s["type"] == "Image"))
            .unwrap()
    }

    #[test]
    fn fills_every_slot() {
        let template = CardTemplate::builtin().unwrap();
        let card = assemble(&template, &jane(), "images/card1.png");

        assert_eq!(slot(&card, "myName")["value"], "Jane Doe");
        assert_eq!(slot(&card, "myEmail")["value"], "jane@acme.com");
        assert_eq!(slot(&card, "myOrg")["value"], "Acme");
        assert_eq!(slot(&card, "myWeb")["value"], "acme.com");
        assert_eq!(slot(&card, "myTel")["value"], TELEPHONE_PLACEHOLDER);
        assert_eq!(image(&card)["url"], "images/card1.png");
    }

    #[test]
    fn absent_field_keeps_template_default() {
        let template = CardTemplate::builtin().unwrap();
        let fields = RecognizedCardFields {
            email: None,
            ..jane()
        };
        let card = assemble(&template, &fields, "images/card1.png");
        assert_eq!(slot(&card, "myEmail")["value"], "unknown@example.com");
        assert_eq!(slot(&card, "myName")["value"], "Jane Doe");
    }

    #[test]
    fn template_is_not_mutated() {
        let template = CardTemplate::builtin().unwrap();
        let before = template.document().clone();
        let _ = assemble(&template, &jane(), "images/card1.png");
        assert_eq!(template.document(), &before);
    }

    #[test]
    fn assemblies_do_not_leak_into_each_other() {
        let template = CardTemplate::builtin().unwrap();
        let first = assemble(&template, &jane(), "images/a.png");
        let bob = RecognizedCardFields {
            name: Some("Bob Roe".into()),
            email: None,
            organization: None,
            website: None,
        };
        let second = assemble(&template, &bob, "images/b.png");

        assert_eq!(slot(&first, "myName")["value"], "Jane Doe");
        assert_eq!(image(&first)["url"], "images/a.png");
        assert_eq!(slot(&second, "myName")["value"], "Bob Roe");
        assert_eq!(slot(&second, "myOrg")["value"], "");
        assert_eq!(image(&second)["url"], "images/b.png");
    }

    #[test]
    fn other_elements_are_untouched() {
        let doc = serde_json::json!({ "items": [
            { "type": "TextBlock", "text": "Name" },
            { "type": "Input.Text", "id": "myFax", "value": "keep" }
        ]});
        let template = CardTemplate::from_value(doc.clone(), "/items").unwrap();
        let card = assemble(&template, &jane(), "x.png");
        assert_eq!(card.document(), &doc);
    }
}
