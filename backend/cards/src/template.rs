//! Card template: the read-only Adaptive Card document that replies are built from.
//!
//! Loaded once at start-up and shared behind an `Arc`. Validation happens here
//! so that the assembler can assume a well-formed slot sequence.

use cardbot_core::{CardBotError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

use crate::slot::{SlotId, SlotKind};

/// JSON pointer to the slot sequence in the default card layout.
pub const DEFAULT_SLOT_POINTER: &str = "/body/0/columns/0/items";

const BUILTIN_TEMPLATE: &str = include_str!("../templates/biz_card.json");

#[derive(Debug, Clone)]
pub struct CardTemplate {
    document: Value,
    slot_pointer: String,
}

impl CardTemplate {
    /// Validate and wrap a template document.
    ///
    /// Fails if `slot_pointer` does not resolve to an array, or if a semantic
    /// identifier is used by more than one text input.
    pub fn from_value(document: Value, slot_pointer: impl Into<String>) -> Result<Self> {
        let slot_pointer = slot_pointer.into();
        let slots = document
            .pointer(&slot_pointer)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CardBotError::Template(format!("{slot_pointer} does not point to a slot array"))
            })?;

        let mut seen = HashSet::new();
        for slot in slots {
            if let SlotKind::TextInput(id) = SlotKind::of(slot) {
                if matches!(id, SlotId::Unrecognized(_)) {
                    continue;
                }
                if !seen.insert(id.clone()) {
                    return Err(CardBotError::Template(format!(
                        "slot id {} appears more than once",
                        id.as_str()
                    )));
                }
            }
        }
        for id in SlotId::KNOWN.iter().filter(|id| !seen.contains(*id)) {
            warn!(slot = id.as_str(), "Card template has no slot for this field");
        }

        Ok(Self {
            document,
            slot_pointer,
        })
    }

    pub fn from_json_str(raw: &str, slot_pointer: impl Into<String>) -> Result<Self> {
        let document = serde_json::from_str(raw)
            .map_err(|e| CardBotError::Template(format!("invalid template JSON: {e}")))?;
        Self::from_value(document, slot_pointer)
    }

    /// Load a template file from disk.
    pub async fn from_path(path: &Path, slot_pointer: impl Into<String>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| CardBotError::Template(format!("{}: {e}", path.display())))?;
        let template = Self::from_json_str(&raw, slot_pointer)?;
        info!(path = %path.display(), "Loaded card template");
        Ok(template)
    }

    /// The business card layout shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_TEMPLATE, DEFAULT_SLOT_POINTER)
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn slot_pointer(&self) -> &str {
        &self.slot_pointer
    }

    /// Classified slots, in template order.
    pub fn slots(&self) -> Vec<SlotKind> {
        self.document
            .pointer(&self.slot_pointer)
            .and_then(Value::as_array)
            .map(|slots| slots.iter().map(SlotKind::of).collect())
            .unwrap_or_default()
    }

    /// A deep copy of the document for one assembly.
    pub(crate) fn instantiate(&self) -> Value {
        self.document.clone()
    }
}
