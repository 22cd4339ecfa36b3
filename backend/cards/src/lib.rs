//! Business card rendering: template loading, slot filling and reply composition.

pub mod assembler;
pub mod composer;
pub mod slot;
pub mod template;

pub use assembler::{assemble, AssembledCard, TELEPHONE_PLACEHOLDER};
pub use composer::{compose_card_reply, compose_not_saved, compose_recognition_failed};
pub use slot::{SlotId, SlotKind};
pub use template::{CardTemplate, DEFAULT_SLOT_POINTER};
