//! Telemetry and structured logging for the card bot.
//!
//! Handles subscriber setup, JSON file rotation and log redaction.

pub mod logger;
pub mod redact;

pub use logger::{init_console_logger, init_logger};
pub use redact::redact_sensitive_data;
