//! Card bot configuration schema, typed for serde YAML/JSON deserialization.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration (`config.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBotConfig {
    /// Where downloaded attachments are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    /// External business card recognition service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognition: Option<RecognitionConfig>,

    /// Card template used for replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateConfig>,

    /// Webhook server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    /// Full endpoint URL, including any function key query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Adaptive Card JSON file; the built-in card is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// JSON pointer to the slot array inside the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_pointer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Route that receives inbound messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON log files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved accessors (valid after defaults are applied)
// ---------------------------------------------------------------------------

impl CardBotConfig {
    pub fn images_dir(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|s| s.images_dir.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_IMAGES_DIR)
    }

    pub fn recognition_endpoint(&self) -> Option<&str> {
        self.recognition.as_ref().and_then(|r| r.endpoint.as_deref())
    }

    pub fn template_path(&self) -> Option<&str> {
        self.template.as_ref().and_then(|t| t.path.as_deref())
    }

    pub fn slot_pointer(&self) -> &str {
        self.template
            .as_ref()
            .and_then(|t| t.slot_pointer.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_SLOT_POINTER)
    }

    pub fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(crate::defaults::DEFAULT_PORT)
    }

    pub fn webhook_path(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.webhook_path.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_WEBHOOK_PATH)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_DIR)
    }
}
