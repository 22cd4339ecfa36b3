use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata describing a user-sent file, as delivered by the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDescriptor {
    /// Declared file name. Used verbatim as the on-disk file name.
    pub name: String,
    /// Where the attachment bytes can be retrieved from.
    pub content_url: String,
    /// Content type declared by the channel, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl AttachmentDescriptor {
    pub fn new(name: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_url: content_url.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A successfully fetched and persisted attachment.
///
/// `base64_content` is always the encoding of exactly the bytes written to
/// `local_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAttachmentResult {
    pub file_name: String,
    pub local_path: PathBuf,
    pub base64_content: String,
}

/// Contact fields returned by the recognition service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedCardFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl RecognizedCardFields {
    /// True when the service returned nothing usable (every field absent or blank).
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.email, &self.organization, &self.website]
            .iter()
            .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}
