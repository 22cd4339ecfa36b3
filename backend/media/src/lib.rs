//! Attachment ingestion: download user-sent files, undo JSON wrapping of
//! binary payloads, persist them and hand back a base64 copy.

pub mod batch;
pub mod buffer_repair;
pub mod fetch;
pub mod mime_detect;

pub use batch::fetch_all;
pub use buffer_repair::repair_json_payload;
pub use fetch::AttachmentFetcher;
pub use mime_detect::{is_image, is_json, media_type_essence};
