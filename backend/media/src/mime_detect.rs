//! Content-type helpers for downloaded attachments.
//!
//! The fetcher decides how to interpret a payload from the transport's
//! `Content-Type` header, not from the attachment's file name.

/// Strip parameters (`; charset=...`) and normalise case.
pub fn media_type_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Whether the transport labelled the payload as JSON.
pub fn is_json(content_type: &str) -> bool {
    media_type_essence(content_type) == "application/json"
}

/// Whether a MIME type is for an image.
pub fn is_image(content_type: &str) -> bool {
    media_type_essence(content_type).starts_with("image/")
}
