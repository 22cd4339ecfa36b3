//! Log Redaction Layer
//!
//! Scrubs function keys, bearer tokens and inline image data from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static QUERY_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([?&](?:code|key|sig|token)=)[^&\s#]+").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
static BASE64_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9+/]{120,}={0,2}").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = QUERY_KEY_RE.replace_all(input, "${1}[REDACTED]");
    let redacted = BEARER_RE.replace_all(&redacted, "Bearer [REDACTED_TOKEN]");
    let redacted = BASE64_RE.replace_all(&redacted, |caps: &regex::Captures| {
        format!("[BASE64 {} chars]", caps[0].len())
    });
    redacted.into_owned()
}
