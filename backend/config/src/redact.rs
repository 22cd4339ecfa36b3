//! Config redaction: produce safe-to-log config snapshots by masking secrets.
//!
//! Masks secret-named keys and credential query parameters in URLs such as
//! `?code=<function key>`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SECRET_KEYS: &[&str] = &[
    "apiKey",
    "api_key",
    "functionKey",
    "function_key",
    "token",
    "secret",
    "password",
];

/// Credential-bearing query parameters.
static SECRET_QUERY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([?&](?:code|key|sig|token|api_key)=)[^&#]*").unwrap());

/// Redact a config JSON value, replacing secrets with `***`.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

/// Mask credential query parameters in a single URL.
pub fn redact_url(url: &str) -> String {
    SECRET_QUERY.replace_all(url, "${1}***").into_owned()
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_secret_key(key) && !s.is_empty() => Value::String("***".into()),
        Value::String(s) => Value::String(redact_url(s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}
