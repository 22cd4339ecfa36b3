//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time
//!   (uppercase `[A-Z_][A-Z0-9_]*` names only; `$${VAR}` is a literal `${VAR}`).
//! - `CARDBOT_*` variables that override individual settings.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{CardBotConfig, LoggingConfig, RecognitionConfig, ServerConfig, StorageConfig};

/// Matches `${VAR}` with an optional leading `$` escape.
static ENV_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const RECOGNITION_URL_VAR: &str = "CARDBOT_RECOGNITION_URL";
pub const IMAGES_DIR_VAR: &str = "CARDBOT_IMAGES_DIR";
pub const PORT_VAR: &str = "CARDBOT_PORT";
pub const LOG_LEVEL_VAR: &str = "CARDBOT_LOG_LEVEL";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references using the given environment.
///
/// Every string leaf of the tree is processed. An unset or empty variable is
/// an error naming the config path it was referenced from.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute(value, env, "")
}

fn substitute(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(substitute_str(s, env, path)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| substitute(v, env, &format!("{path}[{i}]")))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute(v, env, &child)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute_str(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<String> = None;
    let out = ENV_REF.replace_all(s, |caps: &Captures| {
        let whole = &caps[0];
        let name = &caps[1];
        if whole.starts_with("$$") {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    if let Some(var_name) = missing {
        bail!(MissingEnvVarError {
            var_name,
            config_path: path.to_string(),
        });
    }
    Ok(out.into_owned())
}

/// Apply `CARDBOT_*` overrides on top of the file config.
pub fn apply_env_overrides(mut config: CardBotConfig, env: &HashMap<String, String>) -> CardBotConfig {
    let get = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

    if let Some(url) = get(RECOGNITION_URL_VAR) {
        config
            .recognition
            .get_or_insert_with(RecognitionConfig::default)
            .endpoint = Some(url);
    }
    if let Some(dir) = get(IMAGES_DIR_VAR) {
        config.storage.get_or_insert_with(StorageConfig::default).images_dir = Some(dir);
    }
    if let Some(port) = get(PORT_VAR).and_then(|p| p.parse().ok()) {
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }
    if let Some(level) = get(LOG_LEVEL_VAR) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    config
}
