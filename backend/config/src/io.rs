//! Config file location and loading.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the config directory.
/// Priority: `CARDBOT_CONFIG_DIR` env > `~/.cardbot/` > `./.cardbot`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CARDBOT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".cardbot"))
        .unwrap_or_else(|| PathBuf::from(".cardbot"))
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the config file as a JSON value tree.
///
/// Returns an empty object if the file doesn't exist (first run).
pub async fn load_raw(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let yaml: serde_yaml::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
    let value = match yaml {
        serde_yaml::Value::Null => serde_json::Value::Object(Default::default()),
        other => serde_json::to_value(other)
            .with_context(|| format!("Config at {} is not JSON-compatible", path.display()))?,
    };

    info!(path = %path.display(), "Loaded config");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_is_empty_object() {
        let dir = TempDir::new().unwrap();
        let value = load_raw(&config_file_path(dir.path())).await.unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[tokio::test]
    async fn empty_file_is_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "").unwrap();
        assert_eq!(load_raw(&path).await.unwrap(), serde_json::json!({}));
    }

    #[tokio::test]
    async fn yaml_becomes_json_tree() {
        let dir = TempDir::new().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "server:\n  port: 8080\n").unwrap();
        let value = load_raw(&path).await.unwrap();
        assert_eq!(value["server"]["port"], 8080);
    }

    #[tokio::test]
    async fn invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "storage: [unclosed").unwrap();
        let err = load_raw(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
    }
}
