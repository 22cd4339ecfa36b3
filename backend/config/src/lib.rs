//! `cardbot-config` — card bot runtime configuration.
//!
//! Provides:
//! - Typed config schema (storage, recognition, template, server, logging)
//! - YAML loading from `~/.cardbot/config.yaml` or `CARDBOT_CONFIG_DIR`
//! - `${ENV_VAR}` substitution and `CARDBOT_*` overrides
//! - Default value application
//! - Validation with errors and warnings
//! - Redaction for safe logging

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_raw};
pub use redact::{redact, redact_url};
pub use schema::CardBotConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply overrides and defaults, then validate.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<CardBotConfig> {
    load_and_prepare_with(path, &std::env::vars().collect()).await
}

/// [`load_and_prepare`] with an explicit environment.
pub async fn load_and_prepare_with(
    path: &Path,
    env: &HashMap<String, String>,
) -> Result<CardBotConfig> {
    let value = io::load_raw(path).await?;
    let value = resolve_env_vars_with(&value, env)
        .with_context(|| format!("Failed to resolve env vars in {}", path.display()))?;

    let config: CardBotConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;
    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!(
            "{} config error(s); first: {}",
            report.errors.len(),
            report.errors[0]
        );
    }

    Ok(config)
}
