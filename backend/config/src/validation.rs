//! Config validation: schema checks with user-friendly error messages.

use crate::schema::CardBotConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &CardBotConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_recognition(config, &mut report);
    validate_storage(config, &mut report);
    validate_template(config, &mut report);
    validate_server(config, &mut report);
    report
}

fn validate_recognition(config: &CardBotConfig, report: &mut ValidationReport) {
    match config.recognition_endpoint().map(str::trim) {
        None | Some("") => report.error(
            "recognition.endpoint",
            "Recognition endpoint is required (or set CARDBOT_RECOGNITION_URL)",
        ),
        Some(url) if url.starts_with("http://") => report.warn(
            "recognition.endpoint",
            "Endpoint is not HTTPS; card images will be sent in clear text",
        ),
        Some(url) if !url.starts_with("https://") => {
            report.error("recognition.endpoint", format!("'{url}' is not an http(s) URL"))
        }
        Some(_) => {}
    }
}

fn validate_storage(config: &CardBotConfig, report: &mut ValidationReport) {
    if config.images_dir().trim().is_empty() {
        report.error("storage.imagesDir", "Images directory cannot be empty");
    }
}

fn validate_template(config: &CardBotConfig, report: &mut ValidationReport) {
    let pointer = config.slot_pointer();
    if !pointer.is_empty() && !pointer.starts_with('/') {
        report.error(
            "template.slotPointer",
            format!("'{pointer}' is not a JSON pointer (must start with '/')"),
        );
    }
    if let Some(path) = config.template_path() {
        if !path.ends_with(".json") {
            report.warn("template.path", "Template file is expected to be JSON");
        }
    }
}

fn validate_server(config: &CardBotConfig, report: &mut ValidationReport) {
    let port = config.port();
    if port == 0 {
        report.error("server.port", "Port must be > 0");
    } else if port < 1024 && port != 80 && port != 443 {
        report.warn(
            "server.port",
            format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
        );
    }
    if !config.webhook_path().starts_with('/') {
        report.error("server.webhookPath", "Webhook path must start with '/'");
    }
}
