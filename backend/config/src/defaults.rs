//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{
    CardBotConfig, LoggingConfig, ServerConfig, StorageConfig, TemplateConfig,
};

/// Images directory, relative to the working directory.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Slot array of the built-in business card layout.
pub use cardbot_cards::DEFAULT_SLOT_POINTER;

pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Conventional Bot Framework port.
pub const DEFAULT_PORT: u16 = 3978;

pub const DEFAULT_WEBHOOK_PATH: &str = "/api/messages";

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: CardBotConfig) -> CardBotConfig {
    let config = apply_storage_defaults(config);
    let config = apply_template_defaults(config);
    let config = apply_server_defaults(config);
    apply_logging_defaults(config)
}

fn apply_storage_defaults(mut config: CardBotConfig) -> CardBotConfig {
    let storage = config.storage.get_or_insert_with(StorageConfig::default);
    storage
        .images_dir
        .get_or_insert_with(|| DEFAULT_IMAGES_DIR.to_string());
    config
}

fn apply_template_defaults(mut config: CardBotConfig) -> CardBotConfig {
    let template = config.template.get_or_insert_with(TemplateConfig::default);
    template
        .slot_pointer
        .get_or_insert_with(|| DEFAULT_SLOT_POINTER.to_string());
    config
}

fn apply_server_defaults(mut config: CardBotConfig) -> CardBotConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server
        .webhook_path
        .get_or_insert_with(|| DEFAULT_WEBHOOK_PATH.to_string());
    config
}

fn apply_logging_defaults(mut config: CardBotConfig) -> CardBotConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.dir.get_or_insert_with(|| DEFAULT_LOG_DIR.to_string());
    config
}
