//! Structured Logger
//!
//! Wraps `tracing` with a console layer, a daily-rolling NDJSON file and
//! environment-based level control.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file prefix; files are named `cardbot.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "cardbot.log";

/// Initialize the global structured logger.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless:
/// the second install is ignored.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir.as_ref())?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
    Ok(())
}

/// Console-only logger for one-shot commands.
pub fn init_console_logger(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("logs");
        init_logger(&dir, "debug").unwrap();
        assert!(dir.is_dir());
    }
}
