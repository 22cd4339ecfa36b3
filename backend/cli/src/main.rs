mod runtime;
mod scan_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use cardbot_channels::{ChannelAdapter, WebhookAdapter, WebhookConfig};
use cardbot_config::CardBotConfig;

#[derive(Parser)]
#[command(name = "cardbot")]
#[command(about = "Business card bot: photo in, contact card out")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.cardbot/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Recognize business cards from image URLs and print the replies
    Scan {
        /// Image URLs, one attachment each
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print the effective configuration with secrets masked
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| cardbot_config::config_file_path(&cardbot_config::config_dir()));
    let config = cardbot_config::load_and_prepare(&config_path).await?;

    match cli.command {
        Commands::Serve { port } => {
            cardbot_logging::init_logger(config.log_dir(), config.log_level())?;
            run_server(config, port).await?;
        }
        Commands::Scan { urls } => {
            cardbot_logging::init_console_logger(config.log_level());
            scan_cmd::run(&config, &urls).await?;
        }
        Commands::ShowConfig => {
            let redacted = cardbot_config::redact(&serde_json::to_value(&config)?);
            println!("{}", serde_json::to_string_pretty(&redacted)?);
        }
    }

    Ok(())
}

async fn run_server(config: CardBotConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port());
    info!(port, bind = %config.bind_address(), images = %config.images_dir(), "Starting card bot");

    let pipeline = Arc::new(runtime::build_pipeline(&config).await?);

    let adapter = WebhookAdapter::new(
        WebhookConfig {
            webhook_path: config.webhook_path().to_string(),
        },
        pipeline,
    );
    adapter.start().await?;
    info!(adapter = adapter.name(), "Registered channel adapter");

    let app = adapter.build_router().layer(TraceLayer::new_for_http());
    let addr = format!("{}:{}", config.bind_address(), port);
    info!(addr = %addr, "HTTP webhook listening");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
