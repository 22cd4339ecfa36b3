use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cardbot_cards::CardTemplate;
use cardbot_config::CardBotConfig;
use cardbot_logging::redact_sensitive_data;
use cardbot_media::AttachmentFetcher;
use cardbot_pipeline::CardPipeline;
use cardbot_understanding::RecognitionClient;

/// Wire the fetcher, recognizer and template described by `config`.
pub async fn build_pipeline(config: &CardBotConfig) -> Result<CardPipeline> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("cardbot/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let fetcher = AttachmentFetcher::new(http.clone(), config.images_dir());
    fetcher.ensure_images_dir().await?;

    let endpoint = config
        .recognition_endpoint()
        .context("recognition.endpoint is not configured")?;
    info!(endpoint = %redact_sensitive_data(endpoint), "Using recognition service");
    let recognizer = RecognitionClient::new(http, endpoint);

    let template = match config.template_path() {
        Some(path) => CardTemplate::from_path(Path::new(path), config.slot_pointer()).await?,
        None => CardTemplate::builtin()?,
    };

    Ok(CardPipeline::new(fetcher, Arc::new(recognizer), Arc::new(template)))
}
