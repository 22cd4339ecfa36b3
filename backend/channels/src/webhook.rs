/// Generic HTTP webhook channel.
///
/// Inbound: HTTP POST on the configured path with `{ "attachments": [...] }`
/// Outbound: the turn's replies in the response body, `{ "replies": [...] }`
use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use cardbot_core::{AttachmentDescriptor, OutboundMessage};
use cardbot_pipeline::CardPipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::collect::CollectingSink;
use crate::ChannelAdapter;

/// Reply to a message that carries no attachments.
pub const NO_ATTACHMENT_TEXT: &str = "Send me a business card and I will recognize it.";

pub struct WebhookConfig {
    pub webhook_path: String,
}

pub struct WebhookAdapter {
    config: WebhookConfig,
    pipeline: Arc<CardPipeline>,
}

impl WebhookAdapter {
    pub fn new(config: WebhookConfig, pipeline: Arc<CardPipeline>) -> Self {
        Self { config, pipeline }
    }
}

#[derive(Clone)]
struct AppState {
    pipeline: Arc<CardPipeline>,
}

#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub attachments: Vec<AttachmentDescriptor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub replies: Vec<OutboundMessage>,
}

async fn webhook_handler(
    State(state): State<AppState>,
    Json(inbound): Json<InboundMessage>,
) -> Response {
    if inbound.attachments.is_empty() {
        info!("[Webhook] Message without attachments");
        let replies = vec![OutboundMessage::text(NO_ATTACHMENT_TEXT)];
        return Json(WebhookResponse { replies }).into_response();
    }

    info!(count = inbound.attachments.len(), "[Webhook] Message with attachments");
    let sink = CollectingSink::new();
    match state.pipeline.handle_attachments(&inbound.attachments, &sink).await {
        Ok(_) => Json(WebhookResponse { replies: sink.into_replies() }).into_response(),
        Err(e) => {
            error!(error = %e, "[Webhook] Turn failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Turn failed").into_response()
        }
    }
}

#[async_trait]
impl ChannelAdapter for WebhookAdapter {
    fn name(&self) -> &str {
        "webhook"
    }

    fn build_router(&self) -> Router {
        let state = AppState { pipeline: Arc::clone(&self.pipeline) };
        Router::new()
            .route(&self.config.webhook_path, post(webhook_handler))
            .with_state(state)
    }

    /// Nothing runs in the background; the route is checked before it is mounted.
    async fn start(&self) -> Result<()> {
        let path = &self.config.webhook_path;
        if !path.starts_with('/') || path.contains(char::is_whitespace) {
            bail!("[Webhook] Invalid webhook path {path:?}");
        }
        info!("[Webhook] Adapter ready at {}", path);
        Ok(())
    }
}
