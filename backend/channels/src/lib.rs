use async_trait::async_trait;

pub mod collect;
pub mod webhook;

pub use collect::CollectingSink;
pub use webhook::{WebhookAdapter, WebhookConfig};

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Build an optional Axum sub-router for inbound webhook endpoints.
    /// Adapters that use polling/long-connections return an empty router.
    fn build_router(&self) -> axum::Router {
        axum::Router::new()
    }

    /// Start the adapter's background work (polling loop, WS connection, etc.).
    /// Webhook adapters have no background work and only check their settings here.
    async fn start(&self) -> anyhow::Result<()>;
}
