//! Batch download coordinator.

use cardbot_core::{AttachmentDescriptor, LocalAttachmentResult};
use futures::future::join_all;
use tracing::info;

use crate::fetch::AttachmentFetcher;

/// Fetch every attachment concurrently and wait for all of them.
///
/// The output is index-aligned with `attachments`; a failed fetch leaves
/// `None` in its slot and never cancels its siblings. Concurrency is not
/// bounded, batches from a chat channel are small.
pub async fn fetch_all(
    fetcher: &AttachmentFetcher,
    attachments: &[AttachmentDescriptor],
) -> Vec<Option<LocalAttachmentResult>> {
    let results = join_all(attachments.iter().map(|a| fetcher.fetch(a))).await;

    let saved = results.iter().filter(|r| r.is_some()).count();
    info!(total = attachments.len(), saved, "Attachment batch finished");
    results
}
