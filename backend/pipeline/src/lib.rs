//! Turn pipeline: attachments in, one reply per attachment out.
//!
//! fetch (all, concurrently) → recognize → assemble → compose → send.

use std::sync::Arc;

use cardbot_cards::{
    assemble, compose_card_reply, compose_not_saved, compose_recognition_failed, CardTemplate,
};
use cardbot_core::{
    AttachmentDescriptor, CardBotError, LocalAttachmentResult, OutboundMessage, Recognizer, ReplySink, Result,
};
use cardbot_media::{fetch_all, AttachmentFetcher};
use futures::future::join_all;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

pub struct CardPipeline {
    fetcher: AttachmentFetcher,
    recognizer: Arc<dyn Recognizer>,
    template: Arc<CardTemplate>,
}

impl CardPipeline {
    pub fn new(
        fetcher: AttachmentFetcher,
        recognizer: Arc<dyn Recognizer>,
        template: Arc<CardTemplate>,
    ) -> Self {
        Self {
            fetcher,
            recognizer,
            template,
        }
    }

    pub fn fetcher(&self) -> &AttachmentFetcher {
        &self.fetcher
    }

    /// Process every attachment of one inbound message and reply through `sink`.
    ///
    /// Exactly one reply is sent per attachment, in input order, whichever
    /// stage failed for it. Returns the number of replies sent.
    pub async fn handle_attachments(
        &self,
        attachments: &[AttachmentDescriptor],
        sink: &dyn ReplySink,
    ) -> Result<usize> {
        let span = info_span!("turn", turn_id = %Uuid::new_v4(), attachments = attachments.len());

        async move {
            let saved = fetch_all(&self.fetcher, attachments).await;
            let replies = join_all(saved.iter().map(|s| self.reply_for(s.as_ref()))).await;

            let count = replies.len();
            for reply in replies {
                sink.send(reply).await?;
            }
            info!(replies = count, "Turn complete");
            Ok::<_, CardBotError>(count)
        }
        .instrument(span)
        .await
    }

    /// Build the reply for one fetch result.
    pub async fn reply_for(&self, saved: Option<&LocalAttachmentResult>) -> OutboundMessage {
        let Some(saved) = saved else {
            return compose_not_saved();
        };

        match self.recognizer.recognize(&saved.base64_content).await {
            Ok(fields) => {
                // Inputs on the card stay editable, so a blank card is still useful.
                if fields.is_empty() {
                    warn!(file = %saved.file_name, "Recognition returned no contact fields");
                }
                let image_path = saved.local_path.to_string_lossy();
                compose_card_reply(assemble(&self.template, &fields, &image_path))
            }
            Err(e) => {
                error!(file = %saved.file_name, recognizer = self.recognizer.name(), error = %e, "Recognition failed");
                compose_recognition_failed()
            }
        }
    }
}
