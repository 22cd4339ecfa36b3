use anyhow::Result;
use reqwest::Url;

use cardbot_config::CardBotConfig;
use cardbot_core::{reply_channel, AttachmentDescriptor};

use crate::runtime::build_pipeline;

/// Run one turn over `urls` and print each reply as JSON.
pub async fn run(config: &CardBotConfig, urls: &[String]) -> Result<()> {
    let pipeline = build_pipeline(config).await?;
    let attachments: Vec<_> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| AttachmentDescriptor::new(file_name_for(url, i), url.clone()))
        .collect();

    let (sink, mut rx) = reply_channel();
    let printer = tokio::spawn(async move {
        while let Some(reply) = rx.recv().await {
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Ok::<_, anyhow::Error>(())
    });

    pipeline.handle_attachments(&attachments, &sink).await?;
    drop(sink);
    printer.await??;
    Ok(())
}

/// Last path segment of the URL, or a numbered fallback.
fn file_name_for(url: &str, index: usize) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("attachment-{index}"))
}
