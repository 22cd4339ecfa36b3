//! Attachment fetcher: download, repair, persist, encode.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use cardbot_core::{AttachmentDescriptor, CardBotError, LocalAttachmentResult, Result};
use reqwest::{header::CONTENT_TYPE, Client};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::buffer_repair::repair_json_payload;
use crate::mime_detect::{is_image, is_json};

/// Downloads attachments and stores them under a fixed images directory.
#[derive(Clone)]
pub struct AttachmentFetcher {
    http: Client,
    images_dir: PathBuf,
}

impl AttachmentFetcher {
    pub fn new(http: Client, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            images_dir: images_dir.into(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Create the images directory if it does not exist yet.
    pub async fn ensure_images_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.images_dir).await.map_err(|e| {
            CardBotError::Storage(format!("{}: {e}", self.images_dir.display()))
        })
    }

    /// Where an attachment with this declared name is stored.
    ///
    /// No extension inference and no collision handling: the same name always
    /// maps to the same path and a later write replaces an earlier one.
    pub fn local_path_for(&self, name: &str) -> PathBuf {
        self.images_dir.join(name)
    }

    /// Fetch and persist one attachment.
    ///
    /// Download and write failures are logged and reported as `None`.
    pub async fn fetch(&self, attachment: &AttachmentDescriptor) -> Option<LocalAttachmentResult> {
        match self.try_fetch(attachment).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(name = %attachment.name, url = %attachment.content_url, error = %e, "Attachment was not saved");
                None
            }
        }
    }

    /// Same as [`fetch`](Self::fetch) but keeps the failure reason.
    pub async fn try_fetch(&self, attachment: &AttachmentDescriptor) -> Result<LocalAttachmentResult> {
        check_file_name(&attachment.name)?;
        if let Some(declared) = attachment.content_type.as_deref() {
            if !is_image(declared) {
                debug!(name = %attachment.name, declared, "Attachment is not declared as an image");
            }
        }

        let (raw, content_type) = self.download(&attachment.content_url).await?;
        let bytes = match content_type.as_deref() {
            Some(ct) if is_json(ct) => repair_json_payload(&raw)?,
            _ => raw,
        };

        let base64_content = STANDARD.encode(&bytes);
        let local_path = self.local_path_for(&attachment.name);
        fs::write(&local_path, &bytes)
            .await
            .map_err(|e| CardBotError::Storage(format!("{}: {e}", local_path.display())))?;

        info!(
            name = %attachment.name,
            bytes = bytes.len(),
            path = %local_path.display(),
            "Attachment saved"
        );
        Ok(LocalAttachmentResult {
            file_name: attachment.name.clone(),
            local_path,
            base64_content,
        })
    }

    /// GET the attachment as raw bytes; never text-decoded.
    async fn download(&self, url: &str) -> Result<(Bytes, Option<String>)> {
        let fetch_err = |message: String| CardBotError::Fetch {
            url: url.to_string(),
            message,
        };

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?
            .error_for_status()
            .map_err(|e| fetch_err(e.to_string()))?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await.map_err(|e| fetch_err(e.to_string()))?;
        Ok((body, content_type))
    }
}

/// Reject names that would escape the images directory.
///
/// The name must be a single normal path component; dots inside a name
/// (`john..smith.png`) are fine.
fn check_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal || name.contains('/') || name.contains('\\') {
        return Err(CardBotError::Storage(format!("unsafe attachment name: {name:?}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    fn fetcher(dir: &TempDir) -> AttachmentFetcher {
        AttachmentFetcher::new(Client::new(), dir.path())
    }

    #[tokio::test]
    async fn saves_binary_and_encodes_same_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/card1.png"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_HEADER, "image/png"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let attachment = AttachmentDescriptor::new("card1.png", format!("{}/card1.png", server.uri()))
            .with_content_type("image/png");
        let result = fetcher(&dir).fetch(&attachment).await.unwrap();

        assert_eq!(result.file_name, "card1.png");
        assert_eq!(result.local_path, dir.path().join("card1.png"));
        let on_disk = std::fs::read(&result.local_path).unwrap();
        assert_eq!(on_disk, PNG_HEADER);
        assert_eq!(STANDARD.decode(&result.base64_content).unwrap(), on_disk);
    }

    #[tokio::test]
    async fn json_buffer_payload_is_persisted_as_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wrapped"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"type":"Buffer","data":[1,2,3]}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let attachment = AttachmentDescriptor::new("wrapped.bin", format!("{}/wrapped", server.uri()));
        let result = fetcher(&dir).fetch(&attachment).await.unwrap();

        assert_eq!(std::fs::read(&result.local_path).unwrap(), vec![1u8, 2, 3]);
        assert_eq!(STANDARD.decode(&result.base64_content).unwrap(), vec![1u8, 2, 3]);
    }

    #[tokio::test]
    async fn buffer_shaped_body_without_json_label_is_kept_verbatim() {
        let body = r#"{"type":"Buffer","data":[1,2,3]}"#;
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/plain"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let attachment = AttachmentDescriptor::new("note.txt", server.uri());
        let result = fetcher(&dir).fetch(&attachment).await.unwrap();
        assert_eq!(std::fs::read(&result.local_path).unwrap(), body.as_bytes());
    }

    #[tokio::test]
    async fn http_error_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let attachment = AttachmentDescriptor::new("missing.png", format!("{}/missing.png", server.uri()));
        assert!(fetcher(&dir).fetch(&attachment).await.is_none());
        assert!(!dir.path().join("missing.png").exists());
    }

    #[tokio::test]
    async fn write_failure_yields_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_HEADER, "image/png"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let fetcher = AttachmentFetcher::new(Client::new(), dir.path().join("does-not-exist"));
        let attachment = AttachmentDescriptor::new("card.png", server.uri());
        assert!(fetcher.fetch(&attachment).await.is_none());
    }

    #[tokio::test]
    async fn same_name_overwrites_previous_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/first"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8], "image/png"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/second"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![2u8, 2], "image/png"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let fetcher = fetcher(&dir);
        let first = AttachmentDescriptor::new("card.png", format!("{}/first", server.uri()));
        let second = AttachmentDescriptor::new("card.png", format!("{}/second", server.uri()));
        fetcher.fetch(&first).await.unwrap();
        let result = fetcher.fetch(&second).await.unwrap();
        assert_eq!(std::fs::read(result.local_path).unwrap(), vec![2u8, 2]);
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let fetcher = fetcher(&dir);
        for name in ["../escape.png", "..", ".", "", "a/b.png", "a\\b.png", "/etc/passwd"] {
            let attachment = AttachmentDescriptor::new(name, "http://127.0.0.1:1/escape.png");
            let err = fetcher.try_fetch(&attachment).await.unwrap_err();
            assert!(matches!(err, CardBotError::Storage(_)), "{name:?} was accepted");
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn success_log_carries_name_bytes_and_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_HEADER, "image/png"))
            .mount(&server)
            .await;

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = TempDir::new().unwrap();
        let attachment = AttachmentDescriptor::new("card1.png", format!("{}/card1.png", server.uri()));
        fetcher(&dir).fetch(&attachment).await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let line = output
            .lines()
            .find(|l| l.contains("Attachment saved"))
            .unwrap();
        assert!(line.contains("name=card1.png"), "{line}");
        assert!(line.contains(&format!("bytes={}", PNG_HEADER.len())), "{line}");
        assert!(line.contains("path="), "{line}");
    }

    #[tokio::test]
    async fn double_dot_inside_name_is_saved_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_HEADER, "image/png"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let attachment = AttachmentDescriptor::new("john..smith.png", format!("{}/card", server.uri()));
        let result = fetcher(&dir).try_fetch(&attachment).await.unwrap();
        assert_eq!(result.local_path, dir.path().join("john..smith.png"));
        assert_eq!(std::fs::read(&result.local_path).unwrap(), PNG_HEADER);
    }

    #[tokio::test]
    async fn ensure_images_dir_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let fetcher = AttachmentFetcher::new(Client::new(), dir.path().join("a").join("images"));
        fetcher.ensure_images_dir().await.unwrap();
        assert!(fetcher.images_dir().is_dir());
    }
}
