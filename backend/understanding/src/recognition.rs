/// Business card recognition over the external OCR endpoint.
///
/// One POST per image, body `{"image": "<base64>"}`. The JSON reply is read
/// without shape validation: string fields that are present are kept, anything
/// else is treated as absent.
use async_trait::async_trait;
use cardbot_core::{CardBotError, RecognizedCardFields, Recognizer, Result};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Serialize)]
struct RecognitionRequest<'a> {
    image: &'a str,
}

pub struct RecognitionClient {
    http: Client,
    endpoint: String,
}

impl RecognitionClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint with the query string (function key) removed, for logs.
    pub fn display_endpoint(&self) -> String {
        match Url::parse(&self.endpoint) {
            Ok(mut url) => {
                url.set_query(None);
                url.to_string()
            }
            Err(_) => "<invalid endpoint>".to_string(),
        }
    }
}

#[async_trait]
impl Recognizer for RecognitionClient {
    fn name(&self) -> &str {
        "business-card-ocr"
    }

    async fn recognize(&self, base64_image: &str) -> Result<RecognizedCardFields> {
        info!(endpoint = %self.display_endpoint(), image_len = base64_image.len(), "[Recognition] Sending card image");

        // The status code is not inspected: error bodies are parsed like any other.
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&RecognitionRequest { image: base64_image })
            .send()
            .await
            .map_err(|e| CardBotError::Recognition(e.to_string()))?;
        let status = resp.status();
        let json: Value = resp
            .json()
            .await
            .map_err(|e| CardBotError::Recognition(format!("{status}: {e}")))?;

        let fields = fields_from_json(&json);
        debug!(%status, ?fields, "[Recognition] Parsed response");
        Ok(fields)
    }
}

/// Pick the contact fields out of a recognition response.
pub fn fields_from_json(json: &Value) -> RecognizedCardFields {
    let field = |key: &str| json.get(key).and_then(Value::as_str).map(str::to_string);
    RecognizedCardFields {
        name: field("name"),
        email: field("email"),
        organization: field("organization"),
        website: field("website"),
    }
}
