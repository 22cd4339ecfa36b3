use thiserror::Error;

/// Top-level error type for the card bot pipeline.
#[derive(Debug, Error)]
pub enum CardBotError {
    #[error("attachment download failed ({url}): {message}")]
    Fetch { url: String, message: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("malformed buffer payload: {0}")]
    BufferRepair(String),

    #[error("recognition service error: {0}")]
    Recognition(String),

    #[error("card template error: {0}")]
    Template(String),

    #[error("reply channel closed: {0}")]
    ChannelClosed(String),
}

pub type Result<T> = std::result::Result<T, CardBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_the_url() {
        let err = CardBotError::Fetch {
            url: "http://cdn.example.net/card1.png".into(),
            message: "404 Not Found".into(),
        };
        assert_eq!(
            err.to_string(),
            "attachment download failed (http://cdn.example.net/card1.png): 404 Not Found"
        );
    }
}
