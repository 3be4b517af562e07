use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(#[from] hypr_explanation::MalformedResponse),
}

impl Error {
    pub(crate) fn from_http(err: hypr_http::Error) -> Self {
        match err.downcast::<hypr_http::StatusError>() {
            Ok(status) => Self::Transport {
                status: status.status,
                body: status.body,
            },
            Err(other) => Self::Http(other),
        }
    }
}
