use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid usage: {0}")]
    Usage(String),

    #[error("Transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed (status {status}): {}", String::from_utf8_lossy(.body))]
    Http { status: u16, body: Bytes },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Stable label for the error kind
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::Usage(_) => "usage",
            ClientError::Transport(_) => "transport",
            ClientError::Http { .. } => "http",
            ClientError::Io(_) => "io",
            ClientError::Decode(_) => "decode",
            ClientError::Encode(_) => "encode",
            ClientError::Cancelled => "cancelled",
            ClientError::Config(_) => "config",
            ClientError::InvalidUrl(_) => "invalid_url",
        }
    }

    /// HTTP status returned by the server, if it answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn http(status: u16, body: Option<Bytes>) -> Self {
        ClientError::Http {
            status,
            body: body.unwrap_or_default(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
