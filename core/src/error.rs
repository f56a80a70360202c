//! Error types for the notes API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! resource does not exist" from every other failure. Remaining non-2xx
//! responses are split by status class and keep the raw status and body.

/// Errors returned by request building, transports and response parsing.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a 4xx other than 404, typically a rejected payload.
    #[error("request rejected with HTTP {status}: {body}")]
    Validation { status: u16, body: String },

    /// The server returned a 5xx.
    #[error("server error HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// A non-2xx status outside the 4xx and 5xx classes.
    #[error("unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("encoding request failed: {0}")]
    Serialization(String),

    /// The id cannot be used as a single path segment.
    #[error("invalid resource id {0:?}")]
    InvalidId(String),

    /// The configured base URL cannot be extended with path segments.
    #[error("invalid base URL {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            404 => ApiError::NotFound,
            400..=499 => ApiError::Validation { status, body },
            500..=599 => ApiError::Server { status, body },
            _ => ApiError::UnexpectedStatus { status, body },
        }
    }
}
