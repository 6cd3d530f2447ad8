//! Error types for the REST client core.
//!
//! # Design
//! Three kinds cover a request's failure modes: the server answered with a
//! non-2xx status (`HttpError`, carrying the raw status and body), the
//! transport never produced a response (`NetworkError`), or the body did not
//! decode into the expected shape (`DecodeError`). None of them are
//! translated as they move from the executor up through the paginated
//! collector and the endpoint wrappers.

use thiserror::Error;

/// Errors returned by the executor, the collector, and endpoint wrappers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a status outside 200..=299.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The connection could not be established, timed out, or the body
    /// could not be read.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body is not valid JSON or does not match the expected type.
    #[error("decode failed: {0}")]
    DecodeError(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The server kept returning a cursor past the caller's page limit.
    #[error("pagination did not finish within {pages} pages")]
    PageLimitExceeded { pages: usize },
}

impl ApiError {
    /// HTTP status for `HttpError`, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
