//! Error types for the Giphy client.
//!
//! # Design
//! Argument problems are reported before any request leaves the process, so
//! `InvalidArgument` never implies network traffic. Every status other than
//! 200 lands in `HttpError` with the raw body. `Interrupted` is kept apart from
//! `Transport` so callers can tell a cancelled call from a failed one.

use std::error::Error;
use std::io;

/// Errors returned by `GiphyClient` and its building blocks.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A caller-supplied parameter violates a documented constraint.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered with a status other than 200.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The call timed out or was interrupted while in flight.
    #[error("request interrupted: {0}")]
    Interrupted(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn Error + Send + Sync>),

    /// The response body is not valid JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The body is JSON but not shaped like a Giphy envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Environment configuration could not be read.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),
}

impl ApiError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ApiError::InvalidArgument(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ApiError::MalformedResponse(msg.into())
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        let interrupted = match &err {
            ureq::Error::Timeout(_) => true,
            ureq::Error::Io(e) => e.kind() == io::ErrorKind::Interrupted,
            _ => false,
        };
        if interrupted {
            ApiError::Interrupted(err.to_string())
        } else {
            ApiError::Transport(Box::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status_and_body() {
        let err = ApiError::HttpError {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: not found");
    }

    #[test]
    fn io_interrupted_maps_to_interrupted() {
        let err: ApiError = ureq::Error::Io(io::Error::from(io::ErrorKind::Interrupted)).into();
        assert!(matches!(err, ApiError::Interrupted(_)));
    }

    #[test]
    fn other_io_errors_map_to_transport() {
        let err: ApiError = ureq::Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused)).into();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.source().is_some());
    }
}
