//! Error types

use thiserror::Error;

/// Why generation produced no usable message. Always absorbed by the
/// orchestrator into a fallback.
#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("generation credential not configured")]
    MissingCredential,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation service returned status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("reply had no usable support message")]
    EmptyReply,
}

/// Errors surfaced to HTTP callers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
}
