//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Server answered with `success: false`; the message is surfaced verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizSubmitService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSubmitError {
    /// A submission is already outstanding; callers drop this silently.
    #[error("a quiz submission is already in flight")]
    InFlight,
    /// Rejected locally before any network call.
    #[error("{missing} question(s) still unanswered")]
    Unanswered { missing: usize },
    #[error(transparent)]
    Api(#[from] ApiError),
}
