//! Error types surfaced by clients and by the adapter itself

use std::fmt;
use thiserror::Error;

/// An error reply surfaced by a client operation.
///
/// Mirrors the shape the production client gives its reply errors: an optional
/// machine-readable code plus a human-readable message. Different transport
/// layers surface a MOVED redirect through either field, so both are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyError {
    pub code: Option<String>,
    pub message: String,
}

impl ReplyError {
    pub fn new(message: impl Into<String>) -> Self {
        ReplyError { code: None, message: message.into() }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        ReplyError { code: Some(code.into()), message: message.into() }
    }
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} - {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ReplyError {}

/// Failures produced by the adapter layer itself.
///
/// Underlying transport errors are never wrapped in these; they pass through
/// to callers as [`ReplyError`] via callback or event.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The relocation parser was handed an error that is not a MOVED redirect.
    /// Callers must check `is_moved_error` first.
    #[error("unexpected redis mock client \"moved\" reply error - {0}")]
    NotMovedError(String),

    /// The trailing token of a MOVED message carried no `host:port` separator.
    #[error("malformed MOVED target in reply error - {0}")]
    MalformedMovedTarget(String),
}
