//! Error Types
//!
//! Failures that cross the backend boundary. Authorization rule
//! violations are not errors; see [`crate::domain::Outcome`].

use thiserror::Error;

/// Common result type for backend-facing operations
pub type TodoResult<T> = Result<T, TodoError>;

/// Backend-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// A create/update/delete/query against the document store failed
    #[error("Store error: {0}")]
    Store(String),
    /// The identity provider rejected or aborted a sign-in/sign-out
    #[error("Auth error: {0}")]
    Auth(String),
    /// A document could not be decoded into a todo item
    #[error("Decode error: {0}")]
    Decode(String),
    /// The referenced document does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl TodoError {
    /// Whether retrying the same action can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, TodoError::Store(_) | TodoError::Auth(_))
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(err: serde_json::Error) -> Self {
        TodoError::Decode(err.to_string())
    }
}
