//! Collaborator error model.

use thiserror::Error;

/// Result type returned by external collaborators (user directory, menu catalog).
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by an external collaborator.
///
/// The access core never retries on these; it only decides how a failure
/// converges into a classification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached (network, pool exhaustion, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered, but the payload could not be interpreted.
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}
