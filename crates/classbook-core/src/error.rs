//! Error types shared across classbook.
//!
//! Store errors live here rather than in `classbook-client` so the
//! controller can log and classify failures from any `StudentStore`
//! implementation without string matching.

use thiserror::Error;

/// Errors that can occur when talking to the remote student store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A transport-level failure (connection refused, DNS, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The store answered with a non-success status.
    #[error("store error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Returns `true` for failures that never reached the store.
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Network(_) | StoreError::Timeout(_))
    }
}

/// Input rejected locally before any network call is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("average must be a number, got '{0}'")]
    InvalidAverage(String),
}

/// Statistics requested over a collection with no students.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no students to aggregate")]
    EmptyCollection,
}

/// Errors surfaced by the controller.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    /// The id is not present in the last fetched collection.
    #[error("no student with id {0}")]
    UnknownStudent(i64),

    #[error("no edit in progress")]
    NoEditSession,

    #[error("no deletion awaiting confirmation")]
    NoPendingDelete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification() {
        assert!(StoreError::Network("refused".into()).is_transport());
        assert!(StoreError::Timeout(30).is_transport());
        assert!(!StoreError::Api {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
        assert!(!StoreError::Decode("bad json".into()).is_transport());
    }

    #[test]
    fn client_error_is_transparent() {
        let err: ClientError = ValidationError::EmptyName.into();
        assert_eq!(err.to_string(), "name must not be empty");

        let err: ClientError = StoreError::Api {
            status: 404,
            message: "missing".into(),
        }
        .into();
        assert_eq!(err.to_string(), "store error (HTTP 404): missing");
    }
}
