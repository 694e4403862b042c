//! The storage boundary the HTTP layer is written against.
//!
//! The pipeline and handlers never talk to a database driver directly;
//! they depend on [`TeaRepository`] and its failure vocabulary. Adapters
//! (the in-memory store shipped with the service, a document-store driver
//! in a richer deployment) implement the trait; the core neither knows nor
//! cares which one is wired in.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::Tea;

/// Failure modes a repository adapter may surface.
///
/// `NotFound` and `InvalidId` are recoverable: handlers map them to the
/// `not_found` envelope. `Store` is a fault: it propagates to the
/// pipeline's recovery stage and becomes the generic 500.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No record exists under the given identifier.
    #[error("record not found")]
    NotFound,

    /// The identifier does not have the record-identifier shape and can
    /// never name a record.
    #[error("malformed record id: {0:?}")]
    InvalidId(String),

    /// The storage backend failed. The cause is operator-facing only.
    #[error("store failure")]
    Store(#[source] anyhow::Error),
}

impl RepoError {
    /// Returns `true` for the error kinds handlers resolve to `not_found`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::InvalidId(_))
    }
}

/// CRUD primitives over persisted tea records.
///
/// Implementations must be safe to call from concurrently running request
/// tasks; each method is a single atomic per-record operation.
#[async_trait]
pub trait TeaRepository: Send + Sync {
    /// Returns every record, in repository order. An empty store yields an
    /// empty vector, never an error.
    async fn list_all(&self) -> Result<Vec<Tea>, RepoError>;

    /// Returns the record with the given identifier.
    async fn find_by_id(&self, id: &str) -> Result<Tea, RepoError>;

    /// Persists a new record, assigning its identifier. The returned
    /// record carries the assigned id; whatever id the input held is
    /// discarded.
    async fn create(&self, tea: Tea) -> Result<Tea, RepoError>;

    /// Overwrites the record whose identifier matches `tea.id`.
    async fn update_by_id(&self, tea: Tea) -> Result<(), RepoError>;

    /// Removes the record with the given identifier.
    async fn delete_by_id(&self, id: &str) -> Result<(), RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(RepoError::NotFound.is_not_found());
        assert!(RepoError::InvalidId("nope".to_string()).is_not_found());
        assert!(!RepoError::Store(anyhow::anyhow!("connection reset")).is_not_found());
    }

    #[test]
    fn test_store_error_preserves_source() {
        let err = RepoError::Store(anyhow::anyhow!("connection reset"));
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("connection reset"));
    }
}
