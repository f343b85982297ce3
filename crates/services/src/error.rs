//! Shared error types for the services crate.

use thiserror::Error;

use hotkeys_core::model::{CatalogError, SessionSummaryError};
use storage::repository::StorageError;

/// Errors emitted while running a tutoring session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorError {
    #[error("no question is waiting for an answer")]
    NoPendingQuestion,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TutorError {
    /// True when the failure came from reading or writing persisted data.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
