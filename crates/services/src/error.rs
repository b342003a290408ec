//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SummaryError;
use storage::repository::StorageError;

/// Errors emitted by session services.
///
/// `PreconditionFailed` and `SessionAlreadyComplete` signal calls made in the
/// wrong session state; they are caller bugs and are never swallowed here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("{operation} is not valid in the current session state")]
    PreconditionFailed { operation: &'static str },
    #[error("answer index {index} is out of range for {options} options")]
    InvalidAnswerIndex { index: usize, options: usize },
    #[error("session already completed")]
    SessionAlreadyComplete,
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Catalog(#[from] StorageError),
}
