//! Error types for the task store and its storage backends.

use thiserror::Error;

/// A required task field was empty on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task text must not be empty")]
    EmptyText,

    #[error("task date must not be empty")]
    EmptyDate,
}

/// Failure writing the durable store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by `TaskStore` operations.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("task {0} not found")]
    NotFound(u64),

    #[error("failed to save tasks: {0}")]
    Storage(#[from] StorageError),
}
