use thiserror::Error;

/// Failures that stop a run before any per-variable work is possible.
///
/// Per-variable failures never surface here; they are collected as issues in
/// the run's report.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("collection not found: {0}")]
    MissingCollection(String),

    #[error("collection {0} has no modes")]
    MissingMode(String),

    #[error("store error: {0}")]
    Store(String),
}
