use dls_sync::{FigmaError, MemoryError, SyncError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] MemoryError),

    #[error("Figma error: {0}")]
    Figma(#[from] FigmaError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("no Figma token: set the {0} environment variable")]
    MissingToken(String),

    #[error("nothing to sync: pass --snapshot or --file-key, or set figma.file_key")]
    NoTarget,
}
