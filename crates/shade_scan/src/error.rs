//! Scan error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scan pass
#[derive(Error, Debug)]
pub enum ScanError {
    /// Walking the project tree failed
    #[error("Failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// Reading file metadata failed
    #[error("Failed to stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading file content failed
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-file task panicked or was cancelled
    #[error("Scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
