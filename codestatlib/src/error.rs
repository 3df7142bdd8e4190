//! Error types for codestatlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning and reporting
#[derive(Error, Debug)]
pub enum CodestatError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No supported text encoding could decode the file
    #[error("could not decode '{0}' with any supported encoding")]
    Decode(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Scan was interrupted before it finished
    #[error("scan interrupted")]
    Interrupted,

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodestatError {
    /// Whether this error only affects a single file and the scan can go on.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::Decode(_))
    }
}
