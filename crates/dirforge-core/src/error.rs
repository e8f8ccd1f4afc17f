//! Error handling for dirforge
//!
//! Every fatal condition of a run ends up as a [`DirforgeError`]. Per-row
//! problems are not errors; they are written to the error CSVs instead.

use thiserror::Error;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Main error type for dirforge operations
#[derive(Error, Debug)]
pub enum DirforgeError {
    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Filesystem failures that are not an expected per-row condition
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Logging could not be set up
    #[error("Logging error: {message}")]
    Logging {
        message: String,
    },

    /// CSV decoding or encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DirforgeError {
    /// Attach the offending path to an I/O error
    pub fn filesystem<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Create a new logging error
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

/// Result type for dirforge operations
pub type DirforgeResult<T> = Result<T, DirforgeError>;
