//! Error types for SnowGrad.

use std::path::PathBuf;

use thiserror::Error;

/// SnowGrad error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid split configuration. Fatal and user-correctable; raised before
    /// any computation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Target gradient table already exists (anti-clobber guard).
    #[error("gradient file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Input columns, mode indices, or bin edges have inconsistent shape.
    #[error("data shape error: {0}")]
    DataShape(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
