//! Error types for the gallery sorter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gallery sorter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the gallery sorter
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },

    #[error("Reverse geocoding failed: {0}")]
    Geocode(String),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("Path has no file name: {path}")]
    InvalidFileName { path: PathBuf },

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
