//! Unified error types for docverify.
//!
//! Only run-level failures are errors. A single file that cannot be read or
//! does not look like a Word document is reported as data by the classifier,
//! never through this type.
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for docverify operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The scan root is missing or is not a directory
    #[error("Folder not found: {}", .0.display())]
    NotADirectory(PathBuf),

    /// CSV report error
    #[error("CSV error: {0}")]
    Csv(String),
}

/// Result type for docverify operations.
pub type Result<T> = std::result::Result<T, Error>;
