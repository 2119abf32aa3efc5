//! Common types and utilities shared by detection and reporting.

// Submodule declarations
pub mod detection;
pub mod error;

// Re-exports for convenience
pub use detection::{ClassificationResult, Classifier, ClassifierConfig, DocumentKind, classify};
pub use error::{Error, Result};
