//! Unified error types for docverify.
//!
//! This module provides a single error type for the run-level operations
//! (walking a folder, writing reports), presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
