/// Constants for OLE file format
pub mod consts;

/// Compound file header, FAT and directory reader
mod file;

// Re-export public types for convenient access
pub use file::{DirectoryEntry, OleError, OleFile};
