//! File format detection for Word documents.
//!
//! Detection never trusts the file name. The first bytes select a container
//! family (ZIP, OLE2 compound file, RTF), then the matching inspector decides
//! whether the container actually holds a Word document.

// Submodule declarations
pub mod classify;
pub mod magic;
pub mod ole2;
pub mod ooxml;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-exports
pub use classify::{Classifier, ClassifierConfig, CompoundFileSupport, classify};
pub use magic::{sniff_bytes, sniff_magic, sniff_reader};
#[cfg(feature = "ole")]
pub use ole2::StructuredStorageInspector;
pub use ole2::{CompoundFileInspector, ReadSeek, UnavailableInspector, default_inspector};
pub use ooxml::{inspect_zip, match_content_types};
pub use types::{
    ClassificationResult, ContainerVerdict, DocumentKind, MagicVerdict, Rejection, WordPackage,
};
