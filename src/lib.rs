//! docverify - find out which files really are Word documents
//!
//! File names lie: a `.doc` may be a renamed DOCX, a `.docx` may be an RTF
//! export, and a spreadsheet may sit behind any extension. This crate
//! classifies files by their bytes alone.
//!
//! # Features
//!
//! - **Signature sniffing**: ZIP, OLE2 compound file and RTF preambles
//! - **OOXML inspection**: required package parts and the main content type
//!   decide between DOCX, DOCM and "some other ZIP"
//! - **Compound file inspection**: a `WordDocument` stream marks a legacy
//!   .doc (requires the `ole` feature; otherwise reported as inconclusive)
//! - **Folder scans**: parallel classification with per-kind statistics and
//!   CSV reports
//!
//! # Example - Classifying a file
//!
//! ```no_run
//! use docverify::{DocumentKind, classify};
//!
//! let result = classify("contract.doc");
//! match result.kind {
//!     DocumentKind::Docx => println!("actually a DOCX"),
//!     kind => println!("{kind}: {}", result.note),
//! }
//! ```
//!
//! # Example - Scanning a folder
//!
//! ```no_run
//! use docverify::scan::{ScanOptions, scan};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = scan("/srv/archive", &ScanOptions::default())?;
//! for (kind, count) in report.stats.iter() {
//!     println!("{kind:11}: {count}");
//! }
//! docverify::report::write_csv("report.csv", &report.rows)?;
//! # Ok(())
//! # }
//! ```

/// Common types, detection and error handling
pub mod common;

/// OLE2 (compound file) reader
///
/// Parses the header, allocation table and directory of structured storage
/// files so the detector can check which streams exist.
#[cfg(feature = "ole")]
pub mod ole;

/// Report rows, run statistics and CSV output
pub mod report;

/// Directory walking and parallel classification
pub mod scan;

// Re-export commonly used types for convenience
pub use common::detection::{
    ClassificationResult, Classifier, ClassifierConfig, CompoundFileSupport, DocumentKind,
    MagicVerdict, classify, sniff_magic,
};
pub use common::{Error, Result};
pub use report::{ReportRow, RunStatistics};
