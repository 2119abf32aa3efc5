//! Verdict and result types produced by format detection.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Container family guessed from the leading bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagicVerdict {
    /// ZIP local file header or empty-archive end record
    Zip,
    /// OLE2 structured storage (compound file) header
    CompoundFile,
    /// `{\rtf` preamble after leading whitespace
    RichText,
    /// None of the above
    Unknown,
}

/// Concrete Word package kind declared by an OOXML content-type manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordPackage {
    /// Macro-free document (.docx)
    Document,
    /// Macro-enabled document (.docm)
    MacroEnabled,
}

/// Why a container inspector refused a file.
///
/// The `Display` text is what ends up in the report's Note column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Valid archive, but a part every Word package carries is absent
    #[error("missing required member {0}")]
    MissingMember(&'static str),

    /// The bytes could not be read as a ZIP archive at all
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),

    /// Valid archive with the right parts, but no Word main content type
    #[error("not a Word OOXML package")]
    NotWordPackage,

    /// No structured-storage reader is available, nothing was examined
    #[error("inconclusive: compound-file reader unavailable")]
    CapabilityUnavailable,

    /// Compound-file signature present, structure unreadable
    #[error("not a valid compound file: {0}")]
    InvalidCompoundFile(String),

    /// Valid compound file without a `WordDocument` stream
    #[error("compound file without WordDocument stream (possibly XLS/PPT)")]
    NoWordStream,
}

impl Rejection {
    /// True when the file was never examined, as opposed to examined and refused.
    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Rejection::CapabilityUnavailable)
    }
}

/// Outcome of inspecting one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerVerdict<T = ()> {
    Match(T),
    Rejected(Rejection),
}

impl<T> ContainerVerdict<T> {
    pub fn is_match(&self) -> bool {
        matches!(self, ContainerVerdict::Match(_))
    }

    /// Diagnostic text, empty on a match.
    pub fn note(&self) -> String {
        match self {
            ContainerVerdict::Match(_) => String::new(),
            ContainerVerdict::Rejected(rejection) => rejection.to_string(),
        }
    }
}

/// Final classification of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DocumentKind {
    #[serde(rename = "DOCX")]
    Docx,
    #[serde(rename = "DOCM")]
    Docm,
    #[serde(rename = "DOC(legacy)")]
    DocLegacy,
    #[serde(rename = "RTF")]
    Rtf,
    #[serde(rename = "OLE-OTHER")]
    OleOther,
    #[serde(rename = "NOT-WORD")]
    NotWord,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl DocumentKind {
    /// Number of kinds.
    pub const COUNT: usize = 7;

    /// Every kind, in report order.
    pub const ALL: [DocumentKind; Self::COUNT] = [
        DocumentKind::Docx,
        DocumentKind::Docm,
        DocumentKind::DocLegacy,
        DocumentKind::Rtf,
        DocumentKind::OleOther,
        DocumentKind::NotWord,
        DocumentKind::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Docx => "DOCX",
            DocumentKind::Docm => "DOCM",
            DocumentKind::DocLegacy => "DOC(legacy)",
            DocumentKind::Rtf => "RTF",
            DocumentKind::OleOther => "OLE-OTHER",
            DocumentKind::NotWord => "NOT-WORD",
            DocumentKind::Unknown => "UNKNOWN",
        }
    }

    /// Position of this kind in [`DocumentKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl From<WordPackage> for DocumentKind {
    fn from(package: WordPackage) -> Self {
        match package {
            WordPackage::Document => DocumentKind::Docx,
            WordPackage::MacroEnabled => DocumentKind::Docm,
        }
    }
}

/// Per-file classification record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub kind: DocumentKind,
    /// Empty on a clean match
    pub note: String,
    /// DOCX, or DOCM when the caller counts macro-enabled packages as DOCX
    pub is_docx_like: bool,
}
