//! One report row per classified file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::common::detection::{ClassificationResult, DocumentKind};

/// CSV header, in column order.
pub const HEADERS: [&str; 6] = ["Path", "Kind", "IsDocx", "Ext", "Size", "Note"];

/// A classified file as it appears in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRow {
    #[serde(serialize_with = "serialize_path")]
    pub path: PathBuf,
    pub kind: DocumentKind,
    #[serde(serialize_with = "serialize_flag")]
    pub is_docx: bool,
    /// Lower-cased extension with its leading dot, empty when absent
    pub ext: String,
    /// Size in bytes, `None` when the file could not be stat'ed
    pub size: Option<u64>,
    pub note: String,
}

impl ReportRow {
    /// Build a row for `path`, reading its size from the filesystem.
    pub fn new(path: &Path, result: ClassificationResult) -> Self {
        let size = fs::metadata(path).ok().map(|meta| meta.len());
        Self::with_size(path, result, size)
    }

    pub fn with_size(path: &Path, result: ClassificationResult, size: Option<u64>) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: result.kind,
            is_docx: result.is_docx_like,
            ext: extension_of(path),
            size,
            note: result.note,
        }
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_docx { "DOCX" } else { "NOT" };
        write!(f, "{:11} | {verdict} | {}", self.kind, self.path.display())
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn serialize_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "Y" } else { "N" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(kind: DocumentKind, note: &str, is_docx_like: bool) -> ClassificationResult {
        ClassificationResult {
            kind,
            note: note.to_string(),
            is_docx_like,
        }
    }

    #[test]
    fn test_extension_is_lowercased_with_dot() {
        let row = ReportRow::with_size(
            Path::new("/data/Report.DOCX"),
            result(DocumentKind::Docx, "", true),
            Some(10),
        );
        assert_eq!(row.ext, ".docx");
    }

    #[test]
    fn test_missing_extension_is_empty() {
        let row = ReportRow::with_size(
            Path::new("/data/README"),
            result(DocumentKind::NotWord, "x", false),
            None,
        );
        assert_eq!(row.ext, "");
        assert_eq!(row.size, None);
    }

    #[test]
    fn test_display_line() {
        let row = ReportRow::with_size(
            Path::new("/data/a.doc"),
            result(DocumentKind::DocLegacy, "", false),
            Some(1536),
        );
        assert_eq!(row.to_string(), "DOC(legacy) | NOT | /data/a.doc");

        let row = ReportRow::with_size(
            Path::new("/data/b.docx"),
            result(DocumentKind::Docx, "", true),
            Some(1),
        );
        assert_eq!(row.to_string(), "DOCX        | DOCX | /data/b.docx");
    }

    #[test]
    fn test_size_from_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("five.rtf");
        std::fs::write(&path, b"{\\rtf").unwrap();
        let row = ReportRow::new(&path, result(DocumentKind::Rtf, "", false));
        assert_eq!(row.size, Some(5));
    }
}
