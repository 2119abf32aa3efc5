//! Folder scanning.
//!
//! Walks a directory tree and classifies every regular file on the rayon
//! thread pool. Each worker folds into its own rows and [`RunStatistics`],
//! which are merged once the walk is done.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::common::detection::{Classifier, ClassifierConfig};
use crate::common::error::{Error, Result};
use crate::report::{ReportRow, RunStatistics};

/// Options for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub classifier: ClassifierConfig,
    /// Drop rows that pass as DOCX; they are still counted
    pub not_docx_only: bool,
}

/// Rows and counts produced by a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Retained rows, sorted by path
    pub rows: Vec<ReportRow>,
    /// Counts over every classified file, retained or not
    pub stats: RunStatistics,
}

/// Regular files under `root`, depth first.
///
/// Symlinks are not followed. Entries that cannot be read are skipped.
pub fn walk_files<P: AsRef<Path>>(root: P) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(entry.into_path()),
            Ok(_) => None,
            Err(err) => {
                log::debug!("skipping unreadable entry: {err}");
                None
            },
        })
}

/// Classify every regular file under `root`.
///
/// Fails only when `root` is not an existing directory.
pub fn scan<P: AsRef<Path>>(root: P, options: &ScanOptions) -> Result<ScanReport> {
    let root = root.as_ref();
    let root = fs::canonicalize(root)
        .ok()
        .filter(|path| path.is_dir())
        .ok_or_else(|| Error::NotADirectory(root.to_path_buf()))?;

    let classifier = Classifier::new(&options.classifier);
    if !classifier.inspects_compound_files() {
        log::warn!("compound-file reader unavailable; legacy .doc files will be reported as inconclusive");
    }

    let paths: Vec<PathBuf> = walk_files(&root).collect();
    log::info!("classifying {} files under {}", paths.len(), root.display());

    let report = scan_paths(&paths, &classifier, options.not_docx_only);
    log::info!("classified {} files", report.stats.total());
    Ok(report)
}

/// Classify `paths` in parallel with `classifier`.
pub fn scan_paths(paths: &[PathBuf], classifier: &Classifier, not_docx_only: bool) -> ScanReport {
    let (mut rows, stats) = paths
        .par_iter()
        .fold(
            || (Vec::new(), RunStatistics::new()),
            |(mut rows, mut stats), path| {
                let result = classifier.classify(path);
                if !result.note.is_empty() {
                    log::debug!("{}: {} ({})", path.display(), result.kind, result.note);
                }
                stats.record(result.kind);
                if !(not_docx_only && result.is_docx_like) {
                    rows.push(ReportRow::new(path, result));
                }
                (rows, stats)
            },
        )
        .reduce(
            || (Vec::new(), RunStatistics::new()),
            |(mut rows, stats), (other_rows, other_stats)| {
                rows.extend(other_rows);
                (rows, stats.merge(other_stats))
            },
        );

    rows.sort_by(|a, b| a.path.cmp(&b.path));
    ScanReport { rows, stats }
}
