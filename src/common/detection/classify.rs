//! Word document classification.
//!
//! Sniffs the leading bytes, then hands the file to the inspector for the
//! detected container family. Every failure is folded into the returned
//! [`ClassificationResult`]; nothing here returns an error or panics on bad
//! input.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::magic::{read_prefix, sniff_bytes};
use super::ole2::{CompoundFileInspector, UnavailableInspector, default_inspector};
use super::ooxml::inspect_zip;
use super::types::{ClassificationResult, ContainerVerdict, DocumentKind, MagicVerdict};

const UNRECOGNIZED_NOTE: &str = "not a recognized zip/compound-file/rich-text structure";

/// How compound files are examined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompoundFileSupport {
    /// Use the structured-storage reader when this build has one
    #[default]
    Auto,
    /// Never read compound files; report them as inconclusive
    Disabled,
}

/// Caller policy for a classification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Treat macro-enabled packages as DOCX for `is_docx_like`
    pub count_docm_as_docx: bool,
    pub compound_files: CompoundFileSupport,
}

/// Classifies files as Word formats by content.
///
/// Holds no per-file state, so one instance can be shared across threads.
#[derive(Debug)]
pub struct Classifier {
    count_docm_as_docx: bool,
    compound: Box<dyn CompoundFileInspector>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        let compound: Box<dyn CompoundFileInspector> = match config.compound_files {
            CompoundFileSupport::Auto => default_inspector(),
            CompoundFileSupport::Disabled => Box::new(UnavailableInspector),
        };
        Self::with_inspector(config, compound)
    }

    /// Build a classifier around a specific compound-file inspector.
    pub fn with_inspector(config: &ClassifierConfig, compound: Box<dyn CompoundFileInspector>) -> Self {
        Self {
            count_docm_as_docx: config.count_docm_as_docx,
            compound,
        }
    }

    /// Whether compound files are actually examined.
    pub fn inspects_compound_files(&self) -> bool {
        self.compound.is_available()
    }

    /// Classify the file at `path`.
    ///
    /// The file is opened once and closed before returning.
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> ClassificationResult {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => self.classify_reader(file),
            Err(err) => {
                log::debug!("cannot open {}: {err}", path.display());
                self.read_failure(&err)
            },
        }
    }

    /// Classify data from a seekable reader positioned at the start of the data.
    pub fn classify_reader<R: Read + Seek>(&self, mut reader: R) -> ClassificationResult {
        let magic = match read_prefix(&mut reader) {
            Ok(prefix) => sniff_bytes(&prefix),
            Err(err) => return self.read_failure(&err),
        };
        if let Err(err) = reader.seek(SeekFrom::Start(0)) {
            return self.read_failure(&err);
        }

        match magic {
            MagicVerdict::Zip => match inspect_zip(&mut reader) {
                ContainerVerdict::Match(package) => self.result(package.into(), String::new()),
                ContainerVerdict::Rejected(rejection) => {
                    self.result(DocumentKind::NotWord, format!("ZIP but {rejection}"))
                },
            },
            MagicVerdict::CompoundFile => match self.compound.inspect(&mut reader) {
                ContainerVerdict::Match(()) => self.result(DocumentKind::DocLegacy, String::new()),
                ContainerVerdict::Rejected(rejection) => {
                    self.result(DocumentKind::OleOther, rejection.to_string())
                },
            },
            MagicVerdict::RichText => self.result(DocumentKind::Rtf, String::new()),
            MagicVerdict::Unknown => {
                self.result(DocumentKind::NotWord, UNRECOGNIZED_NOTE.to_string())
            },
        }
    }

    /// Whether `kind` passes as DOCX under this classifier's policy.
    pub fn is_docx_like(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Docx => true,
            DocumentKind::Docm => self.count_docm_as_docx,
            _ => false,
        }
    }

    fn read_failure(&self, err: &io::Error) -> ClassificationResult {
        self.result(DocumentKind::Unknown, format!("read failure: {err}"))
    }

    fn result(&self, kind: DocumentKind, note: String) -> ClassificationResult {
        ClassificationResult {
            kind,
            note,
            is_docx_like: self.is_docx_like(kind),
        }
    }
}

/// Classify a file with the default policy.
pub fn classify<P: AsRef<Path>>(path: P) -> ClassificationResult {
    Classifier::default().classify(path)
}
