//! OLE2 inspection (legacy Word documents).
//!
//! Reading structured storage is a capability: with the `ole` feature the
//! full reader is compiled in, otherwise only [`UnavailableInspector`] exists
//! and every compound file is reported as inconclusive.

use std::fmt;
use std::io::{Read, Seek};

use super::types::{ContainerVerdict, Rejection};
#[cfg(feature = "ole")]
use super::utils::WORD_DOCUMENT_STREAM;

/// Object-safe `Read + Seek`.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Decides whether a compound file is a legacy Word document.
pub trait CompoundFileInspector: Send + Sync + fmt::Debug {
    /// False for implementations that never examine the data.
    fn is_available(&self) -> bool;

    /// Inspect a compound file; `reader` is positioned anywhere.
    fn inspect(&self, reader: &mut dyn ReadSeek) -> ContainerVerdict;
}

/// Full structured-storage reader backed by [`crate::ole::OleFile`].
#[cfg(feature = "ole")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredStorageInspector;

#[cfg(feature = "ole")]
impl CompoundFileInspector for StructuredStorageInspector {
    fn is_available(&self) -> bool {
        true
    }

    fn inspect(&self, reader: &mut dyn ReadSeek) -> ContainerVerdict {
        let ole = match crate::ole::OleFile::open(reader) {
            Ok(ole) => ole,
            Err(err) => {
                return ContainerVerdict::Rejected(Rejection::InvalidCompoundFile(err.to_string()));
            },
        };

        // The WordDocument stream is the only signal; its content is not examined
        if ole.exists(&[WORD_DOCUMENT_STREAM]) {
            return ContainerVerdict::Match(());
        }

        log::debug!("compound file streams: {:?}", ole.list_streams());
        ContainerVerdict::Rejected(Rejection::NoWordStream)
    }
}

/// Stand-in used when no structured-storage reader is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableInspector;

impl CompoundFileInspector for UnavailableInspector {
    fn is_available(&self) -> bool {
        false
    }

    fn inspect(&self, _reader: &mut dyn ReadSeek) -> ContainerVerdict {
        ContainerVerdict::Rejected(Rejection::CapabilityUnavailable)
    }
}

/// Best inspector compiled into this build.
#[cfg(feature = "ole")]
pub fn default_inspector() -> Box<dyn CompoundFileInspector> {
    Box::new(StructuredStorageInspector)
}

/// Best inspector compiled into this build.
#[cfg(not(feature = "ole"))]
pub fn default_inspector() -> Box<dyn CompoundFileInspector> {
    Box::new(UnavailableInspector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_unavailable_is_inconclusive() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        let verdict = UnavailableInspector.inspect(&mut cursor);
        assert_eq!(
            verdict,
            ContainerVerdict::Rejected(Rejection::CapabilityUnavailable)
        );
        assert!(verdict.note().starts_with("inconclusive"));
        assert!(!UnavailableInspector.is_available());
    }

    #[cfg(feature = "ole")]
    mod structured {
        use super::*;
        use crate::common::detection::fixtures::compound_file;
        use crate::common::detection::utils::OLE2_SIGNATURE;

        #[test]
        fn test_word_document_stream_matches() {
            let mut cursor = Cursor::new(compound_file(&["1Table", "WordDocument"]));
            assert_eq!(
                StructuredStorageInspector.inspect(&mut cursor),
                ContainerVerdict::Match(())
            );
        }

        #[test]
        fn test_workbook_is_rejected() {
            let mut cursor = Cursor::new(compound_file(&["Workbook"]));
            let verdict = StructuredStorageInspector.inspect(&mut cursor);
            assert_eq!(verdict, ContainerVerdict::Rejected(Rejection::NoWordStream));
            assert!(verdict.note().contains("XLS/PPT"));
        }

        #[test]
        fn test_truncated_compound_file() {
            let mut data = OLE2_SIGNATURE.to_vec();
            data.resize(1024, 0);
            let mut cursor = Cursor::new(data);
            assert!(matches!(
                StructuredStorageInspector.inspect(&mut cursor),
                ContainerVerdict::Rejected(Rejection::InvalidCompoundFile(_))
            ));
        }

        #[test]
        fn test_default_inspector_is_available() {
            assert!(default_inspector().is_available());
        }
    }
}
