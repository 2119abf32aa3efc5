//! Signature sniffing over the first bytes of a file.
//!
//! ZIP and compound-file signatures are tested against the first 8 bytes,
//! the RTF preamble against the first 200 bytes after leading whitespace.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::types::MagicVerdict;
use super::utils::{
    OLE2_SIGNATURE, RTF_SIGNATURE, SIGNATURE_LEN, SNIFF_WINDOW, ZIP_EMPTY_SIGNATURE,
    ZIP_SIGNATURE,
};

/// Read the sniffing window from the start of `reader`.
///
/// Returns at most [`SNIFF_WINDOW`] bytes. An empty source is reported as an
/// `UnexpectedEof` error so callers can tell it apart from unrecognized content.
pub fn read_prefix<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    let mut prefix = Vec::with_capacity(SNIFF_WINDOW);
    reader.take(SNIFF_WINDOW as u64).read_to_end(&mut prefix)?;

    if prefix.is_empty() {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "file is empty"));
    }
    Ok(prefix)
}

/// Bucket a leading byte window into a container family.
pub fn sniff_bytes(prefix: &[u8]) -> MagicVerdict {
    let head = &prefix[..prefix.len().min(SIGNATURE_LEN)];

    if head.starts_with(ZIP_SIGNATURE) || head.starts_with(ZIP_EMPTY_SIGNATURE) {
        return MagicVerdict::Zip;
    }
    if head.starts_with(OLE2_SIGNATURE) {
        return MagicVerdict::CompoundFile;
    }

    let window = &prefix[..prefix.len().min(SNIFF_WINDOW)];
    if trim_leading_whitespace(window).starts_with(RTF_SIGNATURE) {
        return MagicVerdict::RichText;
    }

    MagicVerdict::Unknown
}

/// Sniff a reader positioned at the start of the data.
pub fn sniff_reader<R: Read>(reader: R) -> io::Result<MagicVerdict> {
    read_prefix(reader).map(|prefix| sniff_bytes(&prefix))
}

/// Sniff a file on disk.
///
/// Never fails: a file that cannot be opened or read yields
/// [`MagicVerdict::Unknown`].
pub fn sniff_magic<P: AsRef<Path>>(path: P) -> MagicVerdict {
    let path = path.as_ref();
    match File::open(path).and_then(sniff_reader) {
        Ok(verdict) => verdict,
        Err(err) => {
            log::debug!("cannot sniff {}: {err}", path.display());
            MagicVerdict::Unknown
        },
    }
}

/// Strip ASCII whitespace, including vertical tab, from the front.
fn trim_leading_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C))
        .unwrap_or(bytes.len());
    &bytes[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    #[test]
    fn test_zip_signatures() {
        assert_eq!(sniff_bytes(b"PK\x03\x04\x14\x00\x00\x00"), MagicVerdict::Zip);
        assert_eq!(sniff_bytes(b"PK\x05\x06\x00\x00"), MagicVerdict::Zip);
        // spanned archive marker is not accepted
        assert_eq!(sniff_bytes(b"PK\x07\x08\x00\x00"), MagicVerdict::Unknown);
    }

    #[test]
    fn test_compound_file_signature() {
        let mut data = OLE2_SIGNATURE.to_vec();
        data.extend_from_slice(&[0u8; 32]);
        assert_eq!(sniff_bytes(&data), MagicVerdict::CompoundFile);
        assert_eq!(sniff_bytes(&OLE2_SIGNATURE[..7]), MagicVerdict::Unknown);
    }

    #[test]
    fn test_rtf_preamble() {
        assert_eq!(sniff_bytes(b"{\\rtf1\\ansi Hello}"), MagicVerdict::RichText);
        assert_eq!(sniff_bytes(b"{\\rtf"), MagicVerdict::RichText);
        assert_eq!(sniff_bytes(b"{\\rt"), MagicVerdict::Unknown);
    }

    #[test]
    fn test_rtf_after_whitespace() {
        assert_eq!(sniff_bytes(b"\r\n\t  {\\rtf1}"), MagicVerdict::RichText);
        assert_eq!(sniff_bytes(b"\x0b\x0c{\\rtf1}"), MagicVerdict::RichText);
    }

    #[test]
    fn test_rtf_beyond_window_is_unknown() {
        let mut data = vec![b' '; SNIFF_WINDOW];
        data.extend_from_slice(b"{\\rtf1}");
        assert_eq!(sniff_bytes(&data), MagicVerdict::Unknown);
    }

    #[test]
    fn test_plain_text_is_unknown() {
        assert_eq!(sniff_bytes(b"Plain text file"), MagicVerdict::Unknown);
        assert_eq!(sniff_bytes(b"%PDF-1.7"), MagicVerdict::Unknown);
    }

    #[test]
    fn test_read_prefix_bounded() {
        let data = vec![b'a'; 10_000];
        let prefix = read_prefix(Cursor::new(data)).unwrap();
        assert_eq!(prefix.len(), SNIFF_WINDOW);
    }

    #[test]
    fn test_read_prefix_empty_is_error() {
        let err = read_prefix(Cursor::new(Vec::new())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_sniff_missing_file_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(sniff_magic(dir.path().join("gone.docx")), MagicVerdict::Unknown);
    }

    #[test]
    fn test_sniff_empty_file_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.doc");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(sniff_magic(&path), MagicVerdict::Unknown);
    }

    proptest! {
        #[test]
        fn prop_sniff_bytes_is_total(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let first = sniff_bytes(&data);
            prop_assert_eq!(first, sniff_bytes(&data));
        }

        #[test]
        fn prop_only_first_window_matters(
            head in proptest::collection::vec(any::<u8>(), SNIFF_WINDOW..SNIFF_WINDOW + 1),
            tail in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let mut data = head.clone();
            data.extend_from_slice(&tail);
            prop_assert_eq!(sniff_bytes(&head), sniff_bytes(&data));
        }
    }
}
