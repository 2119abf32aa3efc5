//! Signatures, part names and other wire constants used by detection.

use memchr::memmem;

// Magic number signatures
pub const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";
/// End-of-central-directory record at offset 0, i.e. an archive with no entries
pub const ZIP_EMPTY_SIGNATURE: &[u8] = b"PK\x05\x06";
pub const OLE2_SIGNATURE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
pub const RTF_SIGNATURE: &[u8] = b"{\\rtf";

/// Bytes inspected for binary signatures
pub const SIGNATURE_LEN: usize = 8;
/// Bytes inspected for the RTF preamble
pub const SNIFF_WINDOW: usize = 200;

// OOXML package layout
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";
pub const DOCX_MAIN_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const DOCM_MAIN_CONTENT_TYPE: &str = "application/vnd.ms-word.document.macroEnabled.main+xml";
/// Upper bound on the manifest bytes read out of an archive
pub const MANIFEST_READ_LIMIT: u64 = 4 * 1024 * 1024;

// Compound file layout
pub const WORD_DOCUMENT_STREAM: &str = "WordDocument";

/// Helper function to find a pattern in a buffer efficiently.
pub fn find_in_buffer(buffer: &[u8], pattern: &[u8]) -> bool {
    memmem::find(buffer, pattern).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_buffer() {
        assert!(find_in_buffer(b"<Override ContentType=\"a/b\"/>", b"a/b"));
        assert!(!find_in_buffer(b"abc", b"abcd"));
        assert!(find_in_buffer(b"abc", b""));
    }
}
