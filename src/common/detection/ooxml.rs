//! OOXML package inspection (modern Word documents).
//!
//! A Word package is a ZIP archive carrying `[Content_Types].xml` and
//! `word/document.xml`, whose manifest declares one of the two Word main
//! document content types.

use std::io::{Read, Seek};

use zip::ZipArchive;

use super::types::{ContainerVerdict, Rejection, WordPackage};
use super::utils::{
    CONTENT_TYPES_PART, DOCM_MAIN_CONTENT_TYPE, DOCX_MAIN_CONTENT_TYPE, MAIN_DOCUMENT_PART,
    MANIFEST_READ_LIMIT, find_in_buffer,
};

/// Inspect a ZIP archive for a Word package.
///
/// Only the central directory and the content-type manifest are read.
pub fn inspect_zip<R: Read + Seek>(reader: R) -> ContainerVerdict<WordPackage> {
    let mut archive = match ZipArchive::new(reader) {
        Ok(archive) => archive,
        Err(err) => return ContainerVerdict::Rejected(Rejection::CorruptArchive(err.to_string())),
    };

    if let Some(missing) = missing_member(&archive) {
        return ContainerVerdict::Rejected(Rejection::MissingMember(missing));
    }

    let manifest = match read_manifest(&mut archive) {
        Ok(manifest) => manifest,
        Err(err) => return ContainerVerdict::Rejected(Rejection::CorruptArchive(err.to_string())),
    };

    match match_content_types(&manifest) {
        Some(package) => ContainerVerdict::Match(package),
        None => ContainerVerdict::Rejected(Rejection::NotWordPackage),
    }
}

/// Map a content-type manifest to a Word package kind.
///
/// Undecodable bytes are replaced before the search; the test is substring
/// containment, the macro-free type winning when both are present.
pub fn match_content_types(manifest: &[u8]) -> Option<WordPackage> {
    let text = String::from_utf8_lossy(manifest);
    let text = text.as_bytes();

    if find_in_buffer(text, DOCX_MAIN_CONTENT_TYPE.as_bytes()) {
        Some(WordPackage::Document)
    } else if find_in_buffer(text, DOCM_MAIN_CONTENT_TYPE.as_bytes()) {
        Some(WordPackage::MacroEnabled)
    } else {
        None
    }
}

fn missing_member<R: Read + Seek>(archive: &ZipArchive<R>) -> Option<&'static str> {
    let mut has_manifest = false;
    let mut has_document = false;
    for name in archive.file_names() {
        match name {
            CONTENT_TYPES_PART => has_manifest = true,
            MAIN_DOCUMENT_PART => has_document = true,
            _ => {},
        }
    }

    if !has_manifest {
        Some(CONTENT_TYPES_PART)
    } else if !has_document {
        Some(MAIN_DOCUMENT_PART)
    } else {
        None
    }
}

fn read_manifest<R: Read + Seek>(archive: &mut ZipArchive<R>) -> zip::result::ZipResult<Vec<u8>> {
    let entry = archive.by_name(CONTENT_TYPES_PART)?;
    let mut manifest = Vec::new();
    entry.take(MANIFEST_READ_LIMIT).read_to_end(&mut manifest)?;
    Ok(manifest)
}
