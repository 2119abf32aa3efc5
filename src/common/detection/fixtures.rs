//! Builders for the archives and compound files used in tests.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use tempfile::TempDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::utils::{CONTENT_TYPES_PART, MAIN_DOCUMENT_PART, OLE2_SIGNATURE};

const SECTOR: usize = 512;
const ENDOFCHAIN: u32 = 0xFFFF_FFFE;
const FREESECT: u32 = 0xFFFF_FFFF;
const FATSECT: u32 = 0xFFFF_FFFD;
const NOSTREAM: u32 = 0xFFFF_FFFF;

/// A ZIP archive holding `members` in order, stored uncompressed.
pub fn zip_package(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in members {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A `[Content_Types].xml` declaring `main` for the main document part.
pub fn content_types_xml(main: &str) -> Vec<u8> {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="{main}"/></Types>"#
    )
    .into_bytes()
}

/// A minimal Word package whose main part has content type `main`.
pub fn word_package(main: &str) -> Vec<u8> {
    zip_package(&[
        (CONTENT_TYPES_PART, content_types_xml(main).as_slice()),
        ("_rels/.rels", b"<Relationships/>".as_slice()),
        (
            MAIN_DOCUMENT_PART,
            b"<w:document><w:body><w:p/></w:body></w:document>".as_slice(),
        ),
    ])
}

/// A version 3 compound file whose root storage holds the named empty streams.
///
/// Layout: header, one FAT sector (sector 0), one directory sector (sector 1).
/// Siblings are chained through their right links.
pub fn compound_file(streams: &[&str]) -> Vec<u8> {
    assert!(streams.len() <= 3, "one directory sector holds four entries");

    let mut data = vec![0u8; SECTOR * 3];

    let header = &mut data[..SECTOR];
    header[..8].copy_from_slice(OLE2_SIGNATURE);
    header[0x18..0x1A].copy_from_slice(&0x003Eu16.to_le_bytes());
    header[0x1A..0x1C].copy_from_slice(&3u16.to_le_bytes());
    header[0x1C..0x1E].copy_from_slice(&0xFFFEu16.to_le_bytes());
    header[0x1E..0x20].copy_from_slice(&9u16.to_le_bytes());
    header[0x20..0x22].copy_from_slice(&6u16.to_le_bytes());
    header[0x2C..0x30].copy_from_slice(&1u32.to_le_bytes());
    header[0x30..0x34].copy_from_slice(&1u32.to_le_bytes());
    header[0x38..0x3C].copy_from_slice(&4096u32.to_le_bytes());
    header[0x3C..0x40].copy_from_slice(&ENDOFCHAIN.to_le_bytes());
    header[0x44..0x48].copy_from_slice(&ENDOFCHAIN.to_le_bytes());
    header[0x4C..0x50].copy_from_slice(&0u32.to_le_bytes());
    for slot in header[0x50..SECTOR].chunks_exact_mut(4) {
        slot.copy_from_slice(&FREESECT.to_le_bytes());
    }

    let fat = &mut data[SECTOR..SECTOR * 2];
    for slot in fat.chunks_exact_mut(4) {
        slot.copy_from_slice(&FREESECT.to_le_bytes());
    }
    fat[0..4].copy_from_slice(&FATSECT.to_le_bytes());
    fat[4..8].copy_from_slice(&ENDOFCHAIN.to_le_bytes());

    let directory = &mut data[SECTOR * 2..];
    let root_child = if streams.is_empty() { NOSTREAM } else { 1 };
    write_dir_entry(&mut directory[..128], "Root Entry", 5, NOSTREAM, root_child);
    for (i, name) in streams.iter().enumerate() {
        let sid = i + 1;
        let right = if sid < streams.len() { sid as u32 + 1 } else { NOSTREAM };
        write_dir_entry(&mut directory[sid * 128..(sid + 1) * 128], name, 2, right, NOSTREAM);
    }

    data
}

fn write_dir_entry(entry: &mut [u8], name: &str, entry_type: u8, right: u32, child: u32) {
    let units: Vec<u16> = name.encode_utf16().collect();
    assert!(units.len() < 32);
    for (i, unit) in units.iter().enumerate() {
        entry[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    let name_len = ((units.len() + 1) * 2) as u16;
    entry[0x40..0x42].copy_from_slice(&name_len.to_le_bytes());
    entry[0x42] = entry_type;
    entry[0x43] = 1;
    entry[0x44..0x48].copy_from_slice(&NOSTREAM.to_le_bytes());
    entry[0x48..0x4C].copy_from_slice(&right.to_le_bytes());
    entry[0x4C..0x50].copy_from_slice(&child.to_le_bytes());
    entry[0x74..0x78].copy_from_slice(&ENDOFCHAIN.to_le_bytes());
}

/// Write `data` to `name` inside `dir`.
pub fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, data).unwrap();
    path
}
