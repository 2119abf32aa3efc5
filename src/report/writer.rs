//! CSV report emission.
//!
//! Files start with a UTF-8 byte order mark so spreadsheet applications pick
//! the right encoding, and always carry the header row.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::error::Result;

use super::record::{HEADERS, ReportRow};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `rows` as CSV to `writer`.
pub fn write_rows<W: Write>(mut writer: W, rows: &[ReportRow]) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADERS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `rows` to a CSV file at `path`, creating parent directories.
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[ReportRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_rows(BufWriter::new(file), rows)?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
