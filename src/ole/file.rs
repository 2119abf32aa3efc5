use super::consts::*;
use std::collections::HashSet;
use std::io::{self, Read, Seek, SeekFrom};
use thiserror::Error;
use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Raw OLE header structure (512 bytes)
///
/// This represents the on-disk format of the compound file header.
/// Based on Microsoft OLE2 specification.
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
#[allow(dead_code)]
struct RawHeader {
    /// Signature, must equal `MAGIC`
    magic: [u8; 8],
    /// Reserved class id (all zeros)
    clsid: [u8; 16],
    minor_version: U16<LE>,
    /// Major version (3 = 512-byte sectors, 4 = 4096-byte sectors)
    dll_version: U16<LE>,
    /// Byte order mark (0xFFFE)
    byte_order: U16<LE>,
    /// Sector size as a power of two
    sector_shift: U16<LE>,
    mini_sector_shift: U16<LE>,
    reserved: [u8; 6],
    num_dir_sectors: U32<LE>,
    num_fat_sectors: U32<LE>,
    /// First sector of the directory stream
    first_dir_sector: U32<LE>,
    transaction_signature: U32<LE>,
    mini_stream_cutoff: U32<LE>,
    first_minifat_sector: U32<LE>,
    num_minifat_sectors: U32<LE>,
    /// First DIFAT sector, for files with more than 109 FAT sectors
    first_difat_sector: U32<LE>,
    num_difat_sectors: U32<LE>,
    /// First 109 FAT sector indexes
    difat: [U32<LE>; HEADER_DIFAT_ENTRIES],
}

/// Raw OLE directory entry structure (128 bytes)
///
/// This represents the on-disk format of a directory entry.
/// Based on Microsoft OLE2 specification.
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
#[allow(dead_code)]
struct RawDirectoryEntry {
    /// Entry name in UTF-16LE (64 bytes, null-padded)
    name: [u8; 64],
    /// Length of name in bytes (including null terminator)
    name_len: U16<LE>,
    /// Entry type (1 = storage, 2 = stream, 5 = root)
    entry_type: u8,
    /// Node color (0 = red, 1 = black)
    node_color: u8,
    /// Left sibling SID
    sid_left: U32<LE>,
    /// Right sibling SID
    sid_right: U32<LE>,
    /// Child SID
    sid_child: U32<LE>,
    /// CLSID (16 bytes)
    clsid: [u8; 16],
    /// State bits
    state_bits: U32<LE>,
    /// Creation time (FILETIME)
    creation_time: U64<LE>,
    /// Modified time (FILETIME)
    modified_time: U64<LE>,
    /// Starting sector
    start_sector: U32<LE>,
    /// Stream size
    stream_size: U64<LE>,
}

/// Compound file reader
///
/// Validates the header, loads the sector allocation table and the directory
/// tree. Stream contents are never read; the reader only answers which
/// storages and streams exist.
#[derive(Debug)]
pub struct OleFile<R: Read + Seek> {
    /// File handle or reader
    reader: R,
    /// Total file size in bytes
    file_size: u64,
    /// Sector size (512 or 4096 bytes)
    sector_size: usize,
    /// File Allocation Table - maps sector to next sector in chain
    fat: Vec<u32>,
    /// All directory entries reachable from the root, indexed by SID
    dir_entries: Vec<Option<DirectoryEntry>>,
}

/// Represents an OLE directory entry (stream or storage)
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Storage ID (index in directory)
    pub sid: u32,
    /// Entry name (UTF-16 decoded to UTF-8)
    pub name: String,
    /// Entry type (stream, storage, root, etc.)
    pub entry_type: u8,
    /// Index of left sibling in red-black tree
    pub sid_left: u32,
    /// Index of right sibling in red-black tree
    pub sid_right: u32,
    /// Index of child node in red-black tree
    pub sid_child: u32,
    /// First sector of the stream
    pub start_sector: u32,
    /// Size of the stream in bytes
    pub size: u64,
}

impl DirectoryEntry {
    pub fn is_stream(&self) -> bool {
        self.entry_type == STGTY_STREAM
    }

    pub fn is_storage(&self) -> bool {
        self.entry_type == STGTY_STORAGE || self.entry_type == STGTY_ROOT
    }
}

/// Error types for OLE file parsing
#[derive(Debug, Error)]
pub enum OleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Not an OLE file")]
    NotOleFile,
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),
    #[error("Stream not found")]
    StreamNotFound,
}

impl<R: Read + Seek> OleFile<R> {
    /// Open and parse an OLE file from a reader
    ///
    /// # Arguments
    /// * `reader` - A reader that implements Read + Seek
    ///
    /// # Returns
    /// * `Result<OleFile<R>, OleError>` - The parsed OLE file or an error
    pub fn open(mut reader: R) -> Result<Self, OleError> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        if file_size < MINIMAL_OLEFILE_SIZE as u64 {
            return Err(OleError::NotOleFile);
        }

        let mut header_bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_bytes)?;
        let header = RawHeader::read_from_bytes(&header_bytes[..])
            .map_err(|_| OleError::InvalidFormat("Failed to parse header".to_string()))?;

        if &header.magic != MAGIC {
            return Err(OleError::NotOleFile);
        }

        if header.byte_order.get() != BYTE_ORDER_LE {
            return Err(OleError::InvalidFormat("Invalid byte order".to_string()));
        }

        // Only the two sector sizes the format defines are accepted
        let sector_size = match (header.dll_version.get(), header.sector_shift.get()) {
            (3, 9) => 512,
            (4, 12) => 4096,
            (version, shift) => {
                return Err(OleError::InvalidFormat(format!(
                    "Sector size mismatch (version {version}, shift {shift})"
                )));
            },
        };

        let mut ole = OleFile {
            reader,
            file_size,
            sector_size,
            fat: Vec::new(),
            dir_entries: Vec::new(),
        };

        ole.load_fat(&header)?;
        ole.load_directory(header.first_dir_sector.get())?;

        Ok(ole)
    }

    /// Load the File Allocation Table (FAT)
    ///
    /// The first 109 FAT sector indexes are stored in the header, additional
    /// indexes are stored in a chain of DIFAT sectors.
    fn load_fat(&mut self, header: &RawHeader) -> Result<(), OleError> {
        let mut fat_sectors: Vec<u32> = header
            .difat
            .iter()
            .map(|v| v.get())
            .take_while(|&sector| sector != FREESECT && sector != ENDOFCHAIN)
            .collect();

        // No chain can hold more sectors than the file does
        let max_sectors = (self.file_size / self.sector_size as u64) as usize;

        let num_difat_sectors = (header.num_difat_sectors.get() as usize).min(max_sectors);
        if num_difat_sectors > 0 {
            let mut difat_sector = header.first_difat_sector.get();
            let entries_per_sector = (self.sector_size / 4) - 1; // -1 for next DIFAT pointer
            let mut visited = HashSet::new();

            for _ in 0..num_difat_sectors {
                if difat_sector > MAXREGSECT {
                    break;
                }
                if !visited.insert(difat_sector) {
                    return Err(OleError::CorruptedFile("Cycle in DIFAT chain".to_string()));
                }
                let sector_data = self.read_sector(difat_sector)?;
                let entries = read_u32_table(&sector_data);

                fat_sectors.extend(
                    entries[..entries_per_sector]
                        .iter()
                        .copied()
                        .take_while(|&sector| sector != FREESECT && sector != ENDOFCHAIN),
                );
                if fat_sectors.len() > max_sectors {
                    return Err(OleError::CorruptedFile(
                        "More FAT sectors than the file holds".to_string(),
                    ));
                }

                difat_sector = entries[entries_per_sector];
            }
        }

        if fat_sectors.is_empty() {
            return Err(OleError::CorruptedFile("No FAT sectors".to_string()));
        }
        if fat_sectors.len() > max_sectors {
            return Err(OleError::CorruptedFile(
                "More FAT sectors than the file holds".to_string(),
            ));
        }

        self.fat.reserve(fat_sectors.len() * (self.sector_size / 4));
        for sector_id in fat_sectors {
            let sector_data = self.read_sector(sector_id)?;
            self.fat.extend(read_u32_table(&sector_data));
        }

        Ok(())
    }

    /// Load directory entries reachable from the root entry
    fn load_directory(&mut self, first_dir_sector: u32) -> Result<(), OleError> {
        let dir_data = self.read_stream_from_fat(first_dir_sector)?;

        let num_entries = dir_data.len() / DIRENTRY_SIZE;
        if num_entries == 0 {
            return Err(OleError::CorruptedFile("Empty directory".to_string()));
        }
        self.dir_entries = vec![None; num_entries];

        let root = parse_directory_entry(&dir_data[0..DIRENTRY_SIZE], 0)?;
        if root.entry_type != STGTY_ROOT {
            return Err(OleError::CorruptedFile(
                "First directory entry is not the root".to_string(),
            ));
        }
        let root_child_sid = root.sid_child;
        self.dir_entries[0] = Some(root);

        self.build_storage_tree(root_child_sid, &dir_data)
    }

    /// Parse every entry reachable from `start_sid` through sibling and child links
    ///
    /// Each SID is parsed at most once, so cyclic links in a damaged file
    /// terminate instead of recursing forever.
    fn build_storage_tree(&mut self, start_sid: u32, dir_data: &[u8]) -> Result<(), OleError> {
        let mut pending = vec![start_sid];

        while let Some(sid) = pending.pop() {
            if sid == NOSTREAM {
                continue;
            }

            let index = sid as usize;
            if index >= self.dir_entries.len() {
                return Err(OleError::CorruptedFile(
                    "Invalid directory entry index".to_string(),
                ));
            }
            if self.dir_entries[index].is_some() {
                continue;
            }

            let offset = index * DIRENTRY_SIZE;
            let entry = parse_directory_entry(&dir_data[offset..offset + DIRENTRY_SIZE], sid)?;
            if entry.entry_type == STGTY_EMPTY {
                continue;
            }

            pending.push(entry.sid_left);
            pending.push(entry.sid_right);
            if entry.is_storage() {
                pending.push(entry.sid_child);
            }
            self.dir_entries[index] = Some(entry);
        }

        Ok(())
    }

    /// Read a single sector from the file
    fn read_sector(&mut self, sector_id: u32) -> Result<Vec<u8>, OleError> {
        // Sector position in file: (sector_id + 1) * sector_size
        let position = ((sector_id as u64) + 1) * (self.sector_size as u64);
        if position + self.sector_size as u64 > self.file_size {
            return Err(OleError::CorruptedFile(format!(
                "Sector {sector_id} lies beyond end of file"
            )));
        }
        self.reader.seek(SeekFrom::Start(position))?;

        let mut buffer = vec![0u8; self.sector_size];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a stream by following the FAT chain
    fn read_stream_from_fat(&mut self, start_sector: u32) -> Result<Vec<u8>, OleError> {
        let mut data = Vec::new();
        let mut sector = start_sector;
        let mut remaining = self.fat.len();

        while sector != ENDOFCHAIN {
            if sector as usize >= self.fat.len() {
                return Err(OleError::CorruptedFile(
                    "Invalid sector index in FAT".to_string(),
                ));
            }
            if remaining == 0 {
                return Err(OleError::CorruptedFile("Cycle in FAT chain".to_string()));
            }
            remaining -= 1;

            let sector_data = self.read_sector(sector)?;
            data.extend_from_slice(&sector_data);

            sector = self.fat[sector as usize];
        }

        Ok(data)
    }

    fn root(&self) -> Option<&DirectoryEntry> {
        self.dir_entries.first().and_then(Option::as_ref)
    }

    /// Find a directory entry by path, comparing names case-insensitively
    pub fn entry(&self, path: &[&str]) -> Result<&DirectoryEntry, OleError> {
        let mut current = self.root().ok_or(OleError::StreamNotFound)?;

        for &name in path {
            if !current.is_storage() {
                return Err(OleError::StreamNotFound);
            }
            current = self
                .find_child_by_name(current.sid_child, name)
                .ok_or(OleError::StreamNotFound)?;
        }

        Ok(current)
    }

    /// Search the sibling tree rooted at `sid` for an entry named `name`
    fn find_child_by_name(&self, sid: u32, name: &str) -> Option<&DirectoryEntry> {
        let mut pending = vec![sid];
        let mut visited = vec![false; self.dir_entries.len()];

        while let Some(sid) = pending.pop() {
            let index = sid as usize;
            if sid == NOSTREAM || index >= self.dir_entries.len() || visited[index] {
                continue;
            }
            visited[index] = true;

            let Some(entry) = self.dir_entries[index].as_ref() else {
                continue;
            };
            if entry.name.to_lowercase() == name.to_lowercase() {
                return Some(entry);
            }
            pending.push(entry.sid_left);
            pending.push(entry.sid_right);
        }

        None
    }

    /// Check if a stream or storage exists
    pub fn exists(&self, path: &[&str]) -> bool {
        self.entry(path).is_ok()
    }

    /// List all streams in the OLE file
    ///
    /// Returns a list of stream paths (as vectors of storage/stream names)
    pub fn list_streams(&self) -> Vec<Vec<String>> {
        let mut streams = Vec::new();
        let Some(root) = self.root() else {
            return streams;
        };

        let mut pending = vec![(root.sid_child, Vec::new())];
        let mut visited = vec![false; self.dir_entries.len()];
        while let Some((sid, parent)) = pending.pop() {
            let index = sid as usize;
            if sid == NOSTREAM || index >= self.dir_entries.len() || visited[index] {
                continue;
            }
            visited[index] = true;
            let Some(entry) = self.dir_entries[index].as_ref() else {
                continue;
            };

            pending.push((entry.sid_left, parent.clone()));
            pending.push((entry.sid_right, parent.clone()));

            let mut path = parent;
            path.push(entry.name.clone());
            if entry.is_stream() {
                streams.push(path);
            } else if entry.is_storage() {
                pending.push((entry.sid_child, path));
            }
        }

        streams.sort();
        streams
    }
}

/// Parse a single directory entry from 128 bytes
fn parse_directory_entry(data: &[u8], sid: u32) -> Result<DirectoryEntry, OleError> {
    let raw = RawDirectoryEntry::read_from_bytes(data)
        .map_err(|_| OleError::InvalidFormat("Failed to parse directory entry".to_string()))?;

    let name_len = raw.name_len.get() as usize;
    let name_bytes = &raw.name[0..name_len.saturating_sub(2).min(64)];

    Ok(DirectoryEntry {
        sid,
        name: decode_utf16le(name_bytes),
        entry_type: raw.entry_type,
        sid_left: raw.sid_left.get(),
        sid_right: raw.sid_right.get(),
        sid_child: raw.sid_child.get(),
        start_sector: raw.start_sector.get(),
        size: raw.stream_size.get(),
    })
}

/// Interpret a sector as a table of little-endian u32 values
fn read_u32_table(sector: &[u8]) -> Vec<u32> {
    sector
        .chunks_exact(4)
        .map(|chunk| {
            U32::<LE>::read_from_bytes(chunk)
                .map(|v| v.get())
                .unwrap_or(FREESECT)
        })
        .collect()
}

/// Decode UTF-16LE bytes to String
fn decode_utf16le(bytes: &[u8]) -> String {
    let utf16_chars: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| {
            U16::<LE>::read_from_bytes(chunk)
                .map(|v| v.get())
                .unwrap_or(0)
        })
        .collect();

    String::from_utf16_lossy(&utf16_chars)
        .trim_end_matches('\0')
        .to_string()
}
