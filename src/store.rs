//! Persistence of the configured date range.
//!
//! Each face instance owns one fixed-size 8-byte record in the host's
//! byte-oriented store, named deterministically from the instance index. The
//! record is the packed [`DateRange`] and nothing else: no version header, no
//! checksum. A missing record, a short read, or a size mismatch all collapse
//! into one "not found" outcome, answered with a synthesized default range —
//! storage trouble is never surfaced as an error state.
//!
//! Writes are coalesced: [`persist`] reads the stored record back and skips
//! the write when the bytes already match, minimizing wear on the backing
//! store.

use crate::host::{Clock, RecordStore};
use crate::{CalendarDateTime, DateRange};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Size of one persisted record: two packed calendar values.
pub const RECORD_SIZE: usize = 8;

/// Errors opening the filesystem-backed store.
///
/// Only construction can fail; once open, reads and writes follow the
/// fire-and-forget record-store contract and never propagate errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Creating or accessing the storage directory failed
    #[error("storage IO: {0}")]
    Io(#[from] io::Error),

    /// The configured storage root exists but is not a directory
    #[error("storage root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Record name for a face instance.
pub fn record_name(instance_index: u8) -> String {
    format!("prog{:03}.u64", instance_index)
}

/// Pack a calendar value into 32 bits:
/// year:12 | month:4 | day:5 | hour:5 | minute:6, low to high.
fn pack(dt: CalendarDateTime) -> u32 {
    (u32::from(dt.year) & 0xFFF)
        | ((u32::from(dt.month) & 0xF) << 12)
        | ((u32::from(dt.day) & 0x1F) << 16)
        | ((u32::from(dt.hour) & 0x1F) << 21)
        | ((u32::from(dt.minute) & 0x3F) << 26)
}

fn unpack(raw: u32) -> CalendarDateTime {
    CalendarDateTime {
        year: (raw & 0xFFF) as u16,
        month: ((raw >> 12) & 0xF) as u8,
        day: ((raw >> 16) & 0x1F) as u8,
        hour: ((raw >> 21) & 0x1F) as u8,
        minute: ((raw >> 26) & 0x3F) as u8,
    }
}

/// Encode a range into its fixed-size record form.
pub fn encode_range(range: &DateRange) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[..4].copy_from_slice(&pack(range.start).to_le_bytes());
    buf[4..].copy_from_slice(&pack(range.end).to_le_bytes());
    buf
}

/// Decode a fixed-size record back into a range.
pub fn decode_range(buf: &[u8; RECORD_SIZE]) -> DateRange {
    let start = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let end = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    DateRange {
        start: unpack(start),
        end: unpack(end),
    }
}

/// Load the stored range for an instance, or synthesize a default.
///
/// Returns the range and whether a stored record was found. On a miss the
/// default range spans the clock's current year (Jan 1 00:00 through Dec 31
/// 23:59) and `found` is `false` — initialization uses that signal to open
/// the face directly into settings on first run.
pub fn load(
    store: &impl RecordStore,
    clock: &impl Clock,
    instance_index: u8,
) -> (DateRange, bool) {
    let name = record_name(instance_index);

    if store.exists(&name) {
        let mut buf = [0u8; RECORD_SIZE];
        if store.read(&name, &mut buf) {
            debug!("loaded stored range from {}", name);
            return (decode_range(&buf), true);
        }
    }

    // Record missing or unreadable - span the current year by default
    let year = clock.now().year;
    debug!("no stored range in {}, defaulting to year {}", name, year);

    let default = DateRange {
        start: CalendarDateTime {
            year,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
        },
        end: CalendarDateTime {
            year,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
        },
    };

    (default, false)
}

/// Write the range back, skipping the write when the stored bytes already
/// match. The caller clears its change flag afterward whether or not a write
/// happened.
pub fn persist(store: &mut impl RecordStore, instance_index: u8, range: &DateRange) {
    let name = record_name(instance_index);
    let fresh = encode_range(range);

    if store.exists(&name) {
        let mut current = [0u8; RECORD_SIZE];
        if store.read(&name, &mut current) && current == fresh {
            debug!("range unchanged, skipping write to {}", name);
            return;
        }
    }

    debug!("writing range to {}", name);
    store.write(&name, &fresh);
}

/// Filesystem-backed record store: one fixed-size file per record under a
/// storage directory.
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        if !root.is_dir() {
            return Err(StoreError::NotADirectory(root));
        }
        Ok(FsRecordStore { root })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl RecordStore for FsRecordStore {
    fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    fn read(&self, name: &str, buf: &mut [u8]) -> bool {
        match fs::read(self.path(name)) {
            Ok(data) if data.len() == buf.len() => {
                buf.copy_from_slice(&data);
                true
            }
            Ok(data) => {
                warn!(
                    "record {} has unexpected size {} (wanted {})",
                    name,
                    data.len(),
                    buf.len()
                );
                false
            }
            Err(err) => {
                debug!("record {} unreadable: {}", name, err);
                false
            }
        }
    }

    fn write(&mut self, name: &str, data: &[u8]) {
        // Fire-and-forget: the in-memory range stays authoritative
        if let Err(err) = fs::write(self.path(name), data) {
            warn!("failed to write record {}: {}", name, err);
        }
    }
}

/// In-memory record store for tests and the simulator. Counts writes so
/// write-coalescing behavior can be asserted.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write operations performed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl RecordStore for MemoryRecordStore {
    fn exists(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    fn read(&self, name: &str, buf: &mut [u8]) -> bool {
        match self.records.get(name) {
            Some(data) if data.len() == buf.len() => {
                buf.copy_from_slice(data);
                true
            }
            _ => false,
        }
    }

    fn write(&mut self, name: &str, data: &[u8]) {
        self.writes += 1;
        self.records.insert(name.to_string(), data.to_vec());
    }
}
