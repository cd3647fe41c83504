//! JSON file-backed record store.
//!
//! The whole store is one JSON document mapping location label to record.
//! Writes go to a temporary file in the same directory followed by a rename,
//! so a save either lands completely or not at all.
//!
//! Loading re-validates every record's matrix length before anything can
//! index into it by position; a mismatch is reported as
//! [`StoreError::CorruptRecord`], not silently accepted.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wifi_fingerprint_core::{FingerprintRecord, MATRIX_SIZE};

use crate::error::StoreError;
use crate::port::RecordStore;

/// [`RecordStore`] backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over the given file path.
    ///
    /// The file (and its parent directory) is created lazily on first save;
    /// a missing file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, FingerprintRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.path)?;
        let map: BTreeMap<String, FingerprintRecord> = serde_json::from_slice(&bytes)?;

        for (location, record) in &map {
            if record.validate().is_err() {
                return Err(StoreError::CorruptRecord {
                    location: location.clone(),
                    len: record.signal_matrix.len(),
                    expected: MATRIX_SIZE,
                });
            }
        }
        debug!(records = map.len(), path = %self.path.display(), "store loaded");
        Ok(map)
    }

    fn write_map(&self, map: &BTreeMap<String, FingerprintRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Temp file in the same directory so the rename stays on one
        // filesystem.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn save(&self, record: &FingerprintRecord) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(record.location.clone(), record.clone());
        self.write_map(&map)?;
        info!(location = %record.location, "record saved");
        Ok(())
    }

    fn load(&self, location: &str) -> Result<Option<FingerprintRecord>, StoreError> {
        Ok(self.read_map()?.remove(location))
    }

    fn load_all(
        &self,
        locations: &[&str],
    ) -> Result<BTreeMap<String, FingerprintRecord>, StoreError> {
        let mut map = self.read_map()?;
        map.retain(|location, _| locations.contains(&location.as_str()));
        Ok(map)
    }

    fn load_stored(&self) -> Result<BTreeMap<String, FingerprintRecord>, StoreError> {
        self.read_map()
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!(path = %self.path.display(), "all records cleared");
        }
        Ok(())
    }
}
