//! The persistence port.

use std::collections::BTreeMap;

use wifi_fingerprint_core::FingerprintRecord;

use crate::error::StoreError;

/// Key-value persistence for fingerprint records, keyed by location label.
///
/// Saves overwrite wholesale; there is no partial update and no history.
/// Each save is atomic per key from the caller's perspective.
pub trait RecordStore: Send + Sync {
    /// Stores (or replaces) the record under its location label.
    ///
    /// # Errors
    ///
    /// Returns an error if the store operation fails.
    fn save(&self, record: &FingerprintRecord) -> Result<(), StoreError>;

    /// Retrieves the record for one location, if present.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure or a corrupt stored record.
    fn load(&self, location: &str) -> Result<Option<FingerprintRecord>, StoreError>;

    /// Retrieves the records for the given locations.
    ///
    /// Locations with no stored record are omitted from the result.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure or a corrupt stored record.
    fn load_all(
        &self,
        locations: &[&str],
    ) -> Result<BTreeMap<String, FingerprintRecord>, StoreError>;

    /// Retrieves every stored record, whatever its label.
    ///
    /// Labels outside the predefined set (captured with a custom label) are
    /// included too.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure or a corrupt stored record.
    fn load_stored(&self) -> Result<BTreeMap<String, FingerprintRecord>, StoreError>;

    /// Removes every stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion fails.
    fn clear_all(&self) -> Result<(), StoreError>;
}
