//! Error types for record persistence.

use thiserror::Error;

/// Errors from data persistence operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Underlying filesystem failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid JSON or a record is malformed.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored record's signal matrix is the wrong size.
    ///
    /// Such a record is never indexed into; the load fails instead.
    #[error("corrupt record for '{location}': signal matrix has {len} entries, expected {expected}")]
    CorruptRecord {
        /// Location label of the offending record.
        location: String,
        /// Entry count found in storage.
        len: usize,
        /// Required entry count.
        expected: usize,
    },
}
