//! The persisted fingerprint record.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::matrix::SignalMatrix;
use crate::domain::reading::SignalReading;
use crate::error::CoreResult;

/// The fixed set of location labels offered for capture.
///
/// Nothing in the builder or analyzer depends on this count; it exists only
/// as the default labeling scheme.
pub const PREDEFINED_LOCATIONS: [&str; 3] = ["Location 1", "Location 2", "Location 3"];

/// One stored location fingerprint.
///
/// Created atomically from a scan snapshot, persisted keyed by location
/// label, and overwritten wholesale on re-capture. Wire field names match
/// the historical stored format; `scanResults` and `timestamp` are optional
/// on read for forward/backward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintRecord {
    /// Location label; acts as the primary key.
    #[serde(rename = "name")]
    pub location: String,
    /// The 100-entry signal matrix derived from the scan.
    #[serde(rename = "signalMatrix")]
    pub signal_matrix: SignalMatrix,
    /// Raw readings the matrix was built from. May be empty.
    #[serde(rename = "scanResults", default)]
    pub scan_results: Vec<SignalReading>,
    /// Capture time, milliseconds since the Unix epoch.
    #[serde(rename = "timestamp", default = "now_ms")]
    pub timestamp_ms: i64,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

impl FingerprintRecord {
    /// Creates a record from a scan snapshot, timestamped now.
    #[must_use]
    pub fn capture(
        location: impl Into<String>,
        signal_matrix: SignalMatrix,
        scan_results: Vec<SignalReading>,
    ) -> Self {
        Self {
            location: location.into(),
            signal_matrix,
            scan_results,
            timestamp_ms: now_ms(),
        }
    }

    /// Re-validates the matrix length invariant after deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidMatrixLength`] if the stored
    /// matrix is not exactly 100 entries.
    pub fn validate(&self) -> CoreResult<()> {
        self.signal_matrix.validate()
    }
}
