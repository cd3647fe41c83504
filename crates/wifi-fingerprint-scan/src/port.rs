//! The primary port (driving side) for WiFi scanning.

use wifi_fingerprint_core::SignalReading;

use crate::error::ScanError;

/// Port that abstracts the platform WiFi scanning backend.
///
/// Implementations include:
/// - [`crate::adapter::IwScanner`] -- Linux, subprocess-based.
/// - [`crate::adapter::MockScanner`] -- preset results for tests.
pub trait ScanPort: Send + Sync {
    /// Perform a scan and return all currently visible networks.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if the backend cannot complete the scan
    /// (permission denied, subprocess failure, unparsable output).
    fn scan(&self) -> Result<Vec<SignalReading>, ScanError>;
}
