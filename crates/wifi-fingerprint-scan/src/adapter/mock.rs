//! Deterministic scanner for tests and unsupported platforms.

use parking_lot::Mutex;
use wifi_fingerprint_core::SignalReading;

use crate::error::ScanError;
use crate::port::ScanPort;

/// A [`ScanPort`] that returns preset readings (or a preset error) and
/// counts how many scans were requested.
pub struct MockScanner {
    result: Mutex<Result<Vec<SignalReading>, ScanError>>,
    scans: Mutex<usize>,
}

impl MockScanner {
    /// Scanner that always returns the given readings.
    #[must_use]
    pub fn returning(readings: Vec<SignalReading>) -> Self {
        Self {
            result: Mutex::new(Ok(readings)),
            scans: Mutex::new(0),
        }
    }

    /// Scanner that always fails with the given error.
    #[must_use]
    pub fn failing(error: ScanError) -> Self {
        Self {
            result: Mutex::new(Err(error)),
            scans: Mutex::new(0),
        }
    }

    /// Replace the result returned by subsequent scans.
    pub fn set_result(&self, result: Result<Vec<SignalReading>, ScanError>) {
        *self.result.lock() = result;
    }

    /// Number of times [`ScanPort::scan`] was called.
    #[must_use]
    pub fn scan_count(&self) -> usize {
        *self.scans.lock()
    }
}

impl ScanPort for MockScanner {
    fn scan(&self) -> Result<Vec<SignalReading>, ScanError> {
        *self.scans.lock() += 1;
        self.result.lock().clone()
    }
}
