//! The scan session state machine.
//!
//! Holds the three pieces of mutable state the system needs between a scan
//! request and its asynchronous completion:
//!
//! - the latest completed scan snapshot
//! - a single-flight `scanning` gate (one scan outstanding at a time)
//! - at most one pending "capture after this scan completes" intent
//!
//! The machine is synchronous and caller-driven; [`crate::ScanService`]
//! wraps it for async delivery. Fingerprint building and comparison stay
//! pure, so no further synchronization is needed around them.

use wifi_fingerprint_core::{builder, FingerprintRecord, SignalReading};

/// Scan state between a request and its completion.
#[derive(Debug, Default)]
pub struct ScanSession {
    /// Snapshot from the most recently completed scan.
    latest_readings: Vec<SignalReading>,
    /// Single-flight gate: `true` while a scan is outstanding.
    scanning: bool,
    /// Location queued for auto-capture when the current scan completes.
    pending_capture: Option<String>,
}

impl ScanSession {
    /// Creates an idle session with no readings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a scan is outstanding.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// The most recently completed scan snapshot.
    #[must_use]
    pub fn latest_readings(&self) -> &[SignalReading] {
        &self.latest_readings
    }

    /// The location waiting for auto-capture, if any.
    #[must_use]
    pub fn pending_capture(&self) -> Option<&str> {
        self.pending_capture.as_deref()
    }

    /// Claims the single-flight gate.
    ///
    /// Returns `false` (request rejected) if a scan is already outstanding.
    pub fn request_scan(&mut self) -> bool {
        if self.scanning {
            return false;
        }
        self.scanning = true;
        true
    }

    /// Queues `location` for capture when the next scan completes.
    ///
    /// A newer intent supersedes an older one; at most one is held.
    pub fn queue_capture(&mut self, location: impl Into<String>) {
        self.pending_capture = Some(location.into());
    }

    /// Applies a completed scan: stores the snapshot, clears the gate, and
    /// fulfills a pending capture if one was queued.
    ///
    /// Returns the freshly built record when a capture was pending; the
    /// caller is responsible for persisting it.
    pub fn complete_scan(&mut self, readings: Vec<SignalReading>) -> Option<FingerprintRecord> {
        self.latest_readings = readings
            .into_iter()
            .map(SignalReading::normalized)
            .collect();
        self.scanning = false;

        let location = self.pending_capture.take()?;
        Some(self.build_record(&location))
    }

    /// Marks the outstanding scan as failed.
    ///
    /// Clears the gate and drops any pending capture intent; the last good
    /// snapshot is kept.
    pub fn fail_scan(&mut self) {
        self.scanning = false;
        self.pending_capture = None;
    }

    /// Builds a record for `location` from the current snapshot immediately,
    /// without waiting for a new scan.
    #[must_use]
    pub fn capture_now(&self, location: &str) -> FingerprintRecord {
        self.build_record(location)
    }

    fn build_record(&self, location: &str) -> FingerprintRecord {
        let matrix = builder::build(&self.latest_readings);
        FingerprintRecord::capture(location, matrix, self.latest_readings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifi_fingerprint_core::{MATRIX_SIZE, SIGNAL_FLOOR_DBM};

    fn readings(levels: &[i32]) -> Vec<SignalReading> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &l)| SignalReading::new("Net", format!("aa:bb:cc:dd:ee:{i:02x}"), l, 2437))
            .collect()
    }

    #[test]
    fn second_request_is_rejected_while_scanning() {
        let mut session = ScanSession::new();
        assert!(session.request_scan());
        assert!(!session.request_scan());
        session.complete_scan(vec![]);
        assert!(session.request_scan());
    }

    #[test]
    fn completion_stores_snapshot_and_clears_gate() {
        let mut session = ScanSession::new();
        session.request_scan();
        let captured = session.complete_scan(readings(&[-50, -60]));
        assert!(captured.is_none());
        assert!(!session.is_scanning());
        assert_eq!(session.latest_readings().len(), 2);
    }

    #[test]
    fn queued_capture_fires_exactly_once() {
        let mut session = ScanSession::new();
        session.queue_capture("Location 1");
        session.request_scan();

        let record = session.complete_scan(readings(&[-40, -45, -50])).unwrap();
        assert_eq!(record.location, "Location 1");
        assert_eq!(record.signal_matrix.len(), MATRIX_SIZE);
        assert_eq!(record.scan_results.len(), 3);

        // The intent is consumed; the next completion captures nothing.
        session.request_scan();
        assert!(session.complete_scan(readings(&[-40])).is_none());
    }

    #[test]
    fn newer_capture_intent_supersedes_older() {
        let mut session = ScanSession::new();
        session.queue_capture("Location 1");
        session.queue_capture("Location 2");
        session.request_scan();
        let record = session.complete_scan(readings(&[-40])).unwrap();
        assert_eq!(record.location, "Location 2");
    }

    #[test]
    fn failure_clears_gate_and_intent_but_keeps_snapshot() {
        let mut session = ScanSession::new();
        session.request_scan();
        session.complete_scan(readings(&[-50]));

        session.queue_capture("Location 1");
        session.request_scan();
        session.fail_scan();

        assert!(!session.is_scanning());
        assert!(session.pending_capture().is_none());
        assert_eq!(session.latest_readings().len(), 1);
    }

    #[test]
    fn capture_from_empty_snapshot_is_the_floor_record() {
        let session = ScanSession::new();
        let record = session.capture_now("Location 3");
        assert!(record.scan_results.is_empty());
        assert!(record
            .signal_matrix
            .as_slice()
            .iter()
            .all(|&v| v == SIGNAL_FLOOR_DBM));
    }

    #[test]
    fn completion_normalizes_hidden_ssids() {
        let mut session = ScanSession::new();
        session.request_scan();
        session.complete_scan(vec![SignalReading {
            ssid: String::new(),
            bssid: "aa:bb:cc:dd:ee:ff".to_owned(),
            level_dbm: -70,
            frequency_mhz: 2412,
        }]);
        assert!(session.latest_readings()[0].is_hidden());
    }
}
