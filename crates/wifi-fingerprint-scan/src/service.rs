//! Async scan service.
//!
//! Wraps a [`ScanSession`] and a [`ScanPort`] so that scan completion is
//! delivered the way the system models it: the request returns immediately,
//! results arrive later through a notification channel. Subscribers observe
//! state changes as explicit [`ScanEvent`]s instead of implicit reactive
//! bindings.
//!
//! Scans run on the blocking thread pool under a bounded timeout; a stalled
//! backend becomes a reported [`ScanError::Timeout`] rather than a forever-
//! set scanning flag.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use wifi_fingerprint_core::{FingerprintRecord, SignalReading};

use crate::error::ScanError;
use crate::port::ScanPort;
use crate::session::ScanSession;

/// Upper bound on one scan round-trip before it is reported as failed.
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(15);

/// Capacity of the event channel; lagging subscribers drop oldest events.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// State-change notifications published by the [`ScanService`].
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A scan completed and the readings snapshot was replaced.
    ReadingsUpdated {
        /// Number of networks in the new snapshot.
        count: usize,
    },
    /// A queued capture was fulfilled; the subscriber should persist this.
    RecordCaptured(FingerprintRecord),
    /// The outstanding scan failed (backend error or timeout).
    ScanFailed {
        /// Human-readable failure description.
        reason: String,
    },
}

/// Tokio wrapper around the scan session.
///
/// Cloning is cheap; clones share the same session and event channel.
#[derive(Clone)]
pub struct ScanService {
    session: Arc<Mutex<ScanSession>>,
    port: Arc<dyn ScanPort>,
    events: broadcast::Sender<ScanEvent>,
    timeout: Duration,
}

impl ScanService {
    /// Creates a service over the given scan backend with the default timeout.
    #[must_use]
    pub fn new(port: Arc<dyn ScanPort>) -> Self {
        Self::with_timeout(port, DEFAULT_SCAN_TIMEOUT)
    }

    /// Creates a service with an explicit scan timeout.
    #[must_use]
    pub fn with_timeout(port: Arc<dyn ScanPort>, timeout: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Arc::new(Mutex::new(ScanSession::new())),
            port,
            events,
            timeout,
        }
    }

    /// Subscribes to state-change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.events.subscribe()
    }

    /// `true` while a scan is outstanding.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.session.lock().is_scanning()
    }

    /// The most recently completed scan snapshot.
    #[must_use]
    pub fn latest_readings(&self) -> Vec<SignalReading> {
        self.session.lock().latest_readings().to_vec()
    }

    /// Queues `location` for capture when the next scan completes.
    pub fn queue_capture(&self, location: impl Into<String>) {
        self.session.lock().queue_capture(location);
    }

    /// Builds a record from the current snapshot without a new scan.
    #[must_use]
    pub fn capture_now(&self, location: &str) -> FingerprintRecord {
        self.session.lock().capture_now(location)
    }

    /// Requests a scan.
    ///
    /// Returns `false` if one is already outstanding (single-flight gate).
    /// On acceptance the scan runs on the blocking pool; completion, capture,
    /// and failure are all reported through [`subscribe`](Self::subscribe).
    ///
    /// Must be called from within a tokio runtime.
    pub fn request_scan(&self) -> bool {
        if !self.session.lock().request_scan() {
            debug!("scan request rejected: already scanning");
            return false;
        }

        let session = Arc::clone(&self.session);
        let port = Arc::clone(&self.port);
        let events = self.events.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let scan = tokio::task::spawn_blocking(move || port.scan());
            let outcome = match tokio::time::timeout(timeout, scan).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => Err(ScanError::Process(join_err.to_string())),
                Err(_) => Err(ScanError::Timeout {
                    timeout_secs: timeout.as_secs(),
                }),
            };

            match outcome {
                Ok(readings) => {
                    let (count, captured) = {
                        let mut session = session.lock();
                        let captured = session.complete_scan(readings);
                        (session.latest_readings().len(), captured)
                    };
                    info!(networks = count, "scan complete");
                    let _ = events.send(ScanEvent::ReadingsUpdated { count });
                    if let Some(record) = captured {
                        info!(location = %record.location, "fingerprint captured");
                        let _ = events.send(ScanEvent::RecordCaptured(record));
                    }
                }
                Err(err) => {
                    warn!(error = %err, "scan failed");
                    session.lock().fail_scan();
                    let _ = events.send(ScanEvent::ScanFailed {
                        reason: err.to_string(),
                    });
                }
            }
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MockScanner;
    use wifi_fingerprint_core::MATRIX_SIZE;

    fn readings(levels: &[i32]) -> Vec<SignalReading> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &l)| SignalReading::new("Net", format!("aa:bb:cc:dd:ee:{i:02x}"), l, 2437))
            .collect()
    }

    #[tokio::test]
    async fn scan_publishes_readings_update() {
        let service = ScanService::new(Arc::new(MockScanner::returning(readings(&[-50, -60]))));
        let mut events = service.subscribe();

        assert!(service.request_scan());
        match events.recv().await.unwrap() {
            ScanEvent::ReadingsUpdated { count } => assert_eq!(count, 2),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(!service.is_scanning());
        assert_eq!(service.latest_readings().len(), 2);
    }

    #[tokio::test]
    async fn queued_capture_is_delivered_after_completion() {
        let service = ScanService::new(Arc::new(MockScanner::returning(readings(&[-40, -45]))));
        let mut events = service.subscribe();

        service.queue_capture("Location 1");
        assert!(service.request_scan());

        // First the snapshot update, then the captured record.
        assert!(matches!(
            events.recv().await.unwrap(),
            ScanEvent::ReadingsUpdated { count: 2 }
        ));
        match events.recv().await.unwrap() {
            ScanEvent::RecordCaptured(record) => {
                assert_eq!(record.location, "Location 1");
                assert_eq!(record.signal_matrix.len(), MATRIX_SIZE);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn backend_failure_is_reported_and_clears_the_gate() {
        let service = ScanService::new(Arc::new(MockScanner::failing(ScanError::ScanFailed {
            reason: "permission denied".to_owned(),
        })));
        let mut events = service.subscribe();

        service.queue_capture("Location 1");
        assert!(service.request_scan());

        match events.recv().await.unwrap() {
            ScanEvent::ScanFailed { reason } => assert!(reason.contains("permission denied")),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(!service.is_scanning());
    }

    #[tokio::test]
    async fn stalled_backend_times_out() {
        struct StallingScanner;
        impl ScanPort for StallingScanner {
            fn scan(&self) -> Result<Vec<SignalReading>, ScanError> {
                std::thread::sleep(Duration::from_millis(500));
                Ok(vec![])
            }
        }

        let service =
            ScanService::with_timeout(Arc::new(StallingScanner), Duration::from_millis(20));
        let mut events = service.subscribe();

        assert!(service.request_scan());
        match events.recv().await.unwrap() {
            ScanEvent::ScanFailed { reason } => assert!(reason.contains("timed out")),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(!service.is_scanning());
    }

    #[tokio::test]
    async fn single_flight_gate_rejects_concurrent_requests() {
        struct SlowScanner;
        impl ScanPort for SlowScanner {
            fn scan(&self) -> Result<Vec<SignalReading>, ScanError> {
                std::thread::sleep(Duration::from_millis(100));
                Ok(vec![])
            }
        }

        let service = ScanService::new(Arc::new(SlowScanner));
        let mut events = service.subscribe();

        assert!(service.request_scan());
        assert!(!service.request_scan());

        assert!(matches!(
            events.recv().await.unwrap(),
            ScanEvent::ReadingsUpdated { count: 0 }
        ));
        // Gate released; a new request is accepted again.
        assert!(service.request_scan());
    }
}
