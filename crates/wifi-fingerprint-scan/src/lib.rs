//! # wifi-fingerprint-scan
//!
//! Scan acquisition for location fingerprinting:
//!
//! - **Port**: [`ScanPort`] -- trait abstracting the platform scan backend
//! - **Adapters**: [`IwScanner`] (Linux, parses `iw dev <iface> scan`) and
//!   [`MockScanner`] (preset results, for tests and other platforms)
//! - **Session**: [`ScanSession`] -- the single-flight scan gate with its
//!   at-most-one pending capture intent
//! - **Service**: [`ScanService`] -- tokio wrapper delivering completion
//!   asynchronously with a bounded timeout and broadcast [`ScanEvent`]s

pub mod adapter;
pub mod error;
pub mod port;
pub mod service;
pub mod session;

pub use adapter::MockScanner;
pub use error::ScanError;
pub use port::ScanPort;
pub use service::{ScanEvent, ScanService, DEFAULT_SCAN_TIMEOUT};
pub use session::ScanSession;

#[cfg(target_os = "linux")]
pub use adapter::{parse_iw_scan_output, IwScanner};
