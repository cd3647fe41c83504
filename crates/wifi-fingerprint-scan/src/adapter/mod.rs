//! Adapter implementations for the [`ScanPort`](crate::port::ScanPort) port.
//!
//! - [`IwScanner`]: parses `iw dev <iface> scan` output (Linux).
//! - [`MockScanner`]: preset readings or a preset error, for tests and as a
//!   stand-in on platforms without a native adapter.

pub mod mock;

#[cfg(target_os = "linux")]
pub mod iw_scanner;

pub use mock::MockScanner;

#[cfg(target_os = "linux")]
pub use iw_scanner::{parse_iw_scan_output, IwScanner};
