//! Error types for scan acquisition.

use thiserror::Error;

/// Errors that can occur while acquiring a scan.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ScanError {
    /// The scan backend reported a failure.
    #[error("WiFi scan failed: {reason}")]
    ScanFailed {
        /// Human-readable description of what went wrong.
        reason: String,
    },

    /// Failed to execute the scan subprocess.
    #[error("scan process error: {0}")]
    Process(String),

    /// The scan did not complete within the configured bound.
    #[error("scan timed out after {timeout_secs}s")]
    Timeout {
        /// The bound that was exceeded, in seconds.
        timeout_secs: u64,
    },

    /// No scan adapter is available on this platform.
    #[error("unsupported platform: {0}")]
    Unsupported(String),
}
