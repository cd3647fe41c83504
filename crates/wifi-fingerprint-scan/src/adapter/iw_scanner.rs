//! Adapter that scans WiFi networks on Linux by invoking `iw dev <iface> scan`.
//!
//! # Design
//!
//! The adapter shells out to `iw dev <interface> scan` (or
//! `iw dev <interface> scan dump` to read cached results without triggering a
//! new scan, which requires root). The output is parsed into
//! [`SignalReading`] values.
//!
//! # Permissions
//!
//! - `iw dev <iface> scan` requires `CAP_NET_ADMIN` (typically root).
//! - `iw dev <iface> scan dump` reads cached results and may work without
//!   root on some distributions.
//!
//! # Platform
//!
//! Linux only. Gated behind `#[cfg(target_os = "linux")]` at the module level.

use std::process::Command;

use tracing::debug;
use wifi_fingerprint_core::SignalReading;

use crate::error::ScanError;
use crate::port::ScanPort;

// ---------------------------------------------------------------------------
// IwScanner
// ---------------------------------------------------------------------------

/// Synchronous WiFi scanner that shells out to `iw dev <interface> scan`.
///
/// Each [`scan`](ScanPort::scan) call spawns a subprocess, captures stdout,
/// and parses the BSS stanzas into [`SignalReading`] values.
pub struct IwScanner {
    /// Wireless interface name (e.g. `"wlan0"`, `"wlp2s0"`).
    interface: String,
    /// If true, use `scan dump` (cached results) instead of triggering a new
    /// scan. Avoids the root requirement but may return stale data.
    use_dump: bool,
}

impl IwScanner {
    /// Create a scanner for the default interface `wlan0`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interface("wlan0")
    }

    /// Create a scanner for a specific wireless interface.
    pub fn with_interface(iface: impl Into<String>) -> Self {
        Self {
            interface: iface.into(),
            use_dump: false,
        }
    }

    /// Use `scan dump` instead of `scan` to read cached results without root.
    #[must_use]
    pub fn use_cached(mut self) -> Self {
        self.use_dump = true;
        self
    }
}

impl Default for IwScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanPort for IwScanner {
    fn scan(&self) -> Result<Vec<SignalReading>, ScanError> {
        let args = if self.use_dump {
            vec!["dev", self.interface.as_str(), "scan", "dump"]
        } else {
            vec!["dev", self.interface.as_str(), "scan"]
        };

        debug!(interface = %self.interface, cached = self.use_dump, "running iw scan");

        let output = Command::new("iw").args(&args).output().map_err(|e| {
            ScanError::Process(format!("failed to run `iw {}`: {e}", args.join(" ")))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::ScanFailed {
                reason: format!("iw exited with {}: {}", output.status, stderr.trim()),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_iw_scan_output(&stdout))
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Intermediate accumulator for fields within a single BSS stanza.
#[derive(Default)]
struct BssStanza {
    bssid: Option<String>,
    ssid: Option<String>,
    signal_dbm: Option<f64>,
    freq_mhz: Option<i32>,
}

impl BssStanza {
    /// Flush this stanza into a [`SignalReading`], if we have enough data.
    fn flush(self) -> Option<SignalReading> {
        let bssid = self.bssid?;
        // Truncate the driver's fractional dBm; a missing field is treated
        // as a very weak signal rather than dropping the network.
        let level_dbm = self.signal_dbm.unwrap_or(-90.0) as i32;
        Some(SignalReading::new(
            self.ssid.unwrap_or_default(),
            bssid,
            level_dbm,
            self.freq_mhz.unwrap_or(0),
        ))
    }
}

/// Parse the text output of `iw dev <iface> scan [dump]`.
///
/// The output consists of BSS stanzas, each starting with:
/// ```text
/// BSS aa:bb:cc:dd:ee:ff(on wlan0)
/// ```
/// followed by indented key-value lines.
pub fn parse_iw_scan_output(output: &str) -> Vec<SignalReading> {
    let mut results = Vec::new();
    let mut current: Option<BssStanza> = None;

    for line in output.lines() {
        // New BSS stanza starts with "BSS " at column 0.
        if let Some(rest) = line.strip_prefix("BSS ") {
            if let Some(stanza) = current.take() {
                if let Some(reading) = stanza.flush() {
                    results.push(reading);
                }
            }

            // "BSS aa:bb:cc:dd:ee:ff(on wlan0)" or
            // "BSS aa:bb:cc:dd:ee:ff -- associated".
            let mac_end = rest
                .find(|c: char| !c.is_ascii_hexdigit() && c != ':')
                .unwrap_or(rest.len());
            let mac = &rest[..mac_end];

            if mac.len() == 17 {
                current = Some(BssStanza {
                    bssid: Some(mac.to_lowercase()),
                    ..BssStanza::default()
                });
            }
            continue;
        }

        // Indented lines belong to the current stanza.
        let trimmed = line.trim();
        if let Some(ref mut stanza) = current {
            if let Some(rest) = trimmed.strip_prefix("SSID:") {
                stanza.ssid = Some(rest.trim().to_owned());
            } else if let Some(rest) = trimmed.strip_prefix("signal:") {
                // "signal: -52.00 dBm"
                stanza.signal_dbm = parse_signal_dbm(rest);
            } else if let Some(rest) = trimmed.strip_prefix("freq:") {
                // "freq: 5180"
                stanza.freq_mhz = rest.trim().parse().ok();
            }
        }
    }

    if let Some(stanza) = current.take() {
        if let Some(reading) = stanza.flush() {
            results.push(reading);
        }
    }

    results
}

/// Parse a signal strength string like "-52.00 dBm" into dBm.
fn parse_signal_dbm(s: &str) -> Option<f64> {
    s.trim().split_whitespace().next()?.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wifi_fingerprint_core::HIDDEN_SSID_PLACEHOLDER;

    /// Real-world `iw dev wlan0 scan` output (truncated to 3 BSSes).
    const SAMPLE_IW_OUTPUT: &str = "\
BSS aa:bb:cc:dd:ee:ff(on wlan0)
\tTSF: 123456789 usec
\tfreq: 5180
\tbeacon interval: 100 TUs
\tcapability: ESS Privacy (0x0011)
\tsignal: -52.00 dBm
\tSSID: HomeNetwork
\tDS Parameter set: channel 36
BSS 11:22:33:44:55:66(on wlan0)
\tfreq: 2437
\tsignal: -71.00 dBm
\tSSID: GuestWifi
BSS de:ad:be:ef:ca:fe(on wlan0) -- associated
\tfreq: 5745
\tsignal: -45.00 dBm
\tSSID: OfficeNet
";

    #[test]
    fn parse_three_bss_stanzas() {
        let readings = parse_iw_scan_output(SAMPLE_IW_OUTPUT);
        assert_eq!(readings.len(), 3);

        assert_eq!(readings[0].ssid, "HomeNetwork");
        assert_eq!(readings[0].bssid, "aa:bb:cc:dd:ee:ff");
        assert_eq!(readings[0].level_dbm, -52);
        assert_eq!(readings[0].frequency_mhz, 5180);

        assert_eq!(readings[1].ssid, "GuestWifi");
        assert_eq!(readings[1].frequency_mhz, 2437);

        // "-- associated" suffix on the header line.
        assert_eq!(readings[2].bssid, "de:ad:be:ef:ca:fe");
        assert_eq!(readings[2].level_dbm, -45);
    }

    #[test]
    fn hidden_network_gets_placeholder_ssid() {
        let output = "\
BSS 00:11:22:33:44:55(on wlan0)
\tfreq: 2412
\tsignal: -80.00 dBm
\tSSID:
";
        let readings = parse_iw_scan_output(output);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].ssid, HIDDEN_SSID_PLACEHOLDER);
    }

    #[test]
    fn fractional_signal_truncates_toward_zero() {
        let output = "\
BSS 00:11:22:33:44:55(on wlan0)
\tfreq: 2412
\tsignal: -67.80 dBm
\tSSID: Frac
";
        let readings = parse_iw_scan_output(output);
        assert_eq!(readings[0].level_dbm, -67);
    }

    #[test]
    fn parse_signal_dbm_values() {
        assert!((parse_signal_dbm(" -52.00 dBm").unwrap() - (-52.0)).abs() < f64::EPSILON);
        assert!((parse_signal_dbm("-45.00").unwrap() - (-45.0)).abs() < f64::EPSILON);
        assert!(parse_signal_dbm("").is_none());
    }

    #[test]
    fn empty_output_yields_no_readings() {
        assert!(parse_iw_scan_output("").is_empty());
        assert!(parse_iw_scan_output("garbage\nlines\n").is_empty());
    }

    #[test]
    fn malformed_bss_header_is_skipped() {
        let output = "\
BSS not-a-mac(on wlan0)
\tsignal: -50.00 dBm
\tSSID: Broken
";
        assert!(parse_iw_scan_output(output).is_empty());
    }
}
