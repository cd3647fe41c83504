//! The signal reading value object.

use serde::{Deserialize, Serialize};

/// Placeholder SSID recorded for networks that do not broadcast a name.
pub const HIDDEN_SSID_PLACEHOLDER: &str = "<Hidden Network>";

/// A single observed wireless network at scan time.
///
/// This is the fundamental measurement unit: one access point observed once
/// during one scan. Immutable once captured. The BSSID is the stable unique
/// key; SSIDs may repeat across access points or be absent entirely.
///
/// Duplicate BSSIDs within one scan are allowed and treated as independent
/// samples, never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReading {
    /// Network name, or [`HIDDEN_SSID_PLACEHOLDER`] when not broadcast.
    pub ssid: String,
    /// Hardware (MAC) address of the access point.
    pub bssid: String,
    /// Received signal strength in dBm (typically -100 to -30).
    #[serde(rename = "level")]
    pub level_dbm: i32,
    /// Channel frequency in MHz.
    #[serde(rename = "frequency")]
    pub frequency_mhz: i32,
}

impl SignalReading {
    /// Creates a reading, substituting the hidden placeholder for an empty SSID.
    #[must_use]
    pub fn new(
        ssid: impl Into<String>,
        bssid: impl Into<String>,
        level_dbm: i32,
        frequency_mhz: i32,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            bssid: bssid.into(),
            level_dbm,
            frequency_mhz,
        }
        .normalized()
    }

    /// Replaces an empty SSID with [`HIDDEN_SSID_PLACEHOLDER`].
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.ssid.is_empty() {
            self.ssid = HIDDEN_SSID_PLACEHOLDER.to_owned();
        }
        self
    }

    /// Returns `true` if this network did not broadcast a name.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.ssid == HIDDEN_SSID_PLACEHOLDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ssid_becomes_hidden_placeholder() {
        let reading = SignalReading::new("", "aa:bb:cc:dd:ee:ff", -60, 2437);
        assert_eq!(reading.ssid, HIDDEN_SSID_PLACEHOLDER);
        assert!(reading.is_hidden());
    }

    #[test]
    fn named_ssid_is_kept() {
        let reading = SignalReading::new("HomeNetwork", "aa:bb:cc:dd:ee:ff", -52, 5180);
        assert_eq!(reading.ssid, "HomeNetwork");
        assert!(!reading.is_hidden());
    }

    #[test]
    fn wire_field_names() {
        let reading = SignalReading::new("Net", "11:22:33:44:55:66", -70, 2412);
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["level"], -70);
        assert_eq!(json["frequency"], 2412);
        assert_eq!(json["ssid"], "Net");
        assert_eq!(json["bssid"], "11:22:33:44:55:66");
    }
}
