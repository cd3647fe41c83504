//! Cross-location comparison statistics.
//!
//! Matrix-level statistics compare vectors **by index position**, not by
//! network identity: entry `k` of one location's matrix is diffed against
//! entry `k` of another's even though statistical expansion and shuffling
//! mean those positions rarely describe the same access point. This is a
//! known crudeness of the original design, preserved here for compatibility
//! and deliberately not extended. The per-network statistics below are the
//! identity-aware view.
//!
//! Everything here is derived fresh from the passed records and never
//! persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::reading::HIDDEN_SSID_PLACEHOLDER;
use crate::domain::record::FingerprintRecord;

/// Display name for an access point whose SSID was never resolved.
pub const UNRESOLVED_SSID: &str = "<Unknown>";

/// Aggregate statistics across two or more location fingerprints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Mean of all pooled pairwise element differences, truncated toward zero.
    pub average_difference: i32,
    /// Maximum pooled pairwise element difference.
    pub max_difference: i32,
    /// Per-access-point statistics, most variable networks first.
    pub access_points: Vec<AccessPointStats>,
}

/// Presence and variance of one access point across locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessPointStats {
    /// Hardware address (the grouping key).
    pub bssid: String,
    /// Best display name seen for this BSSID across all locations.
    pub ssid: String,
    /// max(level) - min(level) across locations; 0 if seen at only one.
    pub signal_difference: i32,
    /// Signal level at each location where this access point was observed.
    pub levels_by_location: BTreeMap<String, i32>,
}

impl AccessPointStats {
    /// Labels of the locations where this access point was observed.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.levels_by_location.keys().map(String::as_str)
    }
}

/// Computes cross-location statistics over the given records.
///
/// Fewer than two records yield the zero-valued default result; this is a
/// defined fallback, not an error. Matrices are assumed builder-produced
/// (loaders re-validate length before records reach this point).
#[must_use]
pub fn compare(records: &[FingerprintRecord]) -> ComparisonResult {
    if records.len() < 2 {
        return ComparisonResult::default();
    }

    // Pool element-wise absolute differences over every unordered pair.
    let mut diffs: Vec<i32> = Vec::new();
    for i in 0..records.len() - 1 {
        for j in i + 1..records.len() {
            let a = records[i].signal_matrix.as_slice();
            let b = records[j].signal_matrix.as_slice();
            diffs.extend(a.iter().zip(b).map(|(x, y)| (x - y).abs()));
        }
    }

    let average_difference = if diffs.is_empty() {
        0
    } else {
        let sum: i64 = diffs.iter().map(|&d| i64::from(d)).sum();
        (sum as f64 / diffs.len() as f64) as i32
    };
    let max_difference = diffs.iter().copied().max().unwrap_or(0);

    ComparisonResult {
        average_difference,
        max_difference,
        access_points: access_point_stats(records),
    }
}

/// Groups raw readings by BSSID and computes per-network statistics.
fn access_point_stats(records: &[FingerprintRecord]) -> Vec<AccessPointStats> {
    // level per (bssid, location); a repeated BSSID within one scan keeps the
    // last reading, matching how the snapshot was captured.
    let mut levels: BTreeMap<&str, BTreeMap<String, i32>> = BTreeMap::new();
    // Best display name seen so far for each BSSID.
    let mut names: BTreeMap<&str, &str> = BTreeMap::new();

    for record in records {
        for reading in &record.scan_results {
            levels
                .entry(&reading.bssid)
                .or_default()
                .insert(record.location.clone(), reading.level_dbm);

            if reading.ssid != HIDDEN_SSID_PLACEHOLDER {
                names.insert(&reading.bssid, &reading.ssid);
            } else {
                names.entry(&reading.bssid).or_insert(&reading.ssid);
            }
        }
    }

    let mut stats: Vec<AccessPointStats> = levels
        .into_iter()
        .map(|(bssid, by_location)| {
            let signal_difference = if by_location.len() >= 2 {
                let max = by_location.values().max().copied().unwrap_or(0);
                let min = by_location.values().min().copied().unwrap_or(0);
                max - min
            } else {
                0
            };
            AccessPointStats {
                ssid: names.get(bssid).map_or_else(
                    || UNRESOLVED_SSID.to_owned(),
                    |&name| name.to_owned(),
                ),
                bssid: bssid.to_owned(),
                signal_difference,
                levels_by_location: by_location,
            }
        })
        .collect();

    // Most variable networks surface first.
    stats.sort_by(|a, b| b.signal_difference.cmp(&a.signal_difference));
    stats
}
