//! Fingerprint construction.
//!
//! Normalizes a variable-count list of scan readings into a fixed
//! [`MATRIX_SIZE`]-entry signal matrix:
//!
//! - no readings: the all-floor sentinel matrix
//! - 100 or more readings: the 100 strongest, sorted descending
//! - fewer than 100 readings: the real readings sorted descending, padded to
//!   100 with statistically expanded synthetic values
//!
//! Statistical expansion cyclically reuses the real readings as seeds, adds a
//! bounded uniform offset derived from the sample standard deviation, and
//! clamps the result near the observed range. The real-data head keeps its
//! sorted order and position so genuine readings stay inspectable; only the
//! synthetic tail is shuffled.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::matrix::SignalMatrix;
use crate::domain::reading::SignalReading;
use crate::MATRIX_SIZE;

/// Fallback sample standard deviation in dBm when only one reading exists.
///
/// Avoids the undefined `n - 1` divisor and models minimal uncertainty
/// around a single observation.
const SINGLE_READING_STDDEV: f64 = 2.0;

/// Synthetic values may undershoot the weakest real reading by this much.
const CLAMP_BELOW_MIN: i32 = 5;

/// Synthetic values may overshoot the strongest real reading by this much.
const CLAMP_ABOVE_MAX: i32 = 3;

/// Builds a signal matrix from a scan snapshot using thread-local randomness.
///
/// Every input length has defined behavior; this never fails.
#[must_use]
pub fn build(readings: &[SignalReading]) -> SignalMatrix {
    build_with_rng(readings, &mut rand::thread_rng())
}

/// Builds a signal matrix with an explicit randomness source.
///
/// The expansion offsets and tail shuffle draw from `rng`, so a seeded
/// generator makes the output reproducible.
pub fn build_with_rng<R: Rng + ?Sized>(readings: &[SignalReading], rng: &mut R) -> SignalMatrix {
    if readings.is_empty() {
        return SignalMatrix::floor();
    }

    let mut levels: Vec<i32> = readings.iter().map(|r| r.level_dbm).collect();
    // Strongest first; stable, so equal strengths keep their input order.
    levels.sort_by(|a, b| b.cmp(a));

    if levels.len() >= MATRIX_SIZE {
        levels.truncate(MATRIX_SIZE);
        return SignalMatrix::new_unchecked(levels);
    }

    expand(levels, rng)
}

/// Statistical expansion for `1 <= n < MATRIX_SIZE` real readings.
///
/// `base` must be non-empty and sorted descending.
fn expand<R: Rng + ?Sized>(base: Vec<i32>, rng: &mut R) -> SignalMatrix {
    let n = base.len();
    let max = base[0];
    let min = base[n - 1];
    let stddev = sample_stddev(&base);
    let lo = min - CLAMP_BELOW_MIN;
    let hi = max + CLAMP_ABOVE_MAX;

    let mut synthetic: Vec<i32> = (0..MATRIX_SIZE - n)
        .map(|it| {
            let seed = base[it % n];
            let offset = rng.gen_range(-stddev..=stddev) * 0.5;
            // Truncate toward zero, then keep near the observed range.
            let value = (f64::from(seed) + offset) as i32;
            value.clamp(lo, hi)
        })
        .collect();
    synthetic.shuffle(rng);

    let mut entries = base;
    entries.extend(synthetic);
    SignalMatrix::new_unchecked(entries)
}

/// Sample standard deviation with divisor `n - 1`.
///
/// Falls back to [`SINGLE_READING_STDDEV`] for fewer than two values.
fn sample_stddev(values: &[i32]) -> f64 {
    if values.len() < 2 {
        return SINGLE_READING_STDDEV;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let m2: f64 = values
        .iter()
        .map(|&v| (f64::from(v) - mean).powi(2))
        .sum();
    (m2 / (n - 1.0)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SIGNAL_FLOOR_DBM;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reading(level_dbm: i32) -> SignalReading {
        SignalReading::new("Net", "aa:bb:cc:dd:ee:ff", level_dbm, 2437)
    }

    #[test]
    fn empty_scan_yields_floor_matrix() {
        let matrix = build(&[]);
        assert_eq!(matrix.len(), MATRIX_SIZE);
        assert!(matrix.as_slice().iter().all(|&v| v == SIGNAL_FLOOR_DBM));
    }

    #[test]
    fn exactly_one_hundred_readings_pass_through_sorted() {
        let readings: Vec<SignalReading> = (0..100).map(|i| reading(-30 - i)).collect();
        let matrix = build(&readings);
        let expected: Vec<i32> = (0..100).map(|i| -30 - i).collect();
        assert_eq!(matrix.as_slice(), expected.as_slice());
    }

    #[test]
    fn overfull_scan_keeps_the_strongest_hundred() {
        // 150 readings from -30 down to -179; the strongest 100 survive.
        let readings: Vec<SignalReading> = (0..150).map(|i| reading(-30 - i)).collect();
        let matrix = build(&readings);
        assert_eq!(matrix.len(), MATRIX_SIZE);
        let expected: Vec<i32> = (0..100).map(|i| -30 - i).collect();
        assert_eq!(matrix.as_slice(), expected.as_slice());
    }

    #[test]
    fn expansion_keeps_real_head_and_bounds_synthetic_tail() {
        let readings: Vec<SignalReading> =
            [-40, -45, -50, -55, -60].iter().map(|&l| reading(l)).collect();
        let matrix = build(&readings);
        assert_eq!(matrix.len(), MATRIX_SIZE);
        assert_eq!(&matrix.as_slice()[..5], &[-40, -45, -50, -55, -60]);
        // Remaining 95 entries lie in [min - 5, max + 3] = [-65, -37].
        assert!(matrix.as_slice()[5..].iter().all(|&v| (-65..=-37).contains(&v)));
    }

    #[test]
    fn expansion_sorts_unsorted_input_first() {
        let readings: Vec<SignalReading> =
            [-60, -40, -55, -45, -50].iter().map(|&l| reading(l)).collect();
        let matrix = build(&readings);
        assert_eq!(&matrix.as_slice()[..5], &[-40, -45, -50, -55, -60]);
    }

    #[test]
    fn single_reading_uses_fallback_stddev() {
        let matrix = build(&[reading(-50)]);
        assert_eq!(matrix.len(), MATRIX_SIZE);
        assert_eq!(matrix.as_slice()[0], -50);
        // Offsets from +-1.0 dBm around -50, clamped into [-55, -47].
        assert!(matrix.as_slice()[1..].iter().all(|&v| (-55..=-47).contains(&v)));
    }

    #[test]
    fn seeded_rng_makes_expansion_reproducible() {
        let readings: Vec<SignalReading> =
            [-40, -45, -50, -55, -60].iter().map(|&l| reading(l)).collect();
        let a = build_with_rng(&readings, &mut StdRng::seed_from_u64(7));
        let b = build_with_rng(&readings, &mut StdRng::seed_from_u64(7));
        let c = build_with_rng(&readings, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        // Different seeds almost surely differ somewhere in the 95-entry tail.
        assert_ne!(a, c);
    }

    #[test]
    fn all_lengths_produce_exactly_one_hundred_entries() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 0..=130 {
            let readings: Vec<SignalReading> = (0..n).map(|i| reading(-40 - (i % 50))).collect();
            let matrix = build_with_rng(&readings, &mut rng);
            assert_eq!(matrix.len(), MATRIX_SIZE, "n = {n}");
        }
    }

    #[test]
    fn equal_strength_ties_are_stable() {
        // 120 readings, all -50: truncation must not reorder anything visible
        // (all values equal), and output is all -50.
        let readings: Vec<SignalReading> = (0..120).map(|_| reading(-50)).collect();
        let matrix = build(&readings);
        assert!(matrix.as_slice().iter().all(|&v| v == -50));
    }

    #[test]
    fn sample_stddev_matches_hand_computation() {
        // Values -40..-60 step 5: mean -50, sample variance 62.5.
        let sd = sample_stddev(&[-40, -45, -50, -55, -60]);
        assert!((sd - 62.5_f64.sqrt()).abs() < 1e-9);
        assert!((sample_stddev(&[-50]) - SINGLE_READING_STDDEV).abs() < f64::EPSILON);
    }
}
