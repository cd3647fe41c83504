//! # wifi-fingerprint-core
//!
//! Domain layer for WiFi location fingerprinting.
//!
//! This crate implements the two pieces of non-trivial logic in the system:
//!
//! - **Fingerprint Builder** ([`builder`]): normalizes a variable-count list
//!   of scan readings into a fixed 100-entry signal matrix, with statistical
//!   expansion when too few readings exist.
//! - **Cross-Location Analyzer** ([`analyzer`]): computes aggregate difference
//!   statistics and per-network presence/variance statistics over two or more
//!   stored fingerprints.
//!
//! Both are pure functions over immutable snapshots; the builder additionally
//! takes an injectable randomness source so expansion output is reproducible
//! under test.

pub mod analyzer;
pub mod builder;
pub mod domain;
pub mod error;

// Re-export key types at the crate root for convenience.
pub use analyzer::{compare, AccessPointStats, ComparisonResult, UNRESOLVED_SSID};
pub use builder::{build, build_with_rng};
pub use domain::matrix::SignalMatrix;
pub use domain::reading::{SignalReading, HIDDEN_SSID_PLACEHOLDER};
pub use domain::record::{FingerprintRecord, PREDEFINED_LOCATIONS};
pub use error::{CoreError, CoreResult};

/// Number of entries in every signal matrix.
pub const MATRIX_SIZE: usize = 100;

/// Weakest representable signal level in dBm; the "no signal" floor.
pub const SIGNAL_FLOOR_DBM: i32 = -100;
