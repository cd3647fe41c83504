//! Error types for the fingerprinting domain.
//!
//! The core is designed to never fail on valid-shape input: an empty scan
//! produces the floor matrix, too few records produce zero-valued statistics.
//! The one genuine error path is re-validating a signal matrix that arrived
//! from untrusted storage before anything indexes into it by position.

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by the fingerprinting domain.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// A signal matrix does not have exactly the required number of entries.
    #[error("invalid signal matrix: expected {expected} entries, got {actual}")]
    InvalidMatrixLength {
        /// Required entry count.
        expected: usize,
        /// Entry count actually present.
        actual: usize,
    },
}
