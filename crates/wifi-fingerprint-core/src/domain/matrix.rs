//! The fixed-length signal matrix.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::{MATRIX_SIZE, SIGNAL_FLOOR_DBM};

/// A location's signal profile: an ordered vector of exactly
/// [`MATRIX_SIZE`] dBm values, some real and some synthetic.
///
/// The builder upholds the length invariant for every matrix it produces.
/// Deserialization does **not** re-validate (stored data may predate the
/// invariant), so loaders must call [`SignalMatrix::validate`] before any
/// positional access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalMatrix(Vec<i32>);

impl SignalMatrix {
    /// The all-floor matrix: [`MATRIX_SIZE`] copies of [`SIGNAL_FLOOR_DBM`].
    ///
    /// Represents "no signal observed" so that comparisons against a
    /// populated location still yield meaningful differences.
    #[must_use]
    pub fn floor() -> Self {
        Self(vec![SIGNAL_FLOOR_DBM; MATRIX_SIZE])
    }

    /// Creates a matrix from a vector, validating the length invariant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMatrixLength`] unless the vector has
    /// exactly [`MATRIX_SIZE`] entries.
    pub fn from_vec(entries: Vec<i32>) -> CoreResult<Self> {
        if entries.len() != MATRIX_SIZE {
            return Err(CoreError::InvalidMatrixLength {
                expected: MATRIX_SIZE,
                actual: entries.len(),
            });
        }
        Ok(Self(entries))
    }

    /// Creates a matrix without validation (builder-internal).
    pub(crate) fn new_unchecked(entries: Vec<i32>) -> Self {
        debug_assert_eq!(entries.len(), MATRIX_SIZE);
        Self(entries)
    }

    /// Checks the length invariant on a matrix of untrusted origin.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMatrixLength`] on a size mismatch.
    pub fn validate(&self) -> CoreResult<()> {
        if self.0.len() != MATRIX_SIZE {
            return Err(CoreError::InvalidMatrixLength {
                expected: MATRIX_SIZE,
                actual: self.0.len(),
            });
        }
        Ok(())
    }

    /// The matrix entries in order.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Number of entries actually present.
    ///
    /// Always [`MATRIX_SIZE`] for builder-produced matrices; may differ for
    /// matrices deserialized from corrupt storage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the matrix holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SignalMatrix {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
