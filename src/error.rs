//! Error types for the run-off model and the reserving methods

use rust_decimal::Decimal;
use thiserror::Error;

/// Precondition violations raised by triangles, squares and reserving methods.
///
/// None of these are recovered internally; they surface directly to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservingError {
    /// A row, column, diagonal or period index is negative
    #[error("period index {index} is negative")]
    NegativePeriod { index: isize },

    /// An index (or row + column) exceeds the structure's observation period
    #[error("period index {index} exceeds the observation period (last valid index: {limit})")]
    ObservationPeriodExceeded { index: usize, limit: isize },

    /// A supplied sequence does not have the length of its target slice
    #[error("The number of elements does not match the target's dimension. Expected: {expected}, given: {given}.")]
    DimensionMismatch { expected: usize, given: usize },

    /// Shift factors must lie in [0, 1]
    #[error("shift factor {0} is outside of its legal range between 0 and 1")]
    InvalidShiftFactor(Decimal),

    /// A development quantity would be divided by zero
    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),

    /// A development quantity left the representable decimal range
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl ReservingError {
    pub(crate) fn exceeded(index: usize, periods: usize) -> Self {
        ReservingError::ObservationPeriodExceeded {
            index,
            limit: periods as isize - 1,
        }
    }

    pub(crate) fn mismatch(expected: usize, given: usize) -> Self {
        ReservingError::DimensionMismatch { expected, given }
    }
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, ReservingError>;

/// Converts a signed period index, rejecting negative values.
pub(crate) fn non_negative(index: isize) -> Result<usize> {
    usize::try_from(index).map_err(|_| ReservingError::NegativePeriod { index })
}
