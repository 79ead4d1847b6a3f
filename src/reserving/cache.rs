//! Compute-once caching for derived reserving figures
//!
//! Every figure a method derives (factors, projection, reserves, cashflows) is
//! computed on first access and kept for the lifetime of the method. The cell is
//! single-assignment, so concurrent first accesses compute the value once and
//! all readers observe the same result. Failures are cached as well and replayed.

use std::sync::OnceLock;

use crate::error::Result;

/// Lazily computed, memoized value
#[derive(Debug, Clone)]
pub struct Memo<T> {
    cell: OnceLock<Result<T>>,
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the cached value, computing it with `compute` on first access
    pub fn get_or_compute<F>(&self, compute: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.cell.get_or_init(compute).as_ref().map_err(Clone::clone)
    }

    /// Whether a value (or a failure) has already been cached
    pub fn is_computed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}
