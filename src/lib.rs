//! Claims Reserving - Run-off triangles and factor-based reserving methods for non-life insurance
//!
//! This library provides:
//! - Incremental and cumulative run-off triangles with row, column and diagonal slicing
//! - Run-off squares completed by projection
//! - Chain-ladder, additive, Bornhuetter-Ferguson, Cape Cod and loss development methods
//! - Reserves per accident period and cashflows per future calendar period
//! - CSV loading of claims data and a runner for batch evaluation

mod checked;
pub mod error;
pub mod loader;
pub mod model;
pub mod reserving;
pub mod runner;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use error::{ReservingError, Result};
pub use loader::{load_dataset, Dataset, LoadError, ParameterTable};
pub use model::{Sliceable, SliceableMut, Square, Triangle, TriangleKind};
pub use reserving::{
    Additive, BornhuetterFerguson, CapeCod, ChainLadder, DevelopmentMethod, FactorBasedMethod,
    LossDevelopment, ReservingMethod,
};
pub use runner::{MethodKind, MethodSpec, ReservingRunner, ReservingSummary, RunConfig};
