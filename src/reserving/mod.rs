//! Factor-based claims reserving methods
//!
//! A reserving method binds a run-off triangle to a development algorithm. The
//! algorithm supplies development factors and a projection of the triangle into
//! a complete run-off square; reserves and cashflows follow from the square.
//!
//! Five algorithms are provided:
//! - **Chain-ladder**: multiplicative factors estimated from the triangle
//! - **Additive**: incremental loss ratios against earned premiums
//! - **Bornhuetter-Ferguson**: external pattern applied to ex-ante ultimates
//! - **Cape Cod**: external pattern applied to volume measures rescaled to the data
//! - **Loss development**: external pattern regressed from the latest diagonal
//!
//! # Example
//!
//! ```rust,ignore
//! use claims_reserving::model::{Triangle, TriangleKind};
//! use claims_reserving::reserving::{ChainLadder, FactorBasedMethod, ReservingMethod};
//!
//! let triangle = Triangle::from_diagonals(TriangleKind::Incremental, diagonals)?;
//! let method = FactorBasedMethod::new(triangle, ChainLadder)?;
//! println!("Total reserve: {}", method.total_reserve()?);
//! ```

mod additive;
mod bornhuetter_ferguson;
mod cache;
pub mod calculations;
mod cape_cod;
mod chain_ladder;
mod loss_development;

pub use additive::Additive;
pub use bornhuetter_ferguson::BornhuetterFerguson;
pub use cache::Memo;
pub use cape_cod::CapeCod;
pub use chain_ladder::ChainLadder;
pub use loss_development::LossDevelopment;

use std::fmt;

use rust_decimal::Decimal;

use crate::checked;
use crate::error::{non_negative, ReservingError, Result};
use crate::model::{format, Sliceable, Square, Triangle, TriangleKind};

const SEPARATOR: &str = "\n--------------------\n";

/// A development algorithm: how factors are obtained and how the triangle is projected
pub trait DevelopmentMethod {
    /// Human-readable method name
    const NAME: &'static str;

    /// Representation the method holds its triangle in
    const KIND: TriangleKind;

    /// Check the method's inputs against the number of observed periods
    fn validate(&self, _periods: usize) -> Result<()> {
        Ok(())
    }

    /// Development factors for `triangle`
    fn compute_factors(&self, triangle: &Triangle) -> Result<Vec<Decimal>>;

    /// Fill the unknown cells of a square from `triangle` and its factors
    ///
    /// Only called for triangles with at least one period.
    fn compute_projection(&self, triangle: &Triangle, factors: &[Decimal]) -> Result<Square>;

    /// Additional per-period input shown in the method's report, if any
    fn inputs(&self) -> Option<(&'static str, &[Decimal])> {
        None
    }
}

/// Derived figures every reserving method exposes
pub trait ReservingMethod: fmt::Display + Send + Sync {
    /// Human-readable method name
    fn name(&self) -> &'static str;

    /// The triangle being developed, in the method's representation
    fn triangle(&self) -> &Triangle;

    /// Development factors
    fn factors(&self) -> Result<&[Decimal]>;

    /// Triangle completed with projected claims
    fn projection(&self) -> Result<&Square>;

    /// Outstanding claims per accident period
    fn reserves(&self) -> Result<&[Decimal]>;

    /// Outstanding claims of one accident period
    fn reserve(&self, period: isize) -> Result<Decimal> {
        let index = non_negative(period)?;
        let reserves = self.reserves()?;
        reserves
            .get(index)
            .copied()
            .ok_or_else(|| ReservingError::exceeded(index, reserves.len()))
    }

    /// Sum of all reserves
    fn total_reserve(&self) -> Result<Decimal>;

    /// Expected payments per future calendar period
    fn cashflows(&self) -> Result<&[Decimal]>;
}

/// A run-off triangle bound to a development algorithm, with memoized results
#[derive(Debug)]
pub struct FactorBasedMethod<M> {
    triangle: Triangle,
    method: M,
    factors: Memo<Vec<Decimal>>,
    projection: Memo<Square>,
    reserves: Memo<Vec<Decimal>>,
    total_reserve: Memo<Decimal>,
    cashflows: Memo<Vec<Decimal>>,
}

impl<M: DevelopmentMethod> FactorBasedMethod<M> {
    /// Bind `triangle` to `method`, converting it to the representation the method needs
    pub fn new(triangle: Triangle, method: M) -> Result<Self> {
        method.validate(triangle.periods())?;

        let triangle = if triangle.kind() == M::KIND {
            triangle
        } else {
            triangle.convert(M::KIND)?
        };

        Ok(Self {
            triangle,
            method,
            factors: Memo::new(),
            projection: Memo::new(),
            reserves: Memo::new(),
            total_reserve: Memo::new(),
            cashflows: Memo::new(),
        })
    }

    /// The development algorithm and its inputs
    pub fn method(&self) -> &M {
        &self.method
    }
}

impl<M> ReservingMethod for FactorBasedMethod<M>
where
    M: DevelopmentMethod + Send + Sync,
{
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    fn factors(&self) -> Result<&[Decimal]> {
        self.factors
            .get_or_compute(|| {
                let factors = self.method.compute_factors(&self.triangle)?;
                log::debug!("{}: {} development factors", M::NAME, factors.len());
                Ok(factors)
            })
            .map(Vec::as_slice)
    }

    fn projection(&self) -> Result<&Square> {
        self.projection.get_or_compute(|| {
            if self.triangle.periods() == 0 {
                return Ok(Square::new(0));
            }

            let factors = self.factors()?;
            let square = self.method.compute_projection(&self.triangle, factors)?;
            log::debug!("{}: projected {} periods", M::NAME, square.periods());
            Ok(square)
        })
    }

    fn reserves(&self) -> Result<&[Decimal]> {
        self.reserves
            .get_or_compute(|| calculations::reserves(self.projection()?))
            .map(Vec::as_slice)
    }

    fn total_reserve(&self) -> Result<Decimal> {
        self.total_reserve
            .get_or_compute(|| checked::sum(self.reserves()?.iter().copied(), "total reserve"))
            .copied()
    }

    fn cashflows(&self) -> Result<&[Decimal]> {
        self.cashflows
            .get_or_compute(|| calculations::cashflows(self.projection()?))
            .map(Vec::as_slice)
    }
}

impl<M> fmt::Display for FactorBasedMethod<M>
where
    M: DevelopmentMethod + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Claims reserving - {}", M::NAME)?;

        if let Some((label, values)) = self.method.inputs() {
            write!(f, "{SEPARATOR}{label}:\t")?;
            format::write_values(f, values)?;
        }

        f.write_str(SEPARATOR)?;
        match self.projection() {
            Ok(square) => write!(f, "{square}")?,
            Err(err) => write!(f, "Projection failed: {err}")?,
        }

        f.write_str(SEPARATOR)?;
        f.write_str("Factors:\t")?;
        match self.factors() {
            Ok(factors) => format::write_values(f, factors)?,
            Err(err) => write!(f, "{err}")?,
        }

        f.write_str("\nTotal reserve:\t")?;
        match self.total_reserve() {
            Ok(total) => f.write_str(&format::amount(total)),
            Err(err) => write!(f, "{err}"),
        }
    }
}

/// Checks that a per-accident-period input has one value per period
pub(crate) fn check_len(values: &[Decimal], periods: usize) -> Result<()> {
    if values.len() != periods {
        return Err(ReservingError::mismatch(periods, values.len()));
    }
    Ok(())
}
