//! Chain-ladder method
//!
//! Development factors are volume-weighted link ratios between consecutive
//! cumulative columns; the projection rolls each accident period forward by them.

use rust_decimal::Decimal;

use super::DevelopmentMethod;
use crate::checked;
use crate::error::Result;
use crate::model::{Sliceable, Square, Triangle, TriangleKind};

/// Chain-ladder development with factors estimated from the triangle itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainLadder;

impl DevelopmentMethod for ChainLadder {
    const NAME: &'static str = "Chain-ladder method";
    const KIND: TriangleKind = TriangleKind::Cumulative;

    fn compute_factors(&self, triangle: &Triangle) -> Result<Vec<Decimal>> {
        let periods = triangle.periods();

        (0..periods.saturating_sub(1))
            .map(|lag| {
                // Only accident periods that also reached `lag + 1` enter the denominator
                let developed = periods - lag - 1;
                let quantity = "chain-ladder factor";
                let numerator =
                    checked::sum((0..developed).map(|row| triangle.cell(row, lag + 1)), quantity)?;
                let denominator =
                    checked::sum((0..developed).map(|row| triangle.cell(row, lag)), quantity)?;

                checked::div(numerator, denominator, quantity)
            })
            .collect()
    }

    fn compute_projection(&self, triangle: &Triangle, factors: &[Decimal]) -> Result<Square> {
        let periods = triangle.periods();
        let mut square = Square::new(periods);
        square.init_from_triangle(triangle)?;

        for (lag, factor) in factors.iter().enumerate() {
            let column = lag + 1;
            for row in periods - column..periods {
                let known = square.cell(row, lag);
                *square.cell_mut(row, column) = checked::mul(known, *factor, "projected claims")?;
            }
            log::trace!("chain-ladder: projected column {column}");
        }

        Ok(square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReservingError;
    use crate::fixtures::{self, assert_close};
    use crate::model::SliceableMut;
    use crate::reserving::{FactorBasedMethod, ReservingMethod};
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn method() -> FactorBasedMethod<ChainLadder> {
        FactorBasedMethod::new(fixtures::incremental_triangle(), ChainLadder).unwrap()
    }

    #[test]
    fn test_factors() {
        assert_close(
            method().factors().unwrap(),
            &[1.899454, 1.3288, 1.232147, 1.119969, 1.044378],
            1e-6,
        );
    }

    #[test]
    fn test_projection() {
        let method = method();
        let square = method.projection().unwrap();

        assert_close(
            &square.row(5).unwrap(),
            &[1889.0, 3588.07, 4767.82, 5874.66, 6579.44, 6871.42],
            0.01,
        );
        // Known cells are carried over unchanged
        assert_eq!(
            square.row(0).unwrap(),
            vec![dec!(1001), dec!(1855), dec!(2423), dec!(2988), dec!(3335), dec!(3483)]
        );
        assert_eq!(square.get(4, 1).unwrap(), dec!(3261));
    }

    #[test]
    fn test_reserves_and_cashflows() {
        let method = method();

        assert_close(
            method.reserves().unwrap(),
            &[0.0, 170.59, 674.78, 1711.88, 2984.06, 4982.42],
            0.01,
        );
        assert_close(&[method.total_reserve().unwrap()], &[10523.72], 0.01);
        assert_close(
            method.cashflows().unwrap(),
            &[4319.72, 2956.9, 1984.98, 970.14, 291.98],
            0.01,
        );
    }

    #[test]
    fn test_cashflows_exhaust_reserve() {
        let method = method();
        let paid: Decimal = method.cashflows().unwrap().iter().sum();
        assert_close(&[paid], &[method.total_reserve().unwrap().to_f64().unwrap()], 1e-9);
    }

    #[test]
    fn test_zero_column_is_division_by_zero() {
        let mut triangle = Triangle::with_periods(TriangleKind::Cumulative, 2);
        triangle.set_row(0, &[dec!(0), dec!(10)]).unwrap();
        triangle.set_row(1, &[dec!(5)]).unwrap();

        let method = FactorBasedMethod::new(triangle, ChainLadder).unwrap();

        assert_eq!(
            method.factors(),
            Err(ReservingError::DivisionByZero("chain-ladder factor"))
        );
        assert!(method.projection().is_err());
        assert!(method.to_string().contains("Projection failed: division by zero"));
    }

    #[test]
    fn test_single_period() {
        let triangle =
            Triangle::from_diagonals(TriangleKind::Incremental, [vec![dec!(42)]]).unwrap();
        let method = FactorBasedMethod::new(triangle, ChainLadder).unwrap();

        assert!(method.factors().unwrap().is_empty());
        assert_eq!(method.projection().unwrap().get(0, 0).unwrap(), dec!(42));
        assert_eq!(method.reserves().unwrap(), &[Decimal::ZERO]);
        assert!(method.cashflows().unwrap().is_empty());
    }
}
