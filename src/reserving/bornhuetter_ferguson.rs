//! Bornhuetter-Ferguson method
//!
//! An external development pattern distributes ex-ante expected ultimate claims
//! (`alpha`) over the lags still to come.

use rust_decimal::Decimal;

use super::{check_len, DevelopmentMethod};
use crate::checked;
use crate::error::Result;
use crate::model::{Sliceable, Square, Triangle, TriangleKind};

/// Bornhuetter-Ferguson development with a given pattern and expected ultimates
#[derive(Debug, Clone, PartialEq)]
pub struct BornhuetterFerguson {
    factors: Vec<Decimal>,
    alpha: Vec<Decimal>,
}

impl BornhuetterFerguson {
    /// `factors` is the cumulative development pattern, `alpha` the expected
    /// ultimate claims, both indexed by period
    pub fn new(factors: Vec<Decimal>, alpha: Vec<Decimal>) -> Self {
        Self { factors, alpha }
    }

    pub fn alpha(&self) -> &[Decimal] {
        &self.alpha
    }
}

impl DevelopmentMethod for BornhuetterFerguson {
    const NAME: &'static str = "Bornhuetter-Ferguson method";
    const KIND: TriangleKind = TriangleKind::Cumulative;

    fn validate(&self, periods: usize) -> Result<()> {
        check_len(&self.factors, periods)?;
        check_len(&self.alpha, periods)
    }

    fn compute_factors(&self, _triangle: &Triangle) -> Result<Vec<Decimal>> {
        Ok(self.factors.clone())
    }

    fn compute_projection(&self, triangle: &Triangle, factors: &[Decimal]) -> Result<Square> {
        project_emergence(triangle, factors, &self.alpha)
    }

    fn inputs(&self) -> Option<(&'static str, &[Decimal])> {
        Some(("Alpha", &self.alpha))
    }
}

/// Complete `triangle` by letting each accident period emerge `ultimates[row]`
/// scaled by the pattern's increments
///
/// Future calendar periods are filled in order, so every cell builds on the
/// cell one lag earlier in the previous calendar period.
pub(crate) fn project_emergence(
    triangle: &Triangle,
    pattern: &[Decimal],
    ultimates: &[Decimal],
) -> Result<Square> {
    let periods = triangle.periods();
    let mut square = Square::new(periods);
    square.init_from_triangle(triangle)?;

    let quantity = "projected claims";
    for diagonal in periods..square.diagonal_count() {
        let cells: Vec<_> = square.diagonal_cells(diagonal).collect();
        for (row, column) in cells {
            let increment = checked::sub(pattern[column], pattern[column - 1], quantity)?;
            let emerged = checked::mul(increment, ultimates[row], quantity)?;
            let projected = checked::add(square.cell(row, column - 1), emerged, quantity)?;
            *square.cell_mut(row, column) = projected;
        }
        log::trace!("projected diagonal {diagonal}");
    }

    Ok(square)
}
