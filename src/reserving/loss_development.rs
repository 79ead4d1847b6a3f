//! Loss development method
//!
//! Each accident period's ultimate level is regressed from its latest observed
//! cumulative claims through the development pattern; unknown cells are that
//! level scaled back down by the pattern.

use rust_decimal::Decimal;

use super::{check_len, DevelopmentMethod, FactorBasedMethod, Memo};
use crate::checked;
use crate::error::Result;
use crate::model::{Sliceable, SliceableMut, Square, Triangle, TriangleKind};

/// Loss development with a given cumulative pattern
#[derive(Debug)]
pub struct LossDevelopment {
    factors: Vec<Decimal>,
    levels: Memo<Vec<Decimal>>,
}

impl LossDevelopment {
    pub fn new(factors: Vec<Decimal>) -> Self {
        Self {
            factors,
            levels: Memo::new(),
        }
    }

    /// Ultimate level per accident period, `latest[row] / factors[latest lag]`
    fn levels(&self, triangle: &Triangle) -> Result<&[Decimal]> {
        self.levels
            .get_or_compute(|| {
                let periods = triangle.periods();
                (0..periods)
                    .map(|row| {
                        let lag = periods - 1 - row;
                        let latest = triangle.cell(row, lag);
                        checked::div(latest, self.factors[lag], "regressed ultimate level")
                    })
                    .collect()
            })
            .map(Vec::as_slice)
    }
}

impl DevelopmentMethod for LossDevelopment {
    const NAME: &'static str = "Loss development method";
    const KIND: TriangleKind = TriangleKind::Cumulative;

    fn validate(&self, periods: usize) -> Result<()> {
        check_len(&self.factors, periods)
    }

    fn compute_factors(&self, _triangle: &Triangle) -> Result<Vec<Decimal>> {
        Ok(self.factors.clone())
    }

    fn compute_projection(&self, triangle: &Triangle, factors: &[Decimal]) -> Result<Square> {
        let periods = triangle.periods();
        let levels = self.levels(triangle)?;
        let mut square = Square::new(periods);
        square.set_column(0, &triangle.column(0)?)?;

        for column in (1..periods).rev() {
            for row in 0..periods {
                *square.cell_mut(row, column) = if row + column < periods {
                    triangle.cell(row, column)
                } else {
                    checked::mul(levels[row], factors[column], "projected claims")?
                };
            }
            log::trace!("loss development: filled column {column}");
        }

        Ok(square)
    }
}

impl FactorBasedMethod<LossDevelopment> {
    /// Regressed ultimate level per accident period, computed once
    pub fn regressed_levels(&self) -> Result<&[Decimal]> {
        self.method().levels(&self.triangle)
    }
}
