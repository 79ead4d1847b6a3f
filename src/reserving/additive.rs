//! Additive method
//!
//! Factors are incremental loss ratios: claims paid at each lag relative to the
//! earned premiums of the accident periods that reached that lag.

use rust_decimal::Decimal;

use super::{check_len, DevelopmentMethod};
use crate::checked;
use crate::error::Result;
use crate::model::{Sliceable, Square, Triangle, TriangleKind};

/// Additive development driven by one premium per accident period
#[derive(Debug, Clone, PartialEq)]
pub struct Additive {
    premiums: Vec<Decimal>,
}

impl Additive {
    pub fn new(premiums: Vec<Decimal>) -> Self {
        Self { premiums }
    }

    pub fn premiums(&self) -> &[Decimal] {
        &self.premiums
    }
}

impl DevelopmentMethod for Additive {
    const NAME: &'static str = "Additive method";
    const KIND: TriangleKind = TriangleKind::Incremental;

    fn validate(&self, periods: usize) -> Result<()> {
        check_len(&self.premiums, periods)
    }

    fn compute_factors(&self, triangle: &Triangle) -> Result<Vec<Decimal>> {
        let periods = triangle.periods();

        (0..periods)
            .map(|lag| {
                let observed = periods - lag;
                let quantity = "additive loss ratio";
                let paid = (0..observed).map(|row| triangle.cell(row, lag));
                let paid = checked::sum(paid, quantity)?;
                let earned = checked::sum(self.premiums[..observed].iter().copied(), quantity)?;

                checked::div(paid, earned, quantity)
            })
            .collect()
    }

    fn compute_projection(&self, triangle: &Triangle, factors: &[Decimal]) -> Result<Square> {
        let periods = triangle.periods();
        let mut square = Square::new(periods);
        square.init_from_triangle(&triangle.to_cumulative()?)?;

        for column in 1..periods {
            let increment = factors[column];
            for row in periods - column..periods {
                let quantity = "projected claims";
                let emerged = checked::mul(increment, self.premiums[row], quantity)?;
                let projected = checked::add(square.cell(row, column - 1), emerged, quantity)?;
                *square.cell_mut(row, column) = projected;
            }
            log::trace!("additive: projected column {column}");
        }

        Ok(square)
    }

    fn inputs(&self) -> Option<(&'static str, &[Decimal])> {
        Some(("Premiums", &self.premiums))
    }
}
