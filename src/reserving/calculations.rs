//! Reserves and cashflows derived from a completed run-off square

use rust_decimal::Decimal;

use crate::checked;
use crate::error::Result;
use crate::model::{Sliceable, Square};

/// Projected ultimate claims minus claims paid to date, per accident period
///
/// `column(n - 1)` minus the reversed main diagonal.
pub fn reserves(square: &Square) -> Result<Vec<Decimal>> {
    let periods = square.periods();
    if periods == 0 {
        return Ok(Vec::new());
    }

    let ultimate = square.column(periods as isize - 1)?;
    let paid = square.main_diagonal()?;

    ultimate
        .iter()
        .zip(paid.iter().rev())
        .map(|(&ultimate, &paid)| checked::sub(ultimate, paid, "reserve"))
        .collect()
}

/// Expected payments per future calendar period, across all accident periods
///
/// Entry `k` is the growth from diagonal `n + k - 1` to diagonal `n + k`, taken
/// over the accident periods still developing in that calendar period.
pub fn cashflows(square: &Square) -> Result<Vec<Decimal>> {
    let periods = square.periods();

    (0..periods.saturating_sub(1))
        .map(|step| {
            let diagonal = (periods + step) as isize;
            let current = square.diagonal(diagonal)?;
            let previous = square.diagonal(diagonal - 1)?;

            let growth = current
                .iter()
                .zip(&previous)
                .map(|(&current, &previous)| checked::sub(current, previous, "cashflow"))
                .collect::<Result<Vec<_>>>()?;
            checked::sum(growth, "cashflow")
        })
        .collect()
}
