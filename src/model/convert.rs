//! Conversion between incremental and cumulative triangles, and period shifting

use rust_decimal::Decimal;

use super::slice::Sliceable;
use super::triangle::{Triangle, TriangleKind};
use crate::checked;
use crate::error::{ReservingError, Result};

impl Triangle {
    /// Return this triangle recorded as `kind`
    ///
    /// A triangle that already has the requested kind is cloned. The conversion
    /// is exact, so converting back yields an identical triangle. Fails with
    /// [`ReservingError::Overflow`] when a running total leaves the decimal range.
    pub fn convert(&self, kind: TriangleKind) -> Result<Triangle> {
        match (self.kind(), kind) {
            (TriangleKind::Incremental, TriangleKind::Cumulative) => self.cumulate(),
            (TriangleKind::Cumulative, TriangleKind::Incremental) => self.decumulate(),
            _ => Ok(self.clone()),
        }
    }

    pub fn to_cumulative(&self) -> Result<Triangle> {
        self.convert(TriangleKind::Cumulative)
    }

    pub fn to_incremental(&self) -> Result<Triangle> {
        self.convert(TriangleKind::Incremental)
    }

    /// Column 0 is copied; column `j` adds the incremental column `j` to the
    /// cumulative column `j - 1`, restricted to the rows that reach lag `j`.
    fn cumulate(&self) -> Result<Triangle> {
        let periods = self.periods();
        let mut cumulative = Triangle::with_periods(TriangleKind::Cumulative, periods);

        for column in 0..periods {
            for row in 0..periods - column {
                let paid = self.cell(row, column);
                let total = if column == 0 {
                    paid
                } else {
                    checked::add(cumulative.cell(row, column - 1), paid, "cumulative claims")?
                };
                *cumulative.cell_mut(row, column) = total;
            }
        }

        Ok(cumulative)
    }

    /// Column 0 is copied; column `j` is cumulative column `j` minus column `j - 1`.
    fn decumulate(&self) -> Result<Triangle> {
        let periods = self.periods();
        let mut incremental = Triangle::with_periods(TriangleKind::Incremental, periods);

        for column in 0..periods {
            for row in 0..periods - column {
                let total = self.cell(row, column);
                *incremental.cell_mut(row, column) = if column == 0 {
                    total
                } else {
                    checked::sub(total, self.cell(row, column - 1), "incremental claims")?
                };
            }
        }

        Ok(incremental)
    }

    /// Shift accident periods by a fraction of a period
    ///
    /// Builds a triangle of the same kind with one period less, where accident
    /// period `i` blends `(1 - shift_factor)` of row `i` with `shift_factor` of
    /// row `i + 1`.
    pub fn shift(&self, shift_factor: Decimal) -> Result<Triangle> {
        if shift_factor < Decimal::ZERO || shift_factor > Decimal::ONE {
            return Err(ReservingError::InvalidShiftFactor(shift_factor));
        }

        let periods = self.periods().saturating_sub(1);
        let retained = Decimal::ONE - shift_factor;
        let mut shifted = Triangle::with_periods(self.kind(), periods);

        for row in 0..periods {
            for column in 0..periods - row {
                let quantity = "shifted claims";
                let kept = checked::mul(retained, self.cell(row, column), quantity)?;
                let moved = checked::mul(shift_factor, self.cell(row + 1, column), quantity)?;
                *shifted.cell_mut(row, column) = checked::add(kept, moved, quantity)?;
            }
        }

        Ok(shifted)
    }
}
