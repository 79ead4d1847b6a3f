//! Slicing contract shared by run-off triangles and squares
//!
//! Rows are accident periods, columns are development lags and diagonals are
//! calendar periods (`row + column`). Diagonals are read from the bottom-left
//! cell upward to the top-right cell.

use rust_decimal::Decimal;

use crate::error::Result;

/// Read access to a run-off structure by cell, row, column and diagonal
pub trait Sliceable {
    /// Number of accident periods (the side length)
    fn periods(&self) -> usize;

    /// Value at the given accident period and development lag
    fn get(&self, row: isize, column: isize) -> Result<Decimal>;

    /// All values of one accident period, ordered by development lag
    fn row(&self, row: isize) -> Result<Vec<Decimal>>;

    /// All values of one development lag, ordered by accident period
    fn column(&self, column: isize) -> Result<Vec<Decimal>>;

    /// All values of one calendar period, from the latest accident period upward
    fn diagonal(&self, diagonal: isize) -> Result<Vec<Decimal>>;

    /// The most recent observed calendar period (`periods - 1`)
    fn main_diagonal(&self) -> Result<Vec<Decimal>> {
        self.diagonal(self.periods() as isize - 1)
    }
}

/// Write access mirroring [`Sliceable`]
///
/// Slice setters require the supplied values to match the slice length exactly.
pub trait SliceableMut: Sliceable {
    fn set(&mut self, row: isize, column: isize, value: Decimal) -> Result<()>;

    fn set_row(&mut self, row: isize, values: &[Decimal]) -> Result<()>;

    fn set_column(&mut self, column: isize, values: &[Decimal]) -> Result<()>;

    fn set_diagonal(&mut self, diagonal: isize, values: &[Decimal]) -> Result<()>;

    fn set_main_diagonal(&mut self, values: &[Decimal]) -> Result<()> {
        self.set_diagonal(self.periods() as isize - 1, values)
    }
}
