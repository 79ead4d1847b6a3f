//! Run-off square holding historical and projected claims

use std::fmt;

use rust_decimal::Decimal;

use super::format;
use super::slice::{Sliceable, SliceableMut};
use super::triangle::Triangle;
use crate::error::{non_negative, ReservingError, Result};

/// Full `periods x periods` grid of claims
///
/// Cells with `row + column <= periods - 1` are historical; the rest are
/// projected by a reserving method. Diagonals run from `0` to `2 * (periods - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    periods: usize,
    /// Row-major cells
    claims: Vec<Decimal>,
}

impl Square {
    /// Create a zero-filled square
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            claims: vec![Decimal::ZERO; periods * periods],
        }
    }

    /// Copy every historically known cell of `triangle` into the square
    pub fn init_from_triangle(&mut self, triangle: &Triangle) -> Result<()> {
        if triangle.periods() != self.periods {
            return Err(ReservingError::mismatch(self.periods, triangle.periods()));
        }

        self.copy_known(triangle);
        Ok(())
    }

    /// Square initialised from all known cells of `triangle`
    pub fn from_triangle(triangle: &Triangle) -> Self {
        let mut square = Self::new(triangle.periods());
        square.copy_known(triangle);
        square
    }

    fn copy_known(&mut self, triangle: &Triangle) {
        for row in 0..self.periods {
            for column in 0..self.periods - row {
                *self.cell_mut(row, column) = triangle.cell(row, column);
            }
        }
    }

    /// All rows of the square
    pub fn rows(&self) -> Vec<Vec<Decimal>> {
        self.claims
            .chunks(self.periods.max(1))
            .map(<[Decimal]>::to_vec)
            .collect()
    }

    /// Number of diagonals, `2 * periods - 1` for a non-empty square
    pub fn diagonal_count(&self) -> usize {
        (2 * self.periods).saturating_sub(1)
    }

    pub(crate) fn cell(&self, row: usize, column: usize) -> Decimal {
        self.claims[row * self.periods + column]
    }

    pub(crate) fn cell_mut(&mut self, row: usize, column: usize) -> &mut Decimal {
        &mut self.claims[row * self.periods + column]
    }

    /// Cells of a diagonal, from the bottom-left upward
    pub(crate) fn diagonal_cells(&self, diagonal: usize) -> impl Iterator<Item = (usize, usize)> {
        let periods = self.periods;
        let (first_row, first_column, len) = if diagonal < periods {
            (diagonal, 0, diagonal + 1)
        } else {
            (periods - 1, diagonal + 1 - periods, 2 * periods - diagonal - 1)
        };
        (0..len).map(move |k| (first_row - k, first_column + k))
    }

    fn check_cell(&self, row: isize, column: isize) -> Result<usize> {
        let row = non_negative(row)?;
        let column = non_negative(column)?;
        if row >= self.periods {
            return Err(ReservingError::exceeded(row, self.periods));
        }
        if column >= self.periods {
            return Err(ReservingError::exceeded(column, self.periods));
        }
        Ok(row * self.periods + column)
    }

    fn check_index(&self, index: isize) -> Result<usize> {
        let index = non_negative(index)?;
        if index >= self.periods {
            return Err(ReservingError::exceeded(index, self.periods));
        }
        Ok(index)
    }

    fn check_diagonal(&self, diagonal: isize) -> Result<usize> {
        let diagonal = non_negative(diagonal)?;
        if diagonal >= self.diagonal_count() {
            return Err(ReservingError::exceeded(diagonal, self.diagonal_count()));
        }
        Ok(diagonal)
    }
}

impl Sliceable for Square {
    fn periods(&self) -> usize {
        self.periods
    }

    fn get(&self, row: isize, column: isize) -> Result<Decimal> {
        let at = self.check_cell(row, column)?;
        Ok(self.claims[at])
    }

    fn row(&self, row: isize) -> Result<Vec<Decimal>> {
        let row = self.check_index(row)?;
        let start = row * self.periods;
        Ok(self.claims[start..start + self.periods].to_vec())
    }

    fn column(&self, column: isize) -> Result<Vec<Decimal>> {
        let column = self.check_index(column)?;
        Ok((0..self.periods).map(|row| self.cell(row, column)).collect())
    }

    fn diagonal(&self, diagonal: isize) -> Result<Vec<Decimal>> {
        let diagonal = self.check_diagonal(diagonal)?;
        Ok(self
            .diagonal_cells(diagonal)
            .map(|(row, column)| self.cell(row, column))
            .collect())
    }
}

impl SliceableMut for Square {
    fn set(&mut self, row: isize, column: isize, value: Decimal) -> Result<()> {
        let at = self.check_cell(row, column)?;
        self.claims[at] = value;
        Ok(())
    }

    fn set_row(&mut self, row: isize, values: &[Decimal]) -> Result<()> {
        let row = self.check_index(row)?;
        if values.len() != self.periods {
            return Err(ReservingError::mismatch(self.periods, values.len()));
        }

        let start = row * self.periods;
        self.claims[start..start + self.periods].copy_from_slice(values);
        Ok(())
    }

    fn set_column(&mut self, column: isize, values: &[Decimal]) -> Result<()> {
        let column = self.check_index(column)?;
        if values.len() != self.periods {
            return Err(ReservingError::mismatch(self.periods, values.len()));
        }

        for (row, &value) in values.iter().enumerate() {
            *self.cell_mut(row, column) = value;
        }
        Ok(())
    }

    fn set_diagonal(&mut self, diagonal: isize, values: &[Decimal]) -> Result<()> {
        let diagonal = self.check_diagonal(diagonal)?;
        let cells: Vec<_> = self.diagonal_cells(diagonal).collect();
        if values.len() != cells.len() {
            return Err(ReservingError::mismatch(cells.len(), values.len()));
        }

        for ((row, column), &value) in cells.into_iter().zip(values) {
            *self.cell_mut(row, column) = value;
        }
        Ok(())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_rows(f, &self.rows())
    }
}
