//! Run-off triangle of observed claims
//!
//! Cells are stored in one flat arena ordered by calendar period: diagonal `d`
//! starts at offset `d(d+1)/2` and holds its cells by ascending development lag.
//! Appending a diagonal therefore never moves existing cells; only running out
//! of capacity triggers a reallocation (at double the capacity) and a copy.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::format;
use super::slice::{Sliceable, SliceableMut};
use crate::checked;
use crate::error::{non_negative, ReservingError, Result};

/// Initial capacity, in periods, of a new triangle
const INITIAL_CAPACITY: usize = 8;

/// How the values of a triangle are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriangleKind {
    /// Each cell holds the claims paid in exactly that accident period and lag
    Incremental,
    /// Each cell holds the claims paid up to and including that lag
    Cumulative,
}

/// Number of cells in a full triangle with `periods` accident periods
pub(crate) fn triangular(periods: usize) -> usize {
    periods * (periods + 1) / 2
}

/// Arena offset of the cell at (`row`, `column`)
fn offset(row: usize, column: usize) -> usize {
    triangular(row + column) + column
}

/// Run-off triangle, valid where `row + column <= periods - 1`
#[derive(Debug, Clone)]
pub struct Triangle {
    kind: TriangleKind,
    periods: usize,
    /// Periods the arena can hold before it must grow
    capacity: usize,
    claims: Vec<Decimal>,
}

impl Triangle {
    /// Create an empty triangle
    pub fn new(kind: TriangleKind) -> Self {
        Self::with_periods(kind, 0)
    }

    /// Create a zero-filled triangle with the given number of periods
    pub fn with_periods(kind: TriangleKind, periods: usize) -> Self {
        let mut capacity = INITIAL_CAPACITY;
        while capacity < periods {
            capacity *= 2;
        }

        Self {
            kind,
            periods,
            capacity,
            claims: vec![Decimal::ZERO; triangular(capacity)],
        }
    }

    /// Build a triangle by appending the given diagonals in order
    ///
    /// Each diagonal holds the incremental payments of one calendar period,
    /// ordered from lag 0 to the newest lag.
    pub fn from_diagonals<I, D>(kind: TriangleKind, diagonals: I) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[Decimal]>,
    {
        let mut triangle = Self::new(kind);
        for diagonal in diagonals {
            triangle.add_claims(diagonal.as_ref())?;
        }
        Ok(triangle)
    }

    /// Build a triangle from diagonals already recorded as `kind`
    ///
    /// Unlike [`Triangle::from_diagonals`], cumulative input is stored as given
    /// rather than accumulated again. Diagonal `d` must hold `d + 1` values.
    pub fn from_recorded_diagonals<D: AsRef<[Decimal]>>(
        kind: TriangleKind,
        diagonals: &[D],
    ) -> Result<Self> {
        let mut triangle = Self::with_periods(kind, diagonals.len());
        for (diagonal, values) in diagonals.iter().enumerate() {
            triangle.set_diagonal(diagonal as isize, values.as_ref())?;
        }
        Ok(triangle)
    }

    pub fn kind(&self) -> TriangleKind {
        self.kind
    }

    /// Number of valid cells, `periods * (periods + 1) / 2`
    pub fn cell_count(&self) -> usize {
        triangular(self.periods)
    }

    /// Append the payments of a new calendar period
    ///
    /// `values` must hold exactly `periods + 1` incremental payments ordered from
    /// lag 0 (the newest accident period) to lag `periods` (the oldest one).
    /// A cumulative triangle adds each payment to the accident period's prior lag.
    /// On error the triangle is left unchanged.
    pub fn add_claims(&mut self, values: &[Decimal]) -> Result<()> {
        let periods = self.periods + 1;
        if values.len() != periods {
            return Err(ReservingError::mismatch(periods, values.len()));
        }

        let newest_row = self.periods;
        let cells = values
            .iter()
            .enumerate()
            .map(|(lag, &value)| match self.kind {
                TriangleKind::Cumulative if lag > 0 => {
                    let prior = self.cell(newest_row - lag, lag - 1);
                    checked::add(prior, value, "cumulative claims")
                }
                _ => Ok(value),
            })
            .collect::<Result<Vec<_>>>()?;

        self.reserve(periods);
        let start = triangular(self.periods);
        self.claims[start..start + periods].copy_from_slice(&cells);

        self.periods = periods;
        Ok(())
    }

    /// Grow the arena so that it holds at least `periods` periods
    fn reserve(&mut self, periods: usize) {
        if periods <= self.capacity {
            return;
        }

        let mut capacity = self.capacity.max(1);
        while capacity < periods {
            capacity *= 2;
        }

        let mut claims = Vec::with_capacity(triangular(capacity));
        claims.extend_from_slice(&self.claims[..triangular(self.periods)]);
        claims.resize(triangular(capacity), Decimal::ZERO);

        log::trace!("triangle arena grown from {} to {} periods", self.capacity, capacity);
        self.claims = claims;
        self.capacity = capacity;
    }

    /// Unchecked read for callers that already validated the cell
    pub(crate) fn cell(&self, row: usize, column: usize) -> Decimal {
        debug_assert!(row + column < self.periods);
        self.claims[offset(row, column)]
    }

    pub(crate) fn cell_mut(&mut self, row: usize, column: usize) -> &mut Decimal {
        debug_assert!(row + column < self.periods);
        &mut self.claims[offset(row, column)]
    }

    /// Rows of the triangle, each `periods - row` long
    pub fn rows(&self) -> Vec<Vec<Decimal>> {
        (0..self.periods)
            .map(|row| (0..self.periods - row).map(|column| self.cell(row, column)).collect())
            .collect()
    }

    fn check_cell(&self, row: isize, column: isize) -> Result<usize> {
        let row = non_negative(row)?;
        let column = non_negative(column)?;
        if row + column >= self.periods {
            return Err(ReservingError::exceeded(row + column, self.periods));
        }
        Ok(offset(row, column))
    }

    fn check_index(&self, index: isize) -> Result<usize> {
        let index = non_negative(index)?;
        if index >= self.periods {
            return Err(ReservingError::exceeded(index, self.periods));
        }
        Ok(index)
    }
}

impl Sliceable for Triangle {
    fn periods(&self) -> usize {
        self.periods
    }

    fn get(&self, row: isize, column: isize) -> Result<Decimal> {
        let at = self.check_cell(row, column)?;
        Ok(self.claims[at])
    }

    fn row(&self, row: isize) -> Result<Vec<Decimal>> {
        let row = self.check_index(row)?;
        Ok((0..self.periods - row).map(|column| self.cell(row, column)).collect())
    }

    fn column(&self, column: isize) -> Result<Vec<Decimal>> {
        let column = self.check_index(column)?;
        Ok((0..self.periods - column).map(|row| self.cell(row, column)).collect())
    }

    fn diagonal(&self, diagonal: isize) -> Result<Vec<Decimal>> {
        let diagonal = self.check_index(diagonal)?;
        let start = triangular(diagonal);
        Ok(self.claims[start..start + diagonal + 1].to_vec())
    }
}

impl SliceableMut for Triangle {
    fn set(&mut self, row: isize, column: isize, value: Decimal) -> Result<()> {
        let at = self.check_cell(row, column)?;
        self.claims[at] = value;
        Ok(())
    }

    fn set_row(&mut self, row: isize, values: &[Decimal]) -> Result<()> {
        let row = self.check_index(row)?;
        let expected = self.periods - row;
        if values.len() != expected {
            return Err(ReservingError::mismatch(expected, values.len()));
        }

        for (column, &value) in values.iter().enumerate() {
            *self.cell_mut(row, column) = value;
        }
        Ok(())
    }

    fn set_column(&mut self, column: isize, values: &[Decimal]) -> Result<()> {
        let column = self.check_index(column)?;
        let expected = self.periods - column;
        if values.len() != expected {
            return Err(ReservingError::mismatch(expected, values.len()));
        }

        for (row, &value) in values.iter().enumerate() {
            *self.cell_mut(row, column) = value;
        }
        Ok(())
    }

    fn set_diagonal(&mut self, diagonal: isize, values: &[Decimal]) -> Result<()> {
        let diagonal = self.check_index(diagonal)?;
        if values.len() != diagonal + 1 {
            return Err(ReservingError::mismatch(diagonal + 1, values.len()));
        }

        let start = triangular(diagonal);
        self.claims[start..start + diagonal + 1].copy_from_slice(values);
        Ok(())
    }
}

impl PartialEq for Triangle {
    /// Equal when kind, periods and every valid cell match; spare capacity is ignored
    fn eq(&self, other: &Self) -> bool {
        let cells = self.cell_count();
        self.kind == other.kind
            && self.periods == other.periods
            && self.claims[..cells] == other.claims[..cells]
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_rows(f, &self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cell_count_is_triangular() {
        for n in 0..20 {
            let triangle = Triangle::with_periods(TriangleKind::Incremental, n);
            assert_eq!(triangle.cell_count(), n * (n + 1) / 2);

            let valid = (0..n as isize)
                .flat_map(|row| (0..n as isize).map(move |column| (row, column)))
                .filter(|&(row, column)| triangle.get(row, column).is_ok())
                .count();
            assert_eq!(valid, n * (n + 1) / 2);
        }
    }

    #[test]
    fn test_incremental_add_claims() {
        let triangle = fixtures::incremental_triangle();

        assert_eq!(triangle.periods(), 6);
        assert_eq!(triangle.get(0, 0).unwrap(), dec!(1001));
        assert_eq!(triangle.get(0, 5).unwrap(), dec!(148));
        assert_eq!(triangle.get(5, 0).unwrap(), dec!(1889));
        assert_eq!(
            triangle.row(1).unwrap(),
            vec![dec!(1113), dec!(990), dec!(671), dec!(648), dec!(422)]
        );
        assert_eq!(triangle.column(4).unwrap(), vec![dec!(347), dec!(422)]);
        assert_eq!(
            triangle.main_diagonal().unwrap(),
            vec![dec!(1889), dec!(1536), dec!(1007), dec!(744), dec!(422), dec!(148)]
        );
    }

    #[test]
    fn test_cumulative_add_claims_accumulates() {
        let triangle = fixtures::cumulative_triangle();

        assert_eq!(triangle.kind(), TriangleKind::Cumulative);
        assert_eq!(
            triangle.row(0).unwrap(),
            vec![dec!(1001), dec!(1855), dec!(2423), dec!(2988), dec!(3335), dec!(3483)]
        );
        assert_eq!(triangle.row(4).unwrap(), vec![dec!(1725), dec!(3261)]);
        assert_eq!(triangle.row(5).unwrap(), vec![dec!(1889)]);
    }

    #[test]
    fn test_growth_past_initial_capacity() {
        let mut triangle = Triangle::new(TriangleKind::Cumulative);
        for period in 0..20 {
            let diagonal = vec![Decimal::ONE; period + 1];
            triangle.add_claims(&diagonal).unwrap();
        }

        assert_eq!(triangle.periods(), 20);
        assert_eq!(triangle.row(0).unwrap(), (1..=20).map(Decimal::from).collect::<Vec<_>>());
        assert_eq!(triangle.get(19, 0).unwrap(), Decimal::ONE);
        assert_eq!(triangle.get(10, 9).unwrap(), dec!(10));
    }

    #[test]
    fn test_add_claims_dimension_mismatch_leaves_triangle_unchanged() {
        let mut triangle = fixtures::incremental_triangle();
        let before = triangle.clone();

        let err = triangle.add_claims(&[dec!(1), dec!(2)]).unwrap_err();

        assert_eq!(err, ReservingError::DimensionMismatch { expected: 7, given: 2 });
        assert_eq!(triangle, before);
    }

    #[test]
    fn test_add_claims_overflow_leaves_triangle_unchanged() {
        let mut triangle = Triangle::new(TriangleKind::Cumulative);
        triangle.add_claims(&[Decimal::MAX]).unwrap();
        let before = triangle.clone();

        let err = triangle.add_claims(&[dec!(1), Decimal::MAX]).unwrap_err();

        assert_eq!(err, ReservingError::Overflow("cumulative claims"));
        assert_eq!(triangle, before);
        assert_eq!(triangle.periods(), 1);
    }

    #[test]
    fn test_recorded_cumulative_diagonals_are_not_accumulated_again() {
        let cumulative = fixtures::cumulative_triangle();
        let diagonals: Vec<_> = (0..6).map(|d| cumulative.diagonal(d).unwrap()).collect();

        let recorded =
            Triangle::from_recorded_diagonals(TriangleKind::Cumulative, &diagonals).unwrap();

        assert_eq!(recorded, cumulative);
        assert_eq!(recorded.get(0, 5).unwrap(), dec!(3483));
    }

    #[test]
    fn test_recorded_diagonals_match_appended_incremental_diagonals() {
        let recorded =
            Triangle::from_recorded_diagonals(TriangleKind::Incremental, &fixtures::diagonals())
                .unwrap();

        assert_eq!(recorded, fixtures::incremental_triangle());
    }

    #[test]
    fn test_recorded_diagonal_of_wrong_length() {
        let diagonals = vec![vec![dec!(1)], vec![dec!(2)]];

        assert_eq!(
            Triangle::from_recorded_diagonals(TriangleKind::Cumulative, &diagonals),
            Err(ReservingError::DimensionMismatch { expected: 2, given: 1 })
        );
    }

    #[test]
    fn test_negative_period() {
        let triangle = fixtures::incremental_triangle();

        assert!(matches!(triangle.get(-1, 0), Err(ReservingError::NegativePeriod { index: -1 })));
        assert!(matches!(triangle.get(0, -2), Err(ReservingError::NegativePeriod { index: -2 })));
        assert!(matches!(triangle.row(-1), Err(ReservingError::NegativePeriod { .. })));
        assert!(matches!(triangle.column(-1), Err(ReservingError::NegativePeriod { .. })));
        assert!(matches!(triangle.diagonal(-1), Err(ReservingError::NegativePeriod { .. })));
    }

    #[test]
    fn test_observation_period_exceeded() {
        let triangle = fixtures::incremental_triangle();

        assert!(triangle.get(3, 2).is_ok());
        assert!(matches!(
            triangle.get(3, 3),
            Err(ReservingError::ObservationPeriodExceeded { index: 6, limit: 5 })
        ));
        for exceeded in [triangle.row(6), triangle.column(6), triangle.diagonal(6)] {
            assert!(matches!(exceeded, Err(ReservingError::ObservationPeriodExceeded { .. })));
        }

        let empty = Triangle::new(TriangleKind::Incremental);
        assert!(matches!(empty.main_diagonal(), Err(ReservingError::NegativePeriod { index: -1 })));
        assert!(matches!(empty.get(0, 0), Err(ReservingError::ObservationPeriodExceeded { .. })));
    }

    #[test]
    fn test_setters_validate_length() {
        let mut triangle = fixtures::incremental_triangle();

        assert_eq!(
            triangle.set_row(2, &[dec!(1)]),
            Err(ReservingError::DimensionMismatch { expected: 4, given: 1 })
        );
        assert_eq!(
            triangle.set_column(1, &[dec!(1); 6]),
            Err(ReservingError::DimensionMismatch { expected: 5, given: 6 })
        );
        assert_eq!(
            triangle.set_diagonal(3, &[dec!(1); 3]),
            Err(ReservingError::DimensionMismatch { expected: 4, given: 3 })
        );
        assert_eq!(
            triangle.set_main_diagonal(&[]),
            Err(ReservingError::DimensionMismatch { expected: 6, given: 0 })
        );
    }

    #[test]
    fn test_setters_write_slices() {
        let mut triangle = Triangle::with_periods(TriangleKind::Incremental, 3);

        triangle.set_row(0, &[dec!(1), dec!(2), dec!(3)]).unwrap();
        triangle.set_column(0, &[dec!(1), dec!(4), dec!(6)]).unwrap();
        triangle.set_diagonal(1, &[dec!(4), dec!(2)]).unwrap();
        triangle.set(1, 1, dec!(5)).unwrap();

        assert_eq!(
            triangle.rows(),
            vec![vec![dec!(1), dec!(2), dec!(3)], vec![dec!(4), dec!(5)], vec![dec!(6)]]
        );
        assert_eq!(triangle.diagonal(2).unwrap(), vec![dec!(6), dec!(5), dec!(3)]);
    }

    #[test]
    fn test_display() {
        let triangle = Triangle::from_diagonals(
            TriangleKind::Incremental,
            [vec![dec!(1)], vec![dec!(2), dec!(3.456)]],
        )
        .unwrap();

        assert_eq!(triangle.to_string(), "1.00\t3.46\n2.00");
    }
}
