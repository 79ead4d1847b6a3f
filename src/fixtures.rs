//! Worked six-period scenario shared by the unit tests

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::{Triangle, TriangleKind};

pub fn diagonals() -> Vec<Vec<Decimal>> {
    vec![
        vec![dec!(1001)],
        vec![dec!(1113), dec!(854)],
        vec![dec!(1265), dec!(990), dec!(568)],
        vec![dec!(1490), dec!(1168), dec!(671), dec!(565)],
        vec![dec!(1725), dec!(1383), dec!(800), dec!(648), dec!(347)],
        vec![dec!(1889), dec!(1536), dec!(1007), dec!(744), dec!(422), dec!(148)],
    ]
}

pub fn incremental_triangle() -> Triangle {
    Triangle::from_diagonals(TriangleKind::Incremental, diagonals()).unwrap()
}

pub fn cumulative_triangle() -> Triangle {
    Triangle::from_diagonals(TriangleKind::Cumulative, diagonals()).unwrap()
}

/// Development pattern for the methods that take external factors
pub fn development_pattern() -> Vec<Decimal> {
    vec![dec!(0.28), dec!(0.51), dec!(0.7), dec!(0.86), dec!(0.95), dec!(1)]
}

pub fn premiums() -> Vec<Decimal> {
    vec![dec!(4000), dec!(4500), dec!(5300), dec!(6000), dec!(6900), dec!(8200)]
}

pub fn alpha() -> Vec<Decimal> {
    vec![dec!(3517), dec!(3981), dec!(4598), dec!(5658), dec!(6214), dec!(6325)]
}

/// Asserts element-wise closeness of decimal results to expected values
pub fn assert_close(actual: &[Decimal], expected: &[f64], epsilon: f64) {
    use approx::assert_abs_diff_eq;
    use rust_decimal::prelude::ToPrimitive;

    assert_eq!(actual.len(), expected.len(), "length mismatch: {actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        let a = a.to_f64().unwrap();
        assert_abs_diff_eq!(a, *e, epsilon = epsilon);
    }
}
