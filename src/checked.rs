//! Overflow-checked decimal arithmetic
//!
//! `Decimal` operators panic once a result leaves the representable range.
//! These helpers report that case as [`ReservingError::Overflow`] naming the
//! quantity being computed.

use rust_decimal::Decimal;

use crate::error::{ReservingError, Result};

pub(crate) fn add(a: Decimal, b: Decimal, quantity: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(ReservingError::Overflow(quantity))
}

pub(crate) fn sub(a: Decimal, b: Decimal, quantity: &'static str) -> Result<Decimal> {
    a.checked_sub(b).ok_or(ReservingError::Overflow(quantity))
}

pub(crate) fn mul(a: Decimal, b: Decimal, quantity: &'static str) -> Result<Decimal> {
    a.checked_mul(b).ok_or(ReservingError::Overflow(quantity))
}

pub(crate) fn div(a: Decimal, b: Decimal, quantity: &'static str) -> Result<Decimal> {
    if b.is_zero() {
        return Err(ReservingError::DivisionByZero(quantity));
    }
    a.checked_div(b).ok_or(ReservingError::Overflow(quantity))
}

pub(crate) fn sum<I>(values: I, quantity: &'static str) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |total, value| add(total, value, quantity))
}
