//! Human-readable rendering of amounts and run-off grids
//!
//! Tab separated, two decimals. Diagnostic output only, not an interchange format.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with two decimals, rounding midpoints away from zero
pub fn amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Writes values separated by tabs
pub fn write_values<W: fmt::Write>(out: &mut W, values: &[Decimal]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.write_char('\t')?;
        }
        out.write_str(&amount(*value))?;
    }
    Ok(())
}

/// Writes one line per row, without a trailing newline
pub fn write_rows<W: fmt::Write>(out: &mut W, rows: &[Vec<Decimal>]) -> fmt::Result {
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.write_char('\n')?;
        }
        write_values(out, row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_rounding() {
        assert_eq!(amount(dec!(1001)), "1001.00");
        assert_eq!(amount(dec!(3588.0676)), "3588.07");
        assert_eq!(amount(dec!(0.125)), "0.13");
        assert_eq!(amount(dec!(-0.125)), "-0.13");
        assert_eq!(amount(dec!(0.1)), "0.10");
    }

    #[test]
    fn test_write_rows() {
        let mut out = String::new();
        write_rows(&mut out, &[vec![dec!(1), dec!(2.5)], vec![dec!(3)]]).unwrap();
        assert_eq!(out, "1.00\t2.50\n3.00");
    }
}
