//! Fixed-point amount helpers for the unit of account.
//!
//! CRITICAL: Never use floating-point for money calculations. All monetary
//! values are `rust_decimal::Decimal` with 2 fractional digits; comparisons
//! are exact cent comparisons.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in the unit of account.
pub const AMOUNT_SCALE: u32 = 2;

/// Rounds an amount to the unit of account using banker's rounding.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if two amounts are equal to the cent, with no tolerance.
#[must_use]
pub fn cents_equal(a: Decimal, b: Decimal) -> bool {
    round_to_cents(a) == round_to_cents(b)
}

/// One-cent tolerance used for period-wide aggregate checks, where rounding
/// may accumulate over many entries. Entry-level balance checks are exact
/// and must not use this.
#[must_use]
pub fn aggregate_tolerance() -> Decimal {
    Decimal::new(1, AMOUNT_SCALE)
}

/// Returns true if the difference between two aggregates is within the
/// one-cent tolerance.
#[must_use]
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= aggregate_tolerance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1.005), dec!(1.00))] // banker's rounding: half to even
    #[case(dec!(1.015), dec!(1.02))]
    #[case(dec!(1.0049), dec!(1.00))]
    #[case(dec!(-1.005), dec!(-1.00))]
    #[case(dec!(100), dec!(100.00))]
    fn test_round_to_cents(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_to_cents(input), expected);
    }

    #[test]
    fn test_cents_equal_is_exact() {
        assert!(cents_equal(dec!(100.00), dec!(100.0000)));
        assert!(!cents_equal(dec!(100.00), dec!(100.01)));
    }

    #[test]
    fn test_within_tolerance_one_cent() {
        assert!(within_tolerance(dec!(100.00), dec!(100.01)));
        assert!(within_tolerance(dec!(100.01), dec!(100.00)));
        assert!(!within_tolerance(dec!(100.00), dec!(100.02)));
    }

    #[test]
    fn test_tolerance_is_one_cent() {
        assert_eq!(aggregate_tolerance(), dec!(0.01));
    }
}
