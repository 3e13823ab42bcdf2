//! Fixed-point fee arithmetic on a billionths scale.
//!
//! Every price, rate and tolerance in the planner is a `u64` where
//! `1.0 == SCALE`. Products are widened to `u128` before the division so the
//! intermediate value can never overflow; results are always floored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed-point scaling factor: 1.0 = 1_000_000_000.
pub const SCALE: u64 = 1_000_000_000;

/// Arithmetic precondition violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MathError {
    #[error("division by zero rate")]
    DivisionByZero,
    #[error("fixed-point result does not fit in u64")]
    Overflow,
}

/// `floor(a * b / SCALE)`.
///
/// Results above `u64::MAX` saturate. For fee and order amounts this makes the
/// downstream plan insufficient instead of wrapping to a small number.
#[inline]
pub fn mul_fixed(a: u64, b: u64) -> u64 {
    checked_mul_fixed(a, b).unwrap_or(u64::MAX)
}

/// `floor(a * b / SCALE)`, or `None` if the result exceeds `u64::MAX`.
#[inline]
pub fn checked_mul_fixed(a: u64, b: u64) -> Option<u64> {
    let wide = (a as u128 * b as u128) / SCALE as u128;
    u64::try_from(wide).ok()
}

/// `floor(a * SCALE / b)`.
///
/// A zero divisor is a fatal precondition violation: prices and conversion
/// rates must never be zero.
#[inline]
pub fn div_fixed(a: u64, b: u64) -> Result<u64, MathError> {
    if b == 0 {
        return Err(MathError::DivisionByZero);
    }
    let wide = (a as u128 * SCALE as u128) / b as u128;
    u64::try_from(wide).map_err(|_| MathError::Overflow)
}

/// Inflate `value` by a tolerance expressed in billionths.
///
/// `apply_slippage(1000, 100_000_000) == 1100` (10%). The addend is floored, so
/// a small `value` with a small tolerance gets no headroom at all.
#[inline]
pub fn apply_slippage(value: u64, tolerance: u64) -> u64 {
    value.saturating_add(mul_fixed(value, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_fixed_floors() {
        assert_eq!(mul_fixed(1, 37_815_000_000), 37);
        assert_eq!(mul_fixed(3, 333_333_333), 0);
        assert_eq!(mul_fixed(10, 100 * SCALE), 1000);
    }

    #[test]
    fn mul_fixed_identity_at_scale() {
        assert_eq!(mul_fixed(123_456_789, SCALE), 123_456_789);
        assert_eq!(mul_fixed(u64::MAX, SCALE), u64::MAX);
    }

    #[test]
    fn mul_fixed_wide_intermediate_does_not_overflow() {
        // u64::MAX * 2 overflows u64 but fits the u128 intermediate.
        assert_eq!(mul_fixed(u64::MAX, 2), u64::MAX / 500_000_000);
    }

    #[test]
    fn checked_mul_fixed_reports_overflow() {
        assert_eq!(checked_mul_fixed(u64::MAX, u64::MAX), None);
        assert_eq!(mul_fixed(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn div_fixed_basic() {
        assert_eq!(div_fixed(1, 2).unwrap(), 500_000_000);
        assert_eq!(div_fixed(SCALE, SCALE).unwrap(), SCALE);
        assert_eq!(div_fixed(10, 3).unwrap(), 3_333_333_333);
    }

    #[test]
    fn div_fixed_zero_divisor_is_error() {
        assert_eq!(div_fixed(5, 0), Err(MathError::DivisionByZero));
        assert_eq!(div_fixed(0, 0), Err(MathError::DivisionByZero));
    }

    #[test]
    fn div_fixed_overflow_is_error() {
        assert_eq!(div_fixed(u64::MAX, 1), Err(MathError::Overflow));
    }

    #[test]
    fn slippage_ten_percent() {
        assert_eq!(apply_slippage(1000, 100_000_000), 1100);
    }

    #[test]
    fn slippage_zero_tolerance_is_identity() {
        for x in [0, 1, 999, 1_000_000, u64::MAX] {
            assert_eq!(apply_slippage(x, 0), x);
        }
    }

    #[test]
    fn slippage_truncates_for_small_values() {
        // 0.05% of 999 floors to zero headroom.
        assert_eq!(apply_slippage(999, 500_000), 999);
    }

    #[test]
    fn slippage_saturates() {
        assert_eq!(apply_slippage(u64::MAX, SCALE), u64::MAX);
    }
}
