//! Full-precision `a * b / c` on 256-bit intermediates.

use ethnum::U256;

use crate::error::{Result, ZapError};

/// `⌊a · b / denominator⌋` computed without intermediate overflow.
///
/// # Errors
///
/// [`ZapError::ArithmeticOverflow`] if `denominator` is zero or the
/// quotient does not fit in 128 bits.
///
/// # Examples
///
/// ```
/// use cpmm_zap::math::mul_div;
///
/// // (2^127 * 6) / 4 would overflow a u128 product.
/// let big = 1u128 << 127;
/// assert_eq!(mul_div(big, 6, 8), Ok(big / 8 * 6));
/// assert!(mul_div(1, 1, 0).is_err());
/// ```
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    narrow(mul_div_wide(a, b, denominator)?, "mul_div result exceeds 128 bits")
}

/// Like [`mul_div`] but keeps the 256-bit quotient.
///
/// # Errors
///
/// [`ZapError::ArithmeticOverflow`] if `denominator` is zero.
pub fn mul_div_wide(a: u128, b: u128, denominator: u128) -> Result<U256> {
    if denominator == 0 {
        return Err(ZapError::ArithmeticOverflow("mul_div by zero"));
    }
    // u128 * u128 always fits in 256 bits.
    Ok(U256::from(a) * U256::from(b) / U256::from(denominator))
}

/// Converts a 256-bit value back to `u128`.
///
/// # Errors
///
/// [`ZapError::ArithmeticOverflow`] carrying `context` if `value` does not
/// fit.
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(ZapError::ArithmeticOverflow(context));
    }
    Ok(value.as_u128())
}

/// `a · b` in 256 bits, failing instead of wrapping.
pub(crate) fn checked_mul_wide(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(ZapError::ArithmeticOverflow(context))
}

/// `a + b` in 256 bits, failing instead of wrapping.
pub(crate) fn checked_add_wide(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_add(b).ok_or(ZapError::ArithmeticOverflow(context))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values() {
        assert_eq!(mul_div(10, 20, 3), Ok(66));
        assert_eq!(mul_div(0, 20, 3), Ok(0));
    }

    #[test]
    fn wide_intermediate() {
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX), Ok(u128::MAX));
        assert_eq!(mul_div(u128::MAX, 2, 4), Ok(u128::MAX / 2));
    }

    #[test]
    fn quotient_too_large() {
        assert_eq!(
            mul_div(u128::MAX, 2, 1),
            Err(ZapError::ArithmeticOverflow("mul_div result exceeds 128 bits"))
        );
        assert!(mul_div_wide(u128::MAX, 2, 1).is_ok());
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(
            mul_div_wide(1, 1, 0),
            Err(ZapError::ArithmeticOverflow("mul_div by zero"))
        );
    }

    #[test]
    fn narrow_boundary() {
        assert_eq!(narrow(U256::from(u128::MAX), "x"), Ok(u128::MAX));
        assert!(narrow(U256::from(u128::MAX) + U256::ONE, "x").is_err());
    }

    #[test]
    fn checked_wide_ops() {
        assert!(checked_mul_wide(U256::MAX, U256::from(2u8), "m").is_err());
        assert!(checked_add_wide(U256::MAX, U256::ONE, "a").is_err());
        assert_eq!(
            checked_add_wide(U256::ONE, U256::ONE, "a"),
            Ok(U256::from(2u8))
        );
    }
}
