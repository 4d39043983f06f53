//! Checked arithmetic that reports [`ZapError`] instead of `None`.
//!
//! # Examples
//!
//! ```
//! use cpmm_zap::domain::Amount;
//! use cpmm_zap::error::ZapError;
//! use cpmm_zap::math::CheckedArithmetic;
//!
//! let a = Amount::new(1);
//! assert_eq!(a.safe_add(&Amount::new(2)), Ok(Amount::new(3)));
//! assert!(matches!(a.safe_sub(&Amount::new(2)), Err(ZapError::ArithmeticOverflow(_))));
//! ```

use crate::domain::Amount;
use crate::error::ZapError;

/// Fallible arithmetic for amount-like wrappers.
///
/// No method panics and none saturates; every failure becomes
/// [`ZapError::ArithmeticOverflow`] with a description of the operation.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`ZapError::ArithmeticOverflow`] if the sum does not fit.
    fn safe_add(&self, other: &Self) -> Result<Self, ZapError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`ZapError::ArithmeticOverflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, ZapError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// [`ZapError::ArithmeticOverflow`] if the product does not fit.
    fn safe_mul(&self, other: &Self) -> Result<Self, ZapError>;

    /// Floor division.
    ///
    /// # Errors
    ///
    /// [`ZapError::ArithmeticOverflow`] if `other` is zero.
    fn safe_div(&self, other: &Self) -> Result<Self, ZapError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ZapError> {
        self.checked_add(other)
            .ok_or(ZapError::ArithmeticOverflow("amount addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ZapError> {
        self.checked_sub(other)
            .ok_or(ZapError::ArithmeticOverflow("amount subtraction"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, ZapError> {
        self.checked_mul(other)
            .ok_or(ZapError::ArithmeticOverflow("amount multiplication"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, ZapError> {
        self.checked_div(other)
            .ok_or(ZapError::ArithmeticOverflow("amount division by zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_overflow() {
        assert_eq!(Amount::new(1).safe_add(&Amount::new(1)), Ok(Amount::new(2)));
        assert_eq!(
            Amount::MAX.safe_add(&Amount::new(1)),
            Err(ZapError::ArithmeticOverflow("amount addition"))
        );
    }

    #[test]
    fn sub_underflow_is_reported() {
        assert_eq!(
            Amount::ZERO.safe_sub(&Amount::new(1)),
            Err(ZapError::ArithmeticOverflow("amount subtraction"))
        );
    }

    #[test]
    fn mul_and_div() {
        assert_eq!(Amount::new(4).safe_mul(&Amount::new(5)), Ok(Amount::new(20)));
        assert!(Amount::MAX.safe_mul(&Amount::new(2)).is_err());
        assert_eq!(Amount::new(20).safe_div(&Amount::new(6)), Ok(Amount::new(3)));
        assert!(Amount::new(20).safe_div(&Amount::ZERO).is_err());
    }
}
