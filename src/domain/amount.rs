//! Raw token amount with checked arithmetic.

use core::fmt;

/// A token amount in the smallest unit (wei or equivalent).
///
/// Zero is a legal value and means "nothing on this side" in deposit
/// and refund records. Arithmetic is checked: methods return `None` on
/// overflow, underflow or division by zero. Products that can exceed
/// 128 bits go through [`crate::math::mul_div`] instead.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(250);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(350)));
/// assert_eq!(a.checked_sub(&b), None);
/// assert_eq!(b.half(), Amount::new(125));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Floor of half the amount.
    pub const fn half(&self) -> Self {
        Self(self.0 / 2)
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Floor division. `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self) -> Option<Self> {
        match self.0.checked_div(divisor.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
