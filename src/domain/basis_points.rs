//! Basis-point ratios.

use core::fmt;

use ethnum::U256;

use super::Amount;

/// Denominator of a basis-point ratio: 10 000 bp = 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A ratio expressed in basis points (1 bp = 0.01%).
///
/// Used for the reverse-ratio bound: the forced swap of a zap may not
/// exceed this fraction of the reserve being sold into.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Amount, BasisPoints};
///
/// let one_percent = BasisPoints::new(100);
/// assert!(one_percent.is_valid_percent());
/// assert!(one_percent.admits(Amount::new(10), Amount::new(1_000)));
/// assert!(!one_percent.admits(Amount::new(11), Amount::new(1_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Wraps a raw basis-point value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// `true` for values in `1..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 > 0 && self.0 <= BPS_DENOMINATOR
    }

    /// Floor of `amount * self / 10_000`.
    pub fn apply(&self, amount: Amount) -> Amount {
        let scaled = U256::from(amount.get()) * U256::from(self.0) / U256::from(BPS_DENOMINATOR);
        // self <= 10_000 keeps the result <= amount; larger ratios clamp.
        if scaled > U256::from(u128::MAX) {
            Amount::MAX
        } else {
            Amount::new(scaled.as_u128())
        }
    }

    /// Returns `true` when `part <= whole * self / 10_000`, compared
    /// without rounding.
    #[must_use]
    pub fn admits(&self, part: Amount, whole: Amount) -> bool {
        let lhs = U256::from(part.get()) * U256::from(BPS_DENOMINATOR);
        let rhs = U256::from(whole.get()) * U256::from(self.0);
        lhs <= rhs
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
