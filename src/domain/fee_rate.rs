//! Pool trading fee as a retained fraction.

use core::fmt;

use crate::error::ZapError;

/// Fraction of the input that reaches the curve after the fee:
/// `numerator / denominator`, e.g. 997/1000 for a 0.3% fee.
///
/// A valid rate has `0 < numerator < denominator`.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::FeeRate;
///
/// assert_eq!(FeeRate::STANDARD.numerator(), 997);
/// assert_eq!(FeeRate::STANDARD.fee_basis_points(), 30);
/// assert!(FeeRate::new(1000, 1000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeRate {
    numerator: u32,
    denominator: u32,
}

impl FeeRate {
    /// 0.30% fee (997/1000).
    pub const STANDARD: Self = Self {
        numerator: 997,
        denominator: 1_000,
    };

    /// 0.25% fee (9975/10000).
    pub const QUARTER_PERCENT: Self = Self {
        numerator: 9_975,
        denominator: 10_000,
    };

    /// Creates a validated fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidConfiguration`] unless
    /// `0 < numerator < denominator`.
    pub const fn new(numerator: u32, denominator: u32) -> Result<Self, ZapError> {
        if numerator == 0 {
            return Err(ZapError::InvalidConfiguration("fee numerator must be positive"));
        }
        if numerator >= denominator {
            return Err(ZapError::InvalidConfiguration(
                "fee numerator must be below the denominator",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Retained-fraction numerator.
    #[must_use]
    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Retained-fraction denominator.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// The fee itself in basis points, rounded down.
    #[must_use]
    pub const fn fee_basis_points(&self) -> u32 {
        let fee = (self.denominator - self.numerator) as u64 * 10_000;
        (fee / self.denominator as u64) as u32
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(FeeRate::STANDARD.fee_basis_points(), 30);
        assert_eq!(FeeRate::QUARTER_PERCENT.fee_basis_points(), 25);
        assert_eq!(FeeRate::default(), FeeRate::STANDARD);
    }

    #[test]
    fn validation() {
        assert!(FeeRate::new(0, 1000).is_err());
        assert!(FeeRate::new(1000, 1000).is_err());
        assert!(FeeRate::new(1001, 1000).is_err());
        assert_eq!(FeeRate::new(997, 1000), Ok(FeeRate::STANDARD));
    }

    #[test]
    fn display() {
        assert_eq!(FeeRate::QUARTER_PERCENT.to_string(), "9975/10000");
    }
}
