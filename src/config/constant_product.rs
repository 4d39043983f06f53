//! Configuration for the reference constant-product pool.

use crate::domain::{Amount, FeeRate, TokenPair};
use crate::error::ZapError;

/// Immutable parameters of a Uniswap-V2-style pair.
///
/// # Derived Values
///
/// - First deposit mints `√(amount0 · amount1)` shares, of which
///   `minimum_liquidity` are locked forever.
///
/// # Validation
///
/// - `minimum_liquidity` must be non-zero.
/// - The fee must satisfy `0 < numerator < denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantProductConfig {
    token_pair: TokenPair,
    fee_rate: FeeRate,
    minimum_liquidity: Amount,
}

impl ConstantProductConfig {
    /// Shares locked on the first deposit, as in Uniswap V2.
    pub const DEFAULT_MINIMUM_LIQUIDITY: Amount = Amount::new(1_000);

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidConfiguration`] if any invariant fails.
    pub fn new(
        token_pair: TokenPair,
        fee_rate: FeeRate,
        minimum_liquidity: Amount,
    ) -> Result<Self, ZapError> {
        let config = Self {
            token_pair,
            fee_rate,
            minimum_liquidity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration with the default 1 000-share lock.
    ///
    /// # Errors
    ///
    /// Same as [`ConstantProductConfig::new`].
    pub fn with_fee(token_pair: TokenPair, fee_rate: FeeRate) -> Result<Self, ZapError> {
        Self::new(token_pair, fee_rate, Self::DEFAULT_MINIMUM_LIQUIDITY)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidConfiguration`] naming the failed check.
    pub fn validate(&self) -> Result<(), ZapError> {
        if self.minimum_liquidity.is_zero() {
            return Err(ZapError::InvalidConfiguration(
                "minimum liquidity must be positive",
            ));
        }
        FeeRate::new(self.fee_rate.numerator(), self.fee_rate.denominator())?;
        Ok(())
    }

    /// The pool's assets.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Shares locked on the first deposit.
    pub const fn minimum_liquidity(&self) -> Amount {
        self.minimum_liquidity
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Address;

    fn make_pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(
            Address::from_bytes([1u8; 32]),
            Address::from_bytes([2u8; 32]),
        ) else {
            panic!("expected valid pair");
        };
        pair
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = ConstantProductConfig::with_fee(make_pair(), FeeRate::QUARTER_PERCENT) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.minimum_liquidity(), Amount::new(1_000));
        assert_eq!(cfg.fee_rate(), FeeRate::QUARTER_PERCENT);
        assert_eq!(*cfg.token_pair(), make_pair());
    }

    #[test]
    fn zero_minimum_liquidity_rejected() {
        assert_eq!(
            ConstantProductConfig::new(make_pair(), FeeRate::STANDARD, Amount::ZERO),
            Err(ZapError::InvalidConfiguration(
                "minimum liquidity must be positive"
            ))
        );
    }
}
