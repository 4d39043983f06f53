//! Reference [`NativeWrapper`]: a 1:1 wrapped-native ledger.
//!
//! Tracks only the native backing locked by wraps. Token balances of
//! individual holders are not modelled; the engine hands wrapped amounts
//! straight to the pool.

use crate::domain::{Address, Amount};
use crate::error::{Result, ZapError};
use crate::math::CheckedArithmetic;
use crate::traits::NativeWrapper;

/// Wrapped-native token backed one-to-one by locked native units.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Address, Amount};
/// use cpmm_zap::traits::NativeWrapper;
/// use cpmm_zap::wrapper::WrappedNative;
///
/// let mut weth = WrappedNative::new(Address::from_bytes([0xee; 32]));
/// assert_eq!(weth.wrap(Amount::new(5)), Ok(Amount::new(5)));
/// assert_eq!(weth.unwrap(Amount::new(2)), Ok(Amount::new(2)));
/// assert_eq!(weth.backing(), Amount::new(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrappedNative {
    token: Address,
    backing: Amount,
}

impl WrappedNative {
    /// New wrapper with no backing.
    #[must_use]
    pub const fn new(token: Address) -> Self {
        Self {
            token,
            backing: Amount::ZERO,
        }
    }

    /// Wrapper that already holds `backing` native units, e.g. the supply
    /// sitting in pools at startup.
    #[must_use]
    pub const fn with_backing(token: Address, backing: Amount) -> Self {
        Self { token, backing }
    }

    /// Native units currently locked.
    pub const fn backing(&self) -> Amount {
        self.backing
    }
}

impl NativeWrapper for WrappedNative {
    fn wrapped_token(&self) -> Address {
        self.token
    }

    fn wrap(&mut self, amount: Amount) -> Result<Amount> {
        if amount.is_zero() {
            return Err(ZapError::InvalidAmount("wrap amount is zero"));
        }
        self.backing = self.backing.safe_add(&amount)?;
        Ok(amount)
    }

    fn unwrap(&mut self, amount: Amount) -> Result<Amount> {
        if amount.is_zero() {
            return Err(ZapError::InvalidAmount("unwrap amount is zero"));
        }
        self.backing = self
            .backing
            .checked_sub(&amount)
            .ok_or(ZapError::InsufficientLiquidity)?;
        Ok(amount)
    }
}
