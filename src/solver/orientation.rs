//! Mapping between a caller's argument order and a pool's canonical order.

use crate::domain::{Address, Side, TokenPair};
use crate::error::{Result, ZapError};

/// Where the caller's first token sits in the pool.
///
/// Built once per call by [`Orientation::resolve`]; all later mappings are
/// pure and lossless in both directions.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Address, TokenPair};
/// use cpmm_zap::solver::Orientation;
///
/// let lo = Address::from_bytes([1; 32]);
/// let hi = Address::from_bytes([2; 32]);
/// let Ok(pair) = TokenPair::new(lo, hi) else { unreachable!() };
///
/// let Ok(o) = Orientation::resolve(&pair, &hi, &lo) else { unreachable!() };
/// assert!(o.is_reversed());
/// assert_eq!(o.to_pool(10u128, 20u128), (20, 10));
/// assert!(!o.flag_to_caller(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    first: Side,
}

impl Orientation {
    /// Validates membership of both caller tokens and records the order.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`ZapError::WrongToken0`] if `first` is not a member.
    /// - [`ZapError::WrongToken1`] if `second` is not a member.
    /// - [`ZapError::SameAsset`] if both are the same token.
    pub fn resolve(pair: &TokenPair, first: &Address, second: &Address) -> Result<Self> {
        let first_side = pair.side_of(first).ok_or(ZapError::WrongToken0)?;
        if !pair.contains(second) {
            return Err(ZapError::WrongToken1);
        }
        if first == second {
            return Err(ZapError::SameAsset);
        }
        Ok(Self { first: first_side })
    }

    /// Orientation whose first token sits on `side`.
    #[must_use]
    pub const fn with_first_on(side: Side) -> Self {
        Self { first: side }
    }

    /// `true` when the caller listed the pool's token1 first.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        matches!(self.first, Side::Token1)
    }

    /// Pool side of the caller's first token.
    #[must_use]
    pub const fn first_side(&self) -> Side {
        self.first
    }

    /// Reorders a caller-ordered pair of values into pool order.
    pub fn to_pool<T>(&self, first: T, second: T) -> (T, T) {
        if self.is_reversed() {
            (second, first)
        } else {
            (first, second)
        }
    }

    /// Reorders a pool-ordered pair of values into caller order.
    pub fn to_caller<T>(&self, value0: T, value1: T) -> (T, T) {
        // The permutation is its own inverse.
        self.to_pool(value0, value1)
    }

    /// Converts "sell pool token0" into "sell caller's first token".
    #[must_use]
    pub const fn flag_to_caller(&self, sell_pool_token0: bool) -> bool {
        sell_pool_token0 != self.is_reversed()
    }

    /// Converts "sell caller's first token" into "sell pool token0".
    #[must_use]
    pub const fn flag_to_pool(&self, sell_first: bool) -> bool {
        // XOR is an involution.
        self.flag_to_caller(sell_first)
    }
}
