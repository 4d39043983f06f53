//! Canonically ordered pair of distinct token addresses.

use super::{Address, Side};
use crate::error::ZapError;

/// An unordered pair of distinct tokens, stored lower address first.
///
/// Construction sorts the inputs, so `(A, B)` and `(B, A)` yield the
/// same pair. `first()` is the pool's token0.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Address, Side, TokenPair};
///
/// let a = Address::from_bytes([1u8; 32]);
/// let b = Address::from_bytes([2u8; 32]);
/// let Ok(pair) = TokenPair::new(b, a) else { unreachable!() };
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair.side_of(&b), Some(Side::Token1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::SameAsset`] if both addresses are equal.
    pub fn new(a: Address, b: Address) -> Result<Self, ZapError> {
        if a == b {
            return Err(ZapError::SameAsset);
        }
        let (token0, token1) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { token0, token1 })
    }

    /// The lower-address token (pool token0).
    #[must_use]
    pub const fn first(&self) -> Address {
        self.token0
    }

    /// The higher-address token (pool token1).
    #[must_use]
    pub const fn second(&self) -> Address {
        self.token1
    }

    /// Token at the given side.
    #[must_use]
    pub const fn token(&self, side: Side) -> Address {
        match side {
            Side::Token0 => self.token0,
            Side::Token1 => self.token1,
        }
    }

    /// `true` if `token` is one of the two members.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Side on which `token` sits, or `None` for a foreign token.
    #[must_use]
    pub fn side_of(&self, token: &Address) -> Option<Side> {
        if *token == self.token0 {
            Some(Side::Token0)
        } else if *token == self.token1 {
            Some(Side::Token1)
        } else {
            None
        }
    }

    /// Counterpart of `token` in the pair.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::TokenNotInPool`] if `token` is not a member.
    pub fn other(&self, token: &Address) -> Result<Address, ZapError> {
        self.side_of(token)
            .map(|side| self.token(side.opposite()))
            .ok_or(ZapError::TokenNotInPool)
    }
}
