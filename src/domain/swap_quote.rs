//! Read-only swap estimate.

use core::fmt;

use super::{Address, Amount};

/// Estimated swap: sell `amount_in`, receive `amount_out` of `token_out`.
///
/// Produced by the single-sided and zap-out estimators. For a zap-in,
/// `token_out` is the pool asset received; for a zap-out it is the asset
/// that gets sold (the counterpart of the requested output).
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Address, Amount, SwapQuote};
///
/// let q = SwapQuote::new(Amount::new(10), Amount::new(9), Address::from_bytes([1; 32]));
/// assert_eq!(q.amount_in(), Amount::new(10));
/// assert!(!q.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapQuote {
    amount_in: Amount,
    amount_out: Amount,
    token_out: Address,
}

impl SwapQuote {
    /// Creates a quote.
    pub const fn new(amount_in: Amount, amount_out: Amount, token_out: Address) -> Self {
        Self {
            amount_in,
            amount_out,
            token_out,
        }
    }

    /// Amount sold.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount received.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// See the type-level docs for which token this names.
    #[must_use]
    pub const fn token_out(&self) -> Address {
        self.token_out
    }

    /// `true` when nothing would be sold.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount_in.is_zero()
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote(in={}, out={} of {})",
            self.amount_in, self.amount_out, self.token_out
        )
    }
}
