//! Solver output for a zap.

use core::fmt;

use super::Amount;

/// The balancing swap a zap has to perform.
///
/// `sell_token0` is relative to whatever ordering the producer was asked
/// about: pool order for the single-sided solver, the caller's argument
/// order for the rebalancing solver. A plan with a zero input is
/// *invalid* and means nothing needs to be swapped.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Amount, ZapPlan};
///
/// let plan = ZapPlan::new(Amount::new(500), Amount::new(480), true);
/// assert!(plan.is_valid());
/// assert!(!ZapPlan::empty().is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZapPlan {
    swap_amount_in: Amount,
    swap_amount_out: Amount,
    sell_token0: bool,
}

impl ZapPlan {
    /// Creates a plan.
    pub const fn new(swap_amount_in: Amount, swap_amount_out: Amount, sell_token0: bool) -> Self {
        Self {
            swap_amount_in,
            swap_amount_out,
            sell_token0,
        }
    }

    /// Nothing to swap.
    pub const fn empty() -> Self {
        Self::new(Amount::ZERO, Amount::ZERO, false)
    }

    /// Amount to sell.
    pub const fn swap_amount_in(&self) -> Amount {
        self.swap_amount_in
    }

    /// Amount expected back.
    pub const fn swap_amount_out(&self) -> Amount {
        self.swap_amount_out
    }

    /// Whether the first token (in the producer's ordering) is sold.
    #[must_use]
    pub const fn sell_token0(&self) -> bool {
        self.sell_token0
    }

    /// `false` when there is nothing to swap.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.swap_amount_in.is_zero()
    }

    /// Same amounts, complementary direction flag.
    pub const fn flipped(&self) -> Self {
        Self::new(self.swap_amount_in, self.swap_amount_out, !self.sell_token0)
    }
}

impl fmt::Display for ZapPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.sell_token0 { "token0" } else { "token1" };
        write!(
            f,
            "ZapPlan(sell {} {side}, receive {})",
            self.swap_amount_in, self.swap_amount_out
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plan_is_invalid() {
        let p = ZapPlan::empty();
        assert!(!p.is_valid());
        assert_eq!(p.swap_amount_in(), Amount::ZERO);
        assert_eq!(p, ZapPlan::default());
    }

    #[test]
    fn flipped_keeps_amounts() {
        let p = ZapPlan::new(Amount::new(3), Amount::new(2), true).flipped();
        assert!(!p.sell_token0());
        assert_eq!(p.swap_amount_out(), Amount::new(2));
    }

    #[test]
    fn display() {
        let p = ZapPlan::new(Amount::new(3), Amount::new(2), false);
        assert_eq!(p.to_string(), "ZapPlan(sell 3 token1, receive 2)");
    }
}
