//! What a committed zap hands back to the caller.

use crate::domain::{Address, Amount};

use super::{ZapEvent, ZapStage};

/// Unused input returned to the caller after the deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Refund {
    /// Asset refunded; [`Address::NATIVE`] when the wrapped asset was
    /// unwrapped on the way out.
    pub token: Address,
    /// Amount refunded.
    pub amount: Amount,
}

/// Committed outcome of a state-changing zap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZapReceipt {
    /// The journalled record.
    pub event: ZapEvent,
    /// LP minted for a zap-in, target asset received for a zap-out.
    pub amount_out: Amount,
    /// Dust left over by the proportional deposit, one entry per asset
    /// with a non-zero remainder.
    pub refunds: Vec<Refund>,
    /// Stages visited, from [`ZapStage::Idle`] to [`ZapStage::Done`].
    pub stages: Vec<ZapStage>,
}

impl ZapReceipt {
    /// Refunded amount of `token`, zero if none.
    #[must_use]
    pub fn refund_of(&self, token: &Address) -> Amount {
        self.refunds
            .iter()
            .find(|r| r.token == *token)
            .map_or(Amount::ZERO, |r| r.amount)
    }

    /// Whether the zap went through a swap.
    #[must_use]
    pub fn swapped(&self) -> bool {
        self.stages.contains(&ZapStage::Swapping)
    }
}
