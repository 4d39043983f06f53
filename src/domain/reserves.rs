//! Pool reserve snapshot.

use super::{Amount, Side};

/// Reserves of a pool in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reserves {
    /// Reserve of token0.
    pub reserve0: Amount,
    /// Reserve of token1.
    pub reserve1: Amount,
}

impl Reserves {
    /// Creates a snapshot.
    pub const fn new(reserve0: Amount, reserve1: Amount) -> Self {
        Self { reserve0, reserve1 }
    }

    /// Reserve on `side`.
    pub const fn of(&self, side: Side) -> Amount {
        match side {
            Side::Token0 => self.reserve0,
            Side::Token1 => self.reserve1,
        }
    }

    /// `(reserve_in, reserve_out)` for a swap selling `side_in`.
    #[must_use]
    pub const fn oriented(&self, side_in: Side) -> (Amount, Amount) {
        match side_in {
            Side::Token0 => (self.reserve0, self.reserve1),
            Side::Token1 => (self.reserve1, self.reserve0),
        }
    }

    /// `true` when both reserves are at least `minimum`.
    #[must_use]
    pub fn both_at_least(&self, minimum: Amount) -> bool {
        self.reserve0 >= minimum && self.reserve1 >= minimum
    }
}
