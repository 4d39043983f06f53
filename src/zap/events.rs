//! Records emitted by committed zaps.

use core::fmt;

use crate::domain::{Address, Amount};

/// Outcome record of a committed zap.
///
/// The native asset appears as [`Address::NATIVE`] in `token_in`,
/// `token0` and `token_out`; the pool itself only ever sees the wrapped
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZapEvent {
    /// Single-asset zap-in.
    ZapIn {
        /// Deposited asset.
        token_in: Address,
        /// Pool (LP token) address.
        lp_token: Address,
        /// Amount the caller paid in.
        amount_in: Amount,
        /// LP shares minted to the caller.
        lp_out: Amount,
        /// Caller.
        caller: Address,
    },
    /// Two-asset zap-in.
    ZapInRebalancing {
        /// Caller's first asset.
        token0: Address,
        /// Caller's second asset.
        token1: Address,
        /// Pool (LP token) address.
        lp_token: Address,
        /// Amount of `token0` paid in.
        amount0_in: Amount,
        /// Amount of `token1` paid in.
        amount1_in: Amount,
        /// LP shares minted to the caller.
        lp_out: Amount,
        /// Caller.
        caller: Address,
    },
    /// Zap-out into a single asset.
    ZapOut {
        /// Pool (LP token) address.
        lp_token: Address,
        /// Asset received.
        token_out: Address,
        /// LP shares burned.
        lp_in: Amount,
        /// Total of `token_out` received.
        amount_out: Amount,
        /// Caller.
        caller: Address,
    },
}

impl ZapEvent {
    /// Pool the event refers to.
    #[must_use]
    pub const fn lp_token(&self) -> Address {
        match self {
            Self::ZapIn { lp_token, .. }
            | Self::ZapInRebalancing { lp_token, .. }
            | Self::ZapOut { lp_token, .. } => *lp_token,
        }
    }

    /// Caller that triggered the zap.
    #[must_use]
    pub const fn caller(&self) -> Address {
        match self {
            Self::ZapIn { caller, .. }
            | Self::ZapInRebalancing { caller, .. }
            | Self::ZapOut { caller, .. } => *caller,
        }
    }

    /// Record name as emitted.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ZapIn { .. } => "ZapIn",
            Self::ZapInRebalancing { .. } => "ZapInRebalancing",
            Self::ZapOut { .. } => "ZapOut",
        }
    }
}

impl fmt::Display for ZapEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZapIn {
                token_in,
                lp_token,
                amount_in,
                lp_out,
                caller,
            } => write!(
                f,
                "ZapIn({token_in}, {lp_token}, {amount_in}, {lp_out}, {caller})"
            ),
            Self::ZapInRebalancing {
                token0,
                token1,
                lp_token,
                amount0_in,
                amount1_in,
                lp_out,
                caller,
            } => write!(
                f,
                "ZapInRebalancing({token0}, {token1}, {lp_token}, {amount0_in}, {amount1_in}, {lp_out}, {caller})"
            ),
            Self::ZapOut {
                lp_token,
                token_out,
                lp_in,
                amount_out,
                caller,
            } => write!(
                f,
                "ZapOut({lp_token}, {token_out}, {lp_in}, {amount_out}, {caller})"
            ),
        }
    }
}
