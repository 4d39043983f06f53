//! Pool collaborator consumed by the zap engine.
//!
//! [`LiquidityPool`] is the only way the engine observes or changes pool
//! state. It covers the lifecycle of a zap:
//!
//! 1. **Inspect**: [`LiquidityPool::token_pair`], [`LiquidityPool::reserves`],
//!    [`LiquidityPool::total_supply`] and [`LiquidityPool::fee_rate`].
//! 2. **Swap**: [`LiquidityPool::swap`] sells one side into the other.
//! 3. **Deposit / withdraw**: [`LiquidityPool::mint_liquidity`] and
//!    [`LiquidityPool::burn_liquidity`].
//!
//! # Constant-Product Invariant
//!
//! Swaps must price with the fee-adjusted constant-product formula used
//! by [`quote_out`](crate::solver::quote_out), otherwise the engine's
//! slippage checks compare against the wrong curve:
//!
//! ```text
//! in_with_fee = amount_in · FN
//! amount_out  = in_with_fee · reserve_out / (reserve_in · FD + in_with_fee)
//! ```
//!
//! # Atomicity
//!
//! Each method either applies fully or returns an error and leaves the
//! pool untouched. The engine additionally stages whole zaps on a clone,
//! hence the `Clone` bound it places on implementors.

use crate::domain::{Address, Amount, FeeRate, Reserves, Side, TokenPair};
use crate::error::Result;

/// A two-asset constant-product pool with fungible LP shares.
///
/// # Errors
///
/// Implementations report failures with [`ZapError`](crate::error::ZapError):
///
/// - `InvalidAmount` for zero inputs.
/// - `InsufficientLiquidity` when reserves or supply cannot cover the
///   request.
/// - `ArithmeticOverflow` when an intermediate does not fit.
pub trait LiquidityPool {
    /// Identifier of the pool, which is also its LP token.
    #[must_use]
    fn address(&self) -> Address;

    /// The two assets in canonical order.
    #[must_use]
    fn token_pair(&self) -> TokenPair;

    /// Retained fraction of every swap input.
    #[must_use]
    fn fee_rate(&self) -> FeeRate;

    /// Current reserves, always read fresh.
    #[must_use]
    fn reserves(&self) -> Reserves;

    /// Outstanding LP shares.
    #[must_use]
    fn total_supply(&self) -> Amount;

    /// Sells `amount_in` of `side_in` and returns the amount of the other
    /// side paid out.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount_in` is zero or the output rounds to zero.
    /// - `InsufficientLiquidity` if a reserve is empty.
    fn swap(&mut self, side_in: Side, amount_in: Amount) -> Result<Amount>;

    /// Deposits exactly `amount0` and `amount1` and returns the LP minted.
    ///
    /// Amounts out of ratio are accepted; the excess is donated to the
    /// pool. Callers are expected to pass ratio-matched amounts.
    ///
    /// # Errors
    ///
    /// - `InsufficientLiquidity` if the deposit mints zero shares.
    fn mint_liquidity(&mut self, amount0: Amount, amount1: Amount) -> Result<Amount>;

    /// Burns `lp_amount` shares and returns the pro-rata reserves released.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` for zero `lp_amount`.
    /// - `InsufficientLiquidity` if `lp_amount` exceeds the supply.
    fn burn_liquidity(&mut self, lp_amount: Amount) -> Result<Reserves>;
}
