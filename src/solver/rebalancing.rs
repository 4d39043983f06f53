//! Two-sided zap-in: deposit an arbitrary mix of both pool assets by first
//! selling the excess of whichever side is over-weight.
//!
//! The balancing condition for a mix `(a_sell, a_buy)` reduces exactly to
//! the single-sided one on the effective excess
//!
//! ```text
//! e = (a_sell·r_buy − a_buy·r_sell) / (r_buy + a_buy)
//! ```
//!
//! so with `a_buy = 0` the result is bit-identical to
//! [`optimal::swap_amount`](super::optimal::swap_amount).

use ethnum::U256;
use tracing::debug;

use super::optimal::{self, halving_probe, impact_adjusted};
use super::quote::quote_out;
use super::{Orientation, SolverKind};
use crate::domain::{Amount, FeeRate, Reserves, Side, ZapPlan};
use crate::error::{Result, ZapError};
use crate::math::{mul_div_wide, narrow};

/// Plans a rebalancing zap for amounts given in the caller's order.
///
/// The returned `sell_token0` refers to the caller's first token, so
/// swapping the caller's arguments yields the same amounts with the
/// complementary flag. Already balanced inputs give an empty plan.
///
/// # Errors
///
/// - [`ZapError::InsufficientLiquidity`] if either reserve is zero.
/// - [`ZapError::ArithmeticOverflow`] if an intermediate exceeds 256 bits.
pub fn solve(
    kind: SolverKind,
    orientation: Orientation,
    amount_first: Amount,
    amount_second: Amount,
    reserves: Reserves,
    fee: FeeRate,
) -> Result<ZapPlan> {
    if reserves.reserve0.is_zero() || reserves.reserve1.is_zero() {
        return Err(ZapError::InsufficientLiquidity);
    }
    let (amount0, amount1) = orientation.to_pool(amount_first, amount_second);
    let Some(sell) = swap_direction(amount0, amount1, reserves) else {
        debug!(%amount0, %amount1, "inputs already balanced");
        return Ok(ZapPlan::empty());
    };

    let (a_sell, a_buy) = match sell {
        Side::Token0 => (amount0, amount1),
        Side::Token1 => (amount1, amount0),
    };
    let (r_sell, r_buy) = reserves.oriented(sell);
    let swap_in = swap_amount(kind, a_sell, a_buy, r_sell, r_buy, fee)?;
    let sell_first = orientation.flag_to_caller(sell.is_token0());
    if swap_in.is_zero() {
        return Ok(ZapPlan::new(Amount::ZERO, Amount::ZERO, sell_first));
    }
    let swap_out = quote_out(swap_in, r_sell, r_buy, fee)?;
    debug!(?kind, ?sell, %swap_in, %swap_out, "rebalancing plan");
    Ok(ZapPlan::new(swap_in, swap_out, sell_first))
}

/// Side to sell for pool-ordered amounts: token0 iff
/// `amount0·reserve1 > amount1·reserve0`. `None` when balanced.
#[must_use]
pub fn swap_direction(amount0: Amount, amount1: Amount, reserves: Reserves) -> Option<Side> {
    let lhs = U256::from(amount0.get()) * U256::from(reserves.reserve1.get());
    let rhs = U256::from(amount1.get()) * U256::from(reserves.reserve0.get());
    match lhs.cmp(&rhs) {
        core::cmp::Ordering::Greater => Some(Side::Token0),
        core::cmp::Ordering::Less => Some(Side::Token1),
        core::cmp::Ordering::Equal => None,
    }
}

/// Amount of the over-weight asset to sell, given its excess over the pool
/// ratio. Requires `a_sell·r_buy > a_buy·r_sell`; otherwise returns zero.
///
/// # Errors
///
/// See [`solve`].
pub fn swap_amount(
    kind: SolverKind,
    a_sell: Amount,
    a_buy: Amount,
    r_sell: Amount,
    r_buy: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    if r_sell.is_zero() || r_buy.is_zero() {
        return Err(ZapError::InsufficientLiquidity);
    }
    match kind {
        SolverKind::Quadratic => {
            let excess = effective_excess(a_sell, a_buy, r_sell, r_buy)?;
            optimal::swap_amount(kind, excess, r_sell, r_buy, fee)
        }
        SolverKind::Halving => halving(a_sell, a_buy, r_sell, r_buy, fee),
    }
}

/// `(a_sell·r_buy − a_buy·r_sell) / (r_buy + a_buy)`, floored at zero.
fn effective_excess(a_sell: Amount, a_buy: Amount, r_sell: Amount, r_buy: Amount) -> Result<Amount> {
    let sell_side = U256::from(a_sell.get()) * U256::from(r_buy.get());
    let buy_side = U256::from(a_buy.get()) * U256::from(r_sell.get());
    let Some(numerator) = sell_side.checked_sub(buy_side) else {
        return Ok(Amount::ZERO);
    };
    let denominator = U256::from(r_buy.get()) + U256::from(a_buy.get());
    // Bounded by a_sell.
    Ok(Amount::new(narrow(numerator / denominator, "effective excess")?))
}

fn halving(
    a_sell: Amount,
    a_buy: Amount,
    r_sell: Amount,
    r_buy: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    let Some(first) = half_excess(a_sell, mul_div_wide(a_buy.get(), r_sell.get(), r_buy.get())?)
    else {
        return Ok(Amount::ZERO);
    };
    if first.is_zero() {
        return Ok(Amount::ZERO);
    }
    let (received, matched) = halving_probe(first, r_sell, r_buy, fee)?;
    if received.is_zero() || matched.is_zero() {
        return Ok(Amount::ZERO);
    }

    // Re-price the buy-side holding against the post-probe reserves.
    let post_sell = r_sell
        .checked_add(&first)
        .ok_or(ZapError::ArithmeticOverflow("post-swap reserve"))?;
    let post_buy = r_buy
        .checked_sub(&received)
        .ok_or(ZapError::ArithmeticOverflow("post-swap reserve"))?;
    let repriced = mul_div_wide(a_buy.get(), post_sell.get(), post_buy.get())?;
    let Some(refined) = half_excess(a_sell, repriced) else {
        return Ok(Amount::ZERO);
    };
    if refined.is_zero() {
        return Ok(Amount::ZERO);
    }
    impact_adjusted(refined, received, matched)
}

/// `(a_sell − matched) / 2`, or `None` if `matched` exceeds `a_sell`.
fn half_excess(a_sell: Amount, matched: U256) -> Option<Amount> {
    let excess = U256::from(a_sell.get()).checked_sub(matched)?;
    // Bounded by a_sell / 2.
    Some(Amount::new((excess >> 1u32).as_u128()))
}
