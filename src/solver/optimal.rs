//! Single-sided zap-in: how much of one asset to sell so the remainder
//! and the proceeds deposit in the pool's post-swap ratio.
//!
//! With a retained fee `f = FN/FD`, selling `s` of `a` into reserve `r`
//! balances when `FN·s² + r·(FD+FN)·s − FD·r·a = 0`, whose positive root is
//!
//! ```text
//! s = (√(r·(r·(FD+FN)² + 4·FD·FN·a)) − r·(FD+FN)) / (2·FN)
//! ```
//!
//! [`SolverKind::Halving`] instead reproduces the half-split estimate used
//! by deployed zap contracts: sell roughly half, then correct for the
//! price impact of that half.

use ethnum::U256;
use tracing::debug;

use super::quote::{quote, quote_out};
use super::SolverKind;
use crate::domain::{Amount, FeeRate, Reserves, Side, ZapPlan};
use crate::error::{Result, ZapError};
use crate::math::{checked_add_wide, checked_mul_wide, integer_sqrt, narrow};

/// Plans a single-sided zap of `amount_in` of the asset on `side_in`.
///
/// The plan's `sell_token0` is in pool order. A zero `amount_in` gives an
/// empty plan.
///
/// # Errors
///
/// - [`ZapError::InsufficientLiquidity`] if either reserve is zero.
/// - [`ZapError::ArithmeticOverflow`] if an intermediate exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Amount, FeeRate, Reserves, Side};
/// use cpmm_zap::solver::{optimal, SolverKind};
///
/// let reserves = Reserves::new(Amount::new(1_000_000), Amount::new(1_000_000));
/// let Ok(plan) = optimal::solve(
///     SolverKind::Quadratic,
///     Side::Token0,
///     Amount::new(10_000),
///     reserves,
///     FeeRate::STANDARD,
/// ) else { unreachable!() };
/// assert_eq!(plan.swap_amount_in(), Amount::new(4_995));
/// assert!(plan.sell_token0());
/// ```
pub fn solve(
    kind: SolverKind,
    side_in: Side,
    amount_in: Amount,
    reserves: Reserves,
    fee: FeeRate,
) -> Result<ZapPlan> {
    let (reserve_in, reserve_out) = reserves.oriented(side_in);
    let swap_in = swap_amount(kind, amount_in, reserve_in, reserve_out, fee)?;
    if swap_in.is_zero() {
        return Ok(ZapPlan::new(Amount::ZERO, Amount::ZERO, side_in.is_token0()));
    }
    let swap_out = quote_out(swap_in, reserve_in, reserve_out, fee)?;
    debug!(?kind, %amount_in, %swap_in, %swap_out, "single-sided plan");
    Ok(ZapPlan::new(swap_in, swap_out, side_in.is_token0()))
}

/// Amount of the deposited asset to sell. Never exceeds `amount_in`.
///
/// # Errors
///
/// See [`solve`].
pub fn swap_amount(
    kind: SolverKind,
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(ZapError::InsufficientLiquidity);
    }
    if amount_in.is_zero() {
        return Ok(Amount::ZERO);
    }
    let swap_in = match kind {
        SolverKind::Quadratic => quadratic_root(amount_in, reserve_in, fee)?,
        SolverKind::Halving => halving(amount_in, reserve_in, reserve_out, fee)?,
    };
    Ok(swap_in.min(amount_in))
}

fn quadratic_root(amount_in: Amount, reserve_in: Amount, fee: FeeRate) -> Result<Amount> {
    let fd = U256::from(fee.denominator());
    let fn_ = U256::from(fee.numerator());
    let k1 = fd + fn_;
    let r = U256::from(reserve_in.get());
    let a = U256::from(amount_in.get());

    let r_k1 = r * k1;
    let inner = checked_add_wide(
        checked_mul_wide(r_k1, k1, "optimal swap discriminant")?,
        checked_mul_wide(a, fd * fn_ * U256::from(4u8), "optimal swap discriminant")?,
        "optimal swap discriminant",
    )?;
    let discriminant = checked_mul_wide(r, inner, "optimal swap discriminant")?;
    let root = integer_sqrt(discriminant);
    let numerator = root.checked_sub(r_k1).unwrap_or(U256::ZERO);
    let s = numerator / (fn_ * U256::from(2u8));
    Ok(Amount::new(narrow(s, "optimal swap amount")?))
}

fn halving(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    let half = amount_in.half();
    if half.is_zero() {
        return Ok(Amount::ZERO);
    }
    let (received, matched) = halving_probe(half, reserve_in, reserve_out, fee)?;
    if received.is_zero() || matched.is_zero() {
        return Ok(Amount::ZERO);
    }
    impact_adjusted(half, received, matched)
}

/// Sells `probe` and reports `(received, matched)`: the swap output and
/// the amount of the bought asset that pairs with `probe` at the
/// post-swap price.
pub(crate) fn halving_probe(
    probe: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<(Amount, Amount)> {
    let received = quote_out(probe, reserve_in, reserve_out, fee)?;
    let post_in = reserve_in
        .checked_add(&probe)
        .ok_or(ZapError::ArithmeticOverflow("post-swap reserve"))?;
    let post_out = reserve_out
        .checked_sub(&received)
        .ok_or(ZapError::ArithmeticOverflow("post-swap reserve"))?;
    if post_out.is_zero() {
        return Ok((received, Amount::ZERO));
    }
    let matched = quote(probe, post_in, post_out)?;
    Ok((received, matched))
}

/// `2·t − √(t²·received / matched)`, or zero when that would go negative.
pub(crate) fn impact_adjusted(t: Amount, received: Amount, matched: Amount) -> Result<Amount> {
    let t_wide = U256::from(t.get());
    let product = checked_mul_wide(
        t_wide * t_wide,
        U256::from(received.get()),
        "halving impact term",
    )?;
    let correction = integer_sqrt(product / U256::from(matched.get()));
    let doubled = t_wide * U256::from(2u8);
    match doubled.checked_sub(correction) {
        Some(s) => Ok(Amount::new(narrow(s, "halving swap amount")?)),
        None => Ok(Amount::ZERO),
    }
}
