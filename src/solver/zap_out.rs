//! Zap-out: burn LP shares and convert the unwanted half into the target.

use tracing::debug;

use super::quote::quote_out;
use crate::domain::{Address, Amount, FeeRate, Reserves, Side, SwapQuote, TokenPair};
use crate::error::{Result, ZapError};
use crate::math::{mul_div, CheckedArithmetic};

/// Estimated result of a zap-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZapOutEstimate {
    /// Conversion swap of the non-target proceeds; `token_out` names the
    /// asset that is sold.
    pub quote: SwapQuote,
    /// Target-asset amount released directly by the burn.
    pub direct_amount: Amount,
    /// Pool side of the requested asset.
    pub target: Side,
}

impl ZapOutEstimate {
    /// Direct burn proceeds plus the converted amount.
    ///
    /// # Errors
    ///
    /// [`ZapError::ArithmeticOverflow`] if the sum does not fit.
    pub fn total_out(&self) -> Result<Amount> {
        self.direct_amount.safe_add(&self.quote.amount_out())
    }
}

/// Pro-rata burn proceeds `lp · reserve_i / total_supply`, floored.
///
/// # Errors
///
/// - [`ZapError::InvalidAmount`] for zero `lp_amount`.
/// - [`ZapError::InsufficientLiquidity`] if the supply is zero or smaller
///   than `lp_amount`, or either side of the burn rounds to zero.
pub fn burn_amounts(lp_amount: Amount, reserves: Reserves, total_supply: Amount) -> Result<Reserves> {
    if lp_amount.is_zero() {
        return Err(ZapError::InvalidAmount("lp amount is zero"));
    }
    if total_supply.is_zero() || lp_amount > total_supply {
        return Err(ZapError::InsufficientLiquidity);
    }
    let amount0 = mul_div(lp_amount.get(), reserves.reserve0.get(), total_supply.get())?;
    let amount1 = mul_div(lp_amount.get(), reserves.reserve1.get(), total_supply.get())?;
    if amount0 == 0 || amount1 == 0 {
        return Err(ZapError::InsufficientLiquidity);
    }
    Ok(Reserves::new(Amount::new(amount0), Amount::new(amount1)))
}

/// Estimates converting `lp_amount` shares entirely into `token_to_receive`.
///
/// The conversion is priced against the reserves left after the burn,
/// which is what executing the zap-out will see.
///
/// # Errors
///
/// - [`ZapError::TokenNotInPool`] if `token_to_receive` is not a member.
/// - [`ZapError::InvalidAmount`] if the conversion output floors to zero.
/// - Any error of [`burn_amounts`] or [`quote_out`].
pub fn estimate(
    pair: &TokenPair,
    reserves: Reserves,
    total_supply: Amount,
    fee: FeeRate,
    token_to_receive: &Address,
    lp_amount: Amount,
) -> Result<ZapOutEstimate> {
    let target = pair.side_of(token_to_receive).ok_or(ZapError::TokenNotInPool)?;
    let burned = burn_amounts(lp_amount, reserves, total_supply)?;
    let post_burn = Reserves::new(
        reserves.reserve0.safe_sub(&burned.reserve0)?,
        reserves.reserve1.safe_sub(&burned.reserve1)?,
    );

    let sold = target.opposite();
    let amount_in = burned.of(sold);
    let (reserve_in, reserve_out) = post_burn.oriented(sold);
    let amount_out = quote_out(amount_in, reserve_in, reserve_out, fee)?;
    if amount_out.is_zero() {
        return Err(ZapError::InvalidAmount("swap output is zero"));
    }
    debug!(%lp_amount, ?target, %amount_in, %amount_out, "zap-out estimate");
    Ok(ZapOutEstimate {
        quote: SwapQuote::new(amount_in, amount_out, pair.token(sold)),
        direct_amount: burned.of(target),
        target,
    })
}
