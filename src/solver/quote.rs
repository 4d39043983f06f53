//! Constant-product swap and proportional quotes.

use ethnum::U256;

use crate::domain::{Amount, FeeRate};
use crate::error::{Result, ZapError};
use crate::math::{checked_add_wide, checked_mul_wide, mul_div, narrow};

/// Output of selling `amount_in` into a constant-product pool.
///
/// ```text
/// in_with_fee = amount_in · FN
/// amount_out  = in_with_fee · reserve_out / (reserve_in · FD + in_with_fee)
/// ```
///
/// # Errors
///
/// - [`ZapError::InvalidAmount`] if `amount_in` is zero.
/// - [`ZapError::InsufficientLiquidity`] if either reserve is zero.
/// - [`ZapError::ArithmeticOverflow`] if the product exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Amount, FeeRate};
/// use cpmm_zap::solver::quote_out;
///
/// let out = quote_out(
///     Amount::new(1_000),
///     Amount::new(1_000_000),
///     Amount::new(1_000_000),
///     FeeRate::STANDARD,
/// );
/// assert_eq!(out, Ok(Amount::new(996)));
/// ```
pub fn quote_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeRate,
) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(ZapError::InvalidAmount("swap input is zero"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(ZapError::InsufficientLiquidity);
    }
    let in_with_fee = U256::from(amount_in.get()) * U256::from(fee.numerator());
    let numerator = checked_mul_wide(in_with_fee, U256::from(reserve_out.get()), "swap numerator")?;
    let denominator = checked_add_wide(
        U256::from(reserve_in.get()) * U256::from(fee.denominator()),
        in_with_fee,
        "swap denominator",
    )?;
    // Output is strictly below reserve_out.
    Ok(Amount::new(narrow(numerator / denominator, "swap output")?))
}

/// Proportional amount of B matching `amount_a` at ratio `reserve_b / reserve_a`.
///
/// # Errors
///
/// - [`ZapError::InvalidAmount`] if `amount_a` is zero.
/// - [`ZapError::InsufficientLiquidity`] if either reserve is zero.
/// - [`ZapError::ArithmeticOverflow`] if the quote does not fit in 128 bits.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    if amount_a.is_zero() {
        return Err(ZapError::InvalidAmount("quote amount is zero"));
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(ZapError::InsufficientLiquidity);
    }
    mul_div(amount_a.get(), reserve_b.get(), reserve_a.get()).map(Amount::new)
}
