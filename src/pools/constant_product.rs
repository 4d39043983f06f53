//! Reference constant-product pair (Uniswap V2 style) with fungible LP
//! shares.
//!
//! # Swap Algorithm (token0 → token1)
//!
//! 1. `amount_out = quote_out(amount_in, reserve0, reserve1, fee)`
//! 2. `reserve0 += amount_in` (the fee stays in the pool)
//! 3. `reserve1 -= amount_out`
//!
//! # Share Accounting
//!
//! - First deposit: `supply = √(amount0 · amount1)`; `minimum_liquidity`
//!   of it is locked and never returned to the depositor.
//! - Later deposits: `min(amount0 · supply / reserve0, amount1 · supply / reserve1)`.
//! - Burns: `lp · reserve_i / supply` of each asset.
//!
//! # Invariant
//!
//! After every swap, `k_after ≥ k_before` because the fee component
//! increases reserves without a corresponding output.

use ethnum::U256;

use crate::config::ConstantProductConfig;
use crate::domain::{Address, Amount, FeeRate, Reserves, Side, TokenPair};
use crate::error::{Result, ZapError};
use crate::math::{integer_sqrt, mul_div, narrow, CheckedArithmetic};
use crate::solver::{quote_out, zap_out};
use crate::traits::LiquidityPool;

/// A constant-product pool (`x · y = k`).
///
/// # State
///
/// - `reserve0` / `reserve1`: current balances, fees included.
/// - `total_supply`: outstanding LP shares, locked minimum included.
///
/// # Example
///
/// ```rust
/// use cpmm_zap::config::ConstantProductConfig;
/// use cpmm_zap::domain::{Address, Amount, FeeRate, Side, TokenPair};
/// use cpmm_zap::pools::ConstantProductPool;
/// use cpmm_zap::traits::LiquidityPool;
///
/// let pair = TokenPair::new(Address::from_bytes([1; 32]), Address::from_bytes([2; 32]))
///     .expect("distinct");
/// let cfg = ConstantProductConfig::with_fee(pair, FeeRate::STANDARD).expect("valid config");
/// let mut pool = ConstantProductPool::with_liquidity(
///     Address::from_bytes([9; 32]),
///     &cfg,
///     Amount::new(1_000_000),
///     Amount::new(1_000_000),
/// )
/// .expect("seeded");
///
/// let out = pool.swap(Side::Token0, Amount::new(1_000)).expect("swap ok");
/// assert_eq!(out, Amount::new(996));
/// assert_eq!(pool.reserves().reserve0, Amount::new(1_001_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    address: Address,
    token_pair: TokenPair,
    fee_rate: FeeRate,
    minimum_liquidity: Amount,
    reserve0: Amount,
    reserve1: Amount,
    total_supply: Amount,
}

impl ConstantProductPool {
    /// Creates an empty pool at `address`.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstantProductConfig::validate`].
    pub fn new(address: Address, config: &ConstantProductConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            address,
            token_pair: *config.token_pair(),
            fee_rate: config.fee_rate(),
            minimum_liquidity: config.minimum_liquidity(),
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            total_supply: Amount::ZERO,
        })
    }

    /// Creates a pool and performs its first deposit.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstantProductPool::new`] and the first mint.
    pub fn with_liquidity(
        address: Address,
        config: &ConstantProductConfig,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Self> {
        let mut pool = Self::new(address, config)?;
        pool.mint_liquidity(amount0, amount1)?;
        Ok(pool)
    }

    /// Shares locked by the first deposit.
    pub const fn minimum_liquidity(&self) -> Amount {
        self.minimum_liquidity
    }

    /// `reserve0 · reserve1` in 256 bits.
    #[must_use]
    pub fn invariant(&self) -> U256 {
        U256::from(self.reserve0.get()) * U256::from(self.reserve1.get())
    }

    fn first_mint(&mut self, amount0: Amount, amount1: Amount) -> Result<Amount> {
        if amount0.is_zero() || amount1.is_zero() {
            return Err(ZapError::InvalidAmount("first deposit requires both tokens"));
        }
        let supply = narrow(
            integer_sqrt(U256::from(amount0.get()) * U256::from(amount1.get())),
            "initial supply",
        )?;
        let minted = Amount::new(supply)
            .checked_sub(&self.minimum_liquidity)
            .filter(|m| !m.is_zero())
            .ok_or(ZapError::InsufficientLiquidity)?;
        self.reserve0 = amount0;
        self.reserve1 = amount1;
        self.total_supply = Amount::new(supply);
        Ok(minted)
    }
}

impl LiquidityPool for ConstantProductPool {
    fn address(&self) -> Address {
        self.address
    }

    fn token_pair(&self) -> TokenPair {
        self.token_pair
    }

    fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    fn reserves(&self) -> Reserves {
        Reserves::new(self.reserve0, self.reserve1)
    }

    fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// # Errors
    ///
    /// - [`ZapError::InvalidAmount`] if the input or the output is zero.
    /// - [`ZapError::InsufficientLiquidity`] if a reserve is empty.
    fn swap(&mut self, side_in: Side, amount_in: Amount) -> Result<Amount> {
        let (reserve_in, reserve_out) = self.reserves().oriented(side_in);
        let amount_out = quote_out(amount_in, reserve_in, reserve_out, self.fee_rate)?;
        if amount_out.is_zero() {
            return Err(ZapError::InvalidAmount("swap output is zero"));
        }
        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out.safe_sub(&amount_out)?;
        match side_in {
            Side::Token0 => {
                self.reserve0 = new_in;
                self.reserve1 = new_out;
            }
            Side::Token1 => {
                self.reserve1 = new_in;
                self.reserve0 = new_out;
            }
        }
        Ok(amount_out)
    }

    /// # Errors
    ///
    /// - [`ZapError::InvalidAmount`] if both amounts are zero, or either
    ///   is zero on the first deposit.
    /// - [`ZapError::InsufficientLiquidity`] if no shares would be minted.
    fn mint_liquidity(&mut self, amount0: Amount, amount1: Amount) -> Result<Amount> {
        if amount0.is_zero() && amount1.is_zero() {
            return Err(ZapError::InvalidAmount("must deposit at least one token"));
        }
        if self.total_supply.is_zero() {
            return self.first_mint(amount0, amount1);
        }
        let supply = self.total_supply.get();
        let share0 = mul_div(amount0.get(), supply, self.reserve0.get())?;
        let share1 = mul_div(amount1.get(), supply, self.reserve1.get())?;
        let minted = Amount::new(share0.min(share1));
        if minted.is_zero() {
            return Err(ZapError::InsufficientLiquidity);
        }
        self.reserve0 = self.reserve0.safe_add(&amount0)?;
        self.reserve1 = self.reserve1.safe_add(&amount1)?;
        self.total_supply = self.total_supply.safe_add(&minted)?;
        Ok(minted)
    }

    /// # Errors
    ///
    /// - [`ZapError::InvalidAmount`] for zero `lp_amount`.
    /// - [`ZapError::InsufficientLiquidity`] if `lp_amount` exceeds the
    ///   supply or either side of the burn rounds to zero.
    fn burn_liquidity(&mut self, lp_amount: Amount) -> Result<Reserves> {
        let burned = zap_out::burn_amounts(lp_amount, self.reserves(), self.total_supply)?;
        self.reserve0 = self.reserve0.safe_sub(&burned.reserve0)?;
        self.reserve1 = self.reserve1.safe_sub(&burned.reserve1)?;
        self.total_supply = self.total_supply.safe_sub(&lp_amount)?;
        Ok(burned)
    }
}
