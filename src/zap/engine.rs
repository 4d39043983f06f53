//! The zap engine: validation, solver dispatch and stage-then-commit
//! execution against pool and wrapper collaborators.

use tracing::{debug, info, warn};

use super::receipt::{Refund, ZapReceipt};
use super::stage::StageTracker;
use super::{ZapEvent, ZapStage};
use crate::config::ZapConfig;
use crate::domain::{Address, Amount, Deadline, Reserves, Side, SwapQuote, TokenPair, ZapPlan};
use crate::error::{Result, ZapError};
use crate::math::CheckedArithmetic;
use crate::solver::{optimal, quote, rebalancing, zap_out, Orientation, ZapOutEstimate};
use crate::traits::{Clock, LiquidityPool, NativeWrapper, PairFactory};

/// Two-asset zap-in request, in the caller's token order.
///
/// `sell_token0` is the caller's assertion of which of *their* two tokens
/// the engine will sell; it is checked against the direction computed
/// from live reserves.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::{Address, Amount};
/// use cpmm_zap::zap::RebalancingZap;
///
/// let usdc = Address::from_bytes([3; 32]);
/// let req = RebalancingZap::native(Amount::new(10_000), usdc, Amount::new(500))
///     .with_min_lp_out(Amount::new(1))
///     .selling_token0(true);
/// assert!(req.token0.is_native());
/// assert_eq!(req.max_swap_in, Amount::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RebalancingZap {
    /// Caller's first token; [`Address::NATIVE`] for the native variant.
    pub token0: Address,
    /// Caller's second token.
    pub token1: Address,
    /// Amount of `token0` paid in.
    pub amount0: Amount,
    /// Amount of `token1` paid in.
    pub amount1: Amount,
    /// Upper bound on the internal swap input.
    pub max_swap_in: Amount,
    /// Lower bound on minted LP.
    pub min_lp_out: Amount,
    /// Whether the caller expects `token0` to be sold.
    pub sell_token0: bool,
}

impl RebalancingZap {
    /// Unbounded request selling `token1`; tighten with the `with_*` methods.
    #[must_use]
    pub const fn new(token0: Address, amount0: Amount, token1: Address, amount1: Amount) -> Self {
        Self {
            token0,
            token1,
            amount0,
            amount1,
            max_swap_in: Amount::MAX,
            min_lp_out: Amount::ZERO,
            sell_token0: false,
        }
    }

    /// Request whose first asset is the chain's native asset.
    #[must_use]
    pub const fn native(native_amount: Amount, token: Address, token_amount: Amount) -> Self {
        Self::new(Address::NATIVE, native_amount, token, token_amount)
    }

    /// Sets the maximum swap input.
    #[must_use]
    pub const fn with_max_swap_in(mut self, max_swap_in: Amount) -> Self {
        self.max_swap_in = max_swap_in;
        self
    }

    /// Sets the minimum LP output.
    #[must_use]
    pub const fn with_min_lp_out(mut self, min_lp_out: Amount) -> Self {
        self.min_lp_out = min_lp_out;
        self
    }

    /// Sets the asserted trade direction.
    #[must_use]
    pub const fn selling_token0(mut self, sell_token0: bool) -> Self {
        self.sell_token0 = sell_token0;
        self
    }
}

/// Pool-ordered result of a router-style deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deposit {
    lp: Amount,
    refund0: Amount,
    refund1: Amount,
}

/// What a successful operation hands to the commit step.
#[derive(Debug)]
struct Settlement {
    event: ZapEvent,
    amount_out: Amount,
    refunds: Vec<Refund>,
}

/// Zaps into and out of constant-product pools.
///
/// Every state-changing call stages clones of the pool and the wrapper,
/// runs against the clones and writes them back only when every step and
/// bound passed. A failed call leaves the pool, the wrapper and the event
/// journal exactly as they were.
///
/// # Examples
///
/// ```
/// use cpmm_zap::config::{ConstantProductConfig, ZapConfig};
/// use cpmm_zap::domain::{Address, Amount, Deadline, FeeRate, TokenPair};
/// use cpmm_zap::factory::PairRegistry;
/// use cpmm_zap::traits::{FixedClock, LiquidityPool};
/// use cpmm_zap::wrapper::WrappedNative;
/// use cpmm_zap::zap::ZapEngine;
///
/// let a = Address::from_bytes([1; 32]);
/// let b = Address::from_bytes([2; 32]);
/// let pair = TokenPair::new(a, b).expect("distinct");
/// let cfg = ConstantProductConfig::with_fee(pair, FeeRate::STANDARD).expect("valid");
///
/// let mut registry = PairRegistry::new();
/// let mut pool = registry
///     .create_pair(&cfg, Amount::new(1_000_000_000), Amount::new(1_000_000_000))
///     .expect("pool");
/// let weth = WrappedNative::new(Address::from_bytes([0xee; 32]));
/// let mut engine =
///     ZapEngine::new(ZapConfig::default(), registry, weth, FixedClock(0)).expect("engine");
///
/// let caller = Address::from_bytes([7; 32]);
/// let receipt = engine
///     .zap_in_token(&mut pool, a, Amount::new(1_000_000), Amount::new(1), caller, Deadline::NEVER)
///     .expect("zap");
/// assert!(receipt.amount_out > Amount::ZERO);
/// assert_eq!(engine.events().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ZapEngine<F, W, C> {
    config: ZapConfig,
    factory: F,
    wrapper: W,
    clock: C,
    journal: Vec<ZapEvent>,
}

impl<F, W, C> ZapEngine<F, W, C>
where
    F: PairFactory,
    W: NativeWrapper + Clone,
    C: Clock,
{
    /// Creates an engine with a validated configuration.
    ///
    /// # Errors
    ///
    /// [`ZapError::InvalidConfiguration`] if `config` fails validation.
    pub fn new(config: ZapConfig, factory: F, wrapper: W, clock: C) -> Result<Self> {
        config.validate()?;
        debug!(
            reverse_ratio_bound = %config.reverse_ratio_bound(),
            minimum_amount = %config.minimum_amount(),
            solver = %config.solver(),
            "zap engine configured"
        );
        Ok(Self {
            config,
            factory,
            wrapper,
            clock,
            journal: Vec::new(),
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ZapConfig {
        &self.config
    }

    /// Pair factory used for registration checks.
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Mutable factory, e.g. to register pools created later.
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Native wrapper as of the last committed zap.
    #[must_use]
    pub const fn wrapper(&self) -> &W {
        &self.wrapper
    }

    /// Clock used for deadline checks.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Committed events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ZapEvent] {
        &self.journal
    }

    // -- estimates -------------------------------------------------------

    /// Swap a single-asset zap of `amount_in` would perform.
    ///
    /// [`Address::NATIVE`] is accepted for the wrapped asset. The quote's
    /// `token_out` is the asset bought.
    ///
    /// # Errors
    ///
    /// The validation errors of [`ZapEngine::zap_in_token`].
    pub fn estimate_zap_in_swap<P: LiquidityPool>(
        &self,
        pool: &P,
        token_in: &Address,
        amount_in: Amount,
    ) -> Result<SwapQuote> {
        self.ensure_registered(pool)?;
        let token_in = self.resolve_native(token_in);
        let (side_in, plan) = self.plan_zap_in(pool, &token_in, amount_in)?;
        self.check_reverse_ratio(side_in, plan.swap_amount_in(), pool.reserves())?;
        Ok(SwapQuote::new(
            plan.swap_amount_in(),
            plan.swap_amount_out(),
            pool.token_pair().token(side_in.opposite()),
        ))
    }

    /// Plan of a two-asset zap, with `sell_token0` relative to `token0`.
    ///
    /// Swapping the argument order returns the same amounts with the
    /// complementary flag.
    ///
    /// # Errors
    ///
    /// The validation errors of [`ZapEngine::zap_in_token_rebalancing`]
    /// except [`ZapError::WrongTradeDirection`] and the slippage bounds.
    pub fn estimate_zap_in_rebalancing_swap<P: LiquidityPool>(
        &self,
        pool: &P,
        token0: &Address,
        token1: &Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<ZapPlan> {
        self.ensure_registered(pool)?;
        let token0 = self.resolve_native(token0);
        let token1 = self.resolve_native(token1);
        let (orientation, plan) = self.plan_rebalancing(pool, &token0, &token1, amount0, amount1)?;
        if plan.is_valid() {
            self.check_reverse_ratio(
                sold_pool_side(orientation, &plan),
                plan.swap_amount_in(),
                pool.reserves(),
            )?;
        }
        Ok(plan)
    }

    /// Burn-and-convert estimate for zapping `lp_amount` out into
    /// `token_to_receive`.
    ///
    /// # Errors
    ///
    /// The validation errors of [`ZapEngine::zap_out_token`].
    pub fn estimate_zap_out_swap<P: LiquidityPool>(
        &self,
        pool: &P,
        lp_amount: Amount,
        token_to_receive: &Address,
    ) -> Result<ZapOutEstimate> {
        self.ensure_registered(pool)?;
        let token = self.resolve_native(token_to_receive);
        let pair = pool.token_pair();
        pair.side_of(&token).ok_or(ZapError::TokenNotInPool)?;
        self.check_lp_amount(lp_amount)?;
        zap_out::estimate(
            &pair,
            pool.reserves(),
            pool.total_supply(),
            pool.fee_rate(),
            &token,
            lp_amount,
        )
    }

    // -- zap in ----------------------------------------------------------

    /// Deposits `amount_in` of `token_in`, selling the optimal share for
    /// the other asset first.
    ///
    /// # Errors
    ///
    /// In check order: [`ZapError::Expired`], [`ZapError::UnknownPair`],
    /// [`ZapError::WrongTokens`], [`ZapError::InvalidAmount`] below the
    /// configured minimum, [`ZapError::InsufficientLiquidity`] for a
    /// reserve below it, [`ZapError::ExcessiveRebalancing`], then pool
    /// errors and [`ZapError::SlippageExceeded`] if fewer than
    /// `min_lp_out` shares are minted.
    pub fn zap_in_token<P: LiquidityPool + Clone>(
        &mut self,
        pool: &mut P,
        token_in: Address,
        amount_in: Amount,
        min_lp_out: Amount,
        caller: Address,
        deadline: Deadline,
    ) -> Result<ZapReceipt> {
        self.transact(pool, "zap_in_token", deadline, |engine, pool, wrapper, tracker| {
            let (side_in, plan) = engine.plan_zap_in(pool, &token_in, amount_in)?;
            engine.check_reverse_ratio(side_in, plan.swap_amount_in(), pool.reserves())?;
            let deposit = engine.execute_zap_in(pool, tracker, side_in, amount_in, &plan, min_lp_out)?;
            let refunds = collect_refunds(&pool.token_pair(), &deposit, wrapper, false)?;
            Ok(Settlement {
                event: ZapEvent::ZapIn {
                    token_in,
                    lp_token: pool.address(),
                    amount_in,
                    lp_out: deposit.lp,
                    caller,
                },
                amount_out: deposit.lp,
                refunds,
            })
        })
    }

    /// [`ZapEngine::zap_in_token`] for the native asset: wraps
    /// `native_amount` and zaps the wrapped token. Refunds are unwrapped.
    ///
    /// # Errors
    ///
    /// As [`ZapEngine::zap_in_token`]; [`ZapError::WrongTokens`] if the
    /// pool does not hold the wrapped asset.
    pub fn zap_in_native<P: LiquidityPool + Clone>(
        &mut self,
        pool: &mut P,
        native_amount: Amount,
        min_lp_out: Amount,
        caller: Address,
        deadline: Deadline,
    ) -> Result<ZapReceipt> {
        self.transact(pool, "zap_in_native", deadline, |engine, pool, wrapper, tracker| {
            let wrapped = wrapper.wrapped_token();
            let (side_in, plan) = engine.plan_zap_in(pool, &wrapped, native_amount)?;
            engine.check_reverse_ratio(side_in, plan.swap_amount_in(), pool.reserves())?;
            let amount_in = wrapper.wrap(native_amount)?;
            let deposit = engine.execute_zap_in(pool, tracker, side_in, amount_in, &plan, min_lp_out)?;
            let refunds = collect_refunds(&pool.token_pair(), &deposit, wrapper, true)?;
            Ok(Settlement {
                event: ZapEvent::ZapIn {
                    token_in: Address::NATIVE,
                    lp_token: pool.address(),
                    amount_in: native_amount,
                    lp_out: deposit.lp,
                    caller,
                },
                amount_out: deposit.lp,
                refunds,
            })
        })
    }

    /// Deposits an arbitrary mix of both pool assets, first selling the
    /// over-weight side.
    ///
    /// # Errors
    ///
    /// In check order: [`ZapError::Expired`], [`ZapError::UnknownPair`],
    /// [`ZapError::WrongToken0`], [`ZapError::WrongToken1`],
    /// [`ZapError::SameAsset`], [`ZapError::InvalidAmount`] when neither
    /// amount reaches the minimum, [`ZapError::InsufficientLiquidity`],
    /// [`ZapError::WrongTradeDirection`] if `request.sell_token0` is stale,
    /// [`ZapError::SlippageExceeded`] if the swap input exceeds
    /// `request.max_swap_in`, [`ZapError::ExcessiveRebalancing`], then
    /// pool errors and the LP bound.
    pub fn zap_in_token_rebalancing<P: LiquidityPool + Clone>(
        &mut self,
        pool: &mut P,
        request: RebalancingZap,
        caller: Address,
        deadline: Deadline,
    ) -> Result<ZapReceipt> {
        self.transact(
            pool,
            "zap_in_token_rebalancing",
            deadline,
            |engine, pool, wrapper, tracker| {
                let deposit = engine.execute_rebalancing(pool, tracker, &request, &request.token0)?;
                let refunds = collect_refunds(&pool.token_pair(), &deposit, wrapper, false)?;
                Ok(Settlement {
                    event: ZapEvent::ZapInRebalancing {
                        token0: request.token0,
                        token1: request.token1,
                        lp_token: pool.address(),
                        amount0_in: request.amount0,
                        amount1_in: request.amount1,
                        lp_out: deposit.lp,
                        caller,
                    },
                    amount_out: deposit.lp,
                    refunds,
                })
            },
        )
    }

    /// [`ZapEngine::zap_in_token_rebalancing`] whose first asset is
    /// native. `request.token0` must be [`Address::NATIVE`]; `amount0` is
    /// wrapped before the swap.
    ///
    /// # Errors
    ///
    /// As [`ZapEngine::zap_in_token_rebalancing`], with the wrapped asset
    /// standing in for `token0`; [`ZapError::WrongToken0`] also when
    /// `request.token0` is not the native marker.
    pub fn zap_in_native_rebalancing<P: LiquidityPool + Clone>(
        &mut self,
        pool: &mut P,
        request: RebalancingZap,
        caller: Address,
        deadline: Deadline,
    ) -> Result<ZapReceipt> {
        self.transact(
            pool,
            "zap_in_native_rebalancing",
            deadline,
            |engine, pool, wrapper, tracker| {
                if !request.token0.is_native() {
                    return Err(ZapError::WrongToken0);
                }
                let wrapped = wrapper.wrapped_token();
                if !request.amount0.is_zero() {
                    wrapper.wrap(request.amount0)?;
                }
                let deposit = engine.execute_rebalancing(pool, tracker, &request, &wrapped)?;
                let refunds = collect_refunds(&pool.token_pair(), &deposit, wrapper, true)?;
                Ok(Settlement {
                    event: ZapEvent::ZapInRebalancing {
                        token0: Address::NATIVE,
                        token1: request.token1,
                        lp_token: pool.address(),
                        amount0_in: request.amount0,
                        amount1_in: request.amount1,
                        lp_out: deposit.lp,
                        caller,
                    },
                    amount_out: deposit.lp,
                    refunds,
                })
            },
        )
    }

    // -- zap out ---------------------------------------------------------

    /// Burns `lp_amount` and converts the other asset into
    /// `token_to_receive`.
    ///
    /// # Errors
    ///
    /// In check order: [`ZapError::Expired`], [`ZapError::UnknownPair`],
    /// [`ZapError::TokenNotInPool`], [`ZapError::InvalidAmount`] below the
    /// minimum, pool burn and swap errors, then
    /// [`ZapError::SlippageExceeded`] if the total is below
    /// `min_token_out`.
    pub fn zap_out_token<P: LiquidityPool + Clone>(
        &mut self,
        pool: &mut P,
        token_to_receive: Address,
        lp_amount: Amount,
        min_token_out: Amount,
        caller: Address,
        deadline: Deadline,
    ) -> Result<ZapReceipt> {
        self.transact(pool, "zap_out_token", deadline, |engine, pool, _, tracker| {
            let amount_out =
                engine.execute_zap_out(pool, tracker, &token_to_receive, lp_amount, min_token_out)?;
            Ok(Settlement {
                event: ZapEvent::ZapOut {
                    lp_token: pool.address(),
                    token_out: token_to_receive,
                    lp_in: lp_amount,
                    amount_out,
                    caller,
                },
                amount_out,
                refunds: Vec::new(),
            })
        })
    }

    /// [`ZapEngine::zap_out_token`] into the native asset: the wrapped
    /// proceeds are unwrapped.
    ///
    /// # Errors
    ///
    /// As [`ZapEngine::zap_out_token`], plus wrapper errors on unwrap.
    pub fn zap_out_native<P: LiquidityPool + Clone>(
        &mut self,
        pool: &mut P,
        lp_amount: Amount,
        min_native_out: Amount,
        caller: Address,
        deadline: Deadline,
    ) -> Result<ZapReceipt> {
        self.transact(pool, "zap_out_native", deadline, |engine, pool, wrapper, tracker| {
            let wrapped = wrapper.wrapped_token();
            let amount_out =
                engine.execute_zap_out(pool, tracker, &wrapped, lp_amount, min_native_out)?;
            let amount_out = wrapper.unwrap(amount_out)?;
            Ok(Settlement {
                event: ZapEvent::ZapOut {
                    lp_token: pool.address(),
                    token_out: Address::NATIVE,
                    lp_in: lp_amount,
                    amount_out,
                    caller,
                },
                amount_out,
                refunds: Vec::new(),
            })
        })
    }

    // -- internals -------------------------------------------------------

    /// Runs `op` against staged copies and commits them on success.
    fn transact<P, Op>(
        &mut self,
        pool: &mut P,
        operation: &'static str,
        deadline: Deadline,
        op: Op,
    ) -> Result<ZapReceipt>
    where
        P: LiquidityPool + Clone,
        Op: FnOnce(&Self, &mut P, &mut W, &mut StageTracker) -> Result<Settlement>,
    {
        let mut tracker = StageTracker::new();
        tracker.advance(ZapStage::Validating);
        let mut staged_pool = pool.clone();
        let mut staged_wrapper = self.wrapper.clone();

        let outcome = self
            .check_preconditions(&*pool, deadline)
            .and_then(|()| op(&*self, &mut staged_pool, &mut staged_wrapper, &mut tracker));

        match outcome {
            Ok(settlement) => {
                tracker.advance(ZapStage::Done);
                *pool = staged_pool;
                self.wrapper = staged_wrapper;
                self.journal.push(settlement.event);
                info!(operation, event = %settlement.event, "zap committed");
                Ok(ZapReceipt {
                    event: settlement.event,
                    amount_out: settlement.amount_out,
                    refunds: settlement.refunds,
                    stages: tracker.into_path(),
                })
            }
            Err(error) => {
                warn!(operation, stage = %tracker.current(), %error, "zap rejected");
                Err(error)
            }
        }
    }

    fn check_preconditions<P: LiquidityPool>(&self, pool: &P, deadline: Deadline) -> Result<()> {
        if deadline.has_passed(self.clock.now()) {
            return Err(ZapError::Expired);
        }
        self.ensure_registered(pool)
    }

    fn ensure_registered<P: LiquidityPool>(&self, pool: &P) -> Result<()> {
        let pair = pool.token_pair();
        match self.factory.pair_for(&pair.first(), &pair.second()) {
            Some(address) if address == pool.address() => Ok(()),
            _ => Err(ZapError::UnknownPair),
        }
    }

    fn resolve_native(&self, token: &Address) -> Address {
        if token.is_native() {
            self.wrapper.wrapped_token()
        } else {
            *token
        }
    }

    fn check_amount(&self, amount: Amount) -> Result<()> {
        if amount < self.config.minimum_amount() {
            return Err(ZapError::InvalidAmount("zap amount below minimum"));
        }
        Ok(())
    }

    fn check_lp_amount(&self, lp_amount: Amount) -> Result<()> {
        if lp_amount < self.config.minimum_amount() {
            return Err(ZapError::InvalidAmount("lp amount below minimum"));
        }
        Ok(())
    }

    fn usable_reserves<P: LiquidityPool>(&self, pool: &P) -> Result<Reserves> {
        let reserves = pool.reserves();
        if !reserves.both_at_least(self.config.minimum_amount()) {
            return Err(ZapError::InsufficientLiquidity);
        }
        Ok(reserves)
    }

    fn check_reverse_ratio(&self, sold: Side, swap_in: Amount, reserves: Reserves) -> Result<()> {
        if self
            .config
            .reverse_ratio_bound()
            .admits(swap_in, reserves.of(sold))
        {
            Ok(())
        } else {
            Err(ZapError::ExcessiveRebalancing)
        }
    }

    fn plan_zap_in<P: LiquidityPool>(
        &self,
        pool: &P,
        token_in: &Address,
        amount_in: Amount,
    ) -> Result<(Side, ZapPlan)> {
        let side_in = pool
            .token_pair()
            .side_of(token_in)
            .ok_or(ZapError::WrongTokens)?;
        self.check_amount(amount_in)?;
        let reserves = self.usable_reserves(pool)?;
        let plan = optimal::solve(
            self.config.solver(),
            side_in,
            amount_in,
            reserves,
            pool.fee_rate(),
        )?;
        Ok((side_in, plan))
    }

    fn plan_rebalancing<P: LiquidityPool>(
        &self,
        pool: &P,
        token0: &Address,
        token1: &Address,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<(Orientation, ZapPlan)> {
        let orientation = Orientation::resolve(&pool.token_pair(), token0, token1)?;
        if self.check_amount(amount0).is_err() {
            self.check_amount(amount1)?;
        }
        let reserves = self.usable_reserves(pool)?;
        let plan = rebalancing::solve(
            self.config.solver(),
            orientation,
            amount0,
            amount1,
            reserves,
            pool.fee_rate(),
        )?;
        Ok((orientation, plan))
    }

    fn execute_zap_in<P: LiquidityPool>(
        &self,
        pool: &mut P,
        tracker: &mut StageTracker,
        side_in: Side,
        amount_in: Amount,
        plan: &ZapPlan,
        min_lp_out: Amount,
    ) -> Result<Deposit> {
        let balances = match side_in {
            Side::Token0 => (amount_in, Amount::ZERO),
            Side::Token1 => (Amount::ZERO, amount_in),
        };
        swap_and_deposit(pool, tracker, balances, side_in, plan.swap_amount_in(), min_lp_out)
    }

    /// Validates and executes `request` with `first` standing in for
    /// `request.token0`.
    fn execute_rebalancing<P: LiquidityPool>(
        &self,
        pool: &mut P,
        tracker: &mut StageTracker,
        request: &RebalancingZap,
        first: &Address,
    ) -> Result<Deposit> {
        let (orientation, plan) =
            self.plan_rebalancing(pool, first, &request.token1, request.amount0, request.amount1)?;
        let sold = sold_pool_side(orientation, &plan);
        let balances = orientation.to_pool(request.amount0, request.amount1);
        // An excess side asserts direction even when its swap floors to zero.
        let imbalanced =
            rebalancing::swap_direction(balances.0, balances.1, pool.reserves()).is_some();
        if imbalanced && plan.sell_token0() != request.sell_token0 {
            return Err(ZapError::WrongTradeDirection);
        }
        if plan.is_valid() {
            if plan.swap_amount_in() > request.max_swap_in {
                return Err(ZapError::SlippageExceeded("swap input above maximum"));
            }
            self.check_reverse_ratio(sold, plan.swap_amount_in(), pool.reserves())?;
        }
        swap_and_deposit(pool, tracker, balances, sold, plan.swap_amount_in(), request.min_lp_out)
    }

    fn execute_zap_out<P: LiquidityPool>(
        &self,
        pool: &mut P,
        tracker: &mut StageTracker,
        token_to_receive: &Address,
        lp_amount: Amount,
        min_token_out: Amount,
    ) -> Result<Amount> {
        let target = pool
            .token_pair()
            .side_of(token_to_receive)
            .ok_or(ZapError::TokenNotInPool)?;
        self.check_lp_amount(lp_amount)?;

        tracker.advance(ZapStage::Withdrawing);
        let burned = pool.burn_liquidity(lp_amount)?;
        let sold = target.opposite();
        let amount_in = burned.of(sold);
        let converted = if amount_in.is_zero() {
            Amount::ZERO
        } else {
            tracker.advance(ZapStage::Swapping);
            pool.swap(sold, amount_in)?
        };
        let total = burned.of(target).safe_add(&converted)?;
        debug!(%lp_amount, direct = %burned.of(target), %converted, "zap-out proceeds");
        if total < min_token_out {
            return Err(ZapError::SlippageExceeded("output below minimum"));
        }
        tracker.advance(ZapStage::Transferring);
        Ok(total)
    }
}

/// Pool side sold by a caller-relative rebalancing plan.
fn sold_pool_side(orientation: Orientation, plan: &ZapPlan) -> Side {
    Side::from_token0_flag(orientation.flag_to_pool(plan.sell_token0()))
}

/// Swaps `swap_in` of the `sold` side of the pool-ordered `balances`, then
/// deposits what is held.
fn swap_and_deposit<P: LiquidityPool>(
    pool: &mut P,
    tracker: &mut StageTracker,
    balances: (Amount, Amount),
    sold: Side,
    swap_in: Amount,
    min_lp_out: Amount,
) -> Result<Deposit> {
    let (mut balance0, mut balance1) = balances;
    if !swap_in.is_zero() {
        tracker.advance(ZapStage::Swapping);
        let received = pool.swap(sold, swap_in)?;
        match sold {
            Side::Token0 => {
                balance0 = balance0.safe_sub(&swap_in)?;
                balance1 = balance1.safe_add(&received)?;
            }
            Side::Token1 => {
                balance1 = balance1.safe_sub(&swap_in)?;
                balance0 = balance0.safe_add(&received)?;
            }
        }
    }

    tracker.advance(ZapStage::Depositing);
    let deposit = add_liquidity(pool, balance0, balance1)?;
    if deposit.lp < min_lp_out {
        return Err(ZapError::SlippageExceeded("lp output below minimum"));
    }
    tracker.advance(ZapStage::Transferring);
    Ok(deposit)
}

/// Router-style deposit: the largest amounts in the live reserve ratio
/// that fit in the balances held.
fn add_liquidity<P: LiquidityPool>(pool: &mut P, amount0: Amount, amount1: Amount) -> Result<Deposit> {
    let reserves = pool.reserves();
    let (used0, used1) = match quote(amount0, reserves.reserve0, reserves.reserve1)? {
        optimal1 if optimal1 <= amount1 => (amount0, optimal1),
        _ => (quote(amount1, reserves.reserve1, reserves.reserve0)?.min(amount0), amount1),
    };
    let lp = pool.mint_liquidity(used0, used1)?;
    debug!(%used0, %used1, %lp, "liquidity deposited");
    Ok(Deposit {
        lp,
        refund0: amount0.safe_sub(&used0)?,
        refund1: amount1.safe_sub(&used1)?,
    })
}

fn collect_refunds<W: NativeWrapper>(
    pair: &TokenPair,
    deposit: &Deposit,
    wrapper: &mut W,
    unwrap_native: bool,
) -> Result<Vec<Refund>> {
    let mut refunds = Vec::new();
    for (side, amount) in [(Side::Token0, deposit.refund0), (Side::Token1, deposit.refund1)] {
        if amount.is_zero() {
            continue;
        }
        let token = pair.token(side);
        if unwrap_native && token == wrapper.wrapped_token() {
            refunds.push(Refund {
                token: Address::NATIVE,
                amount: wrapper.unwrap(amount)?,
            });
        } else {
            refunds.push(Refund { token, amount });
        }
    }
    Ok(refunds)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ConstantProductConfig;
    use crate::domain::FeeRate;
    use crate::factory::PairRegistry;
    use crate::pools::ConstantProductPool;
    use crate::traits::FixedClock;
    use crate::wrapper::WrappedNative;

    type Engine = ZapEngine<PairRegistry, WrappedNative, FixedClock>;

    const RESERVE: u128 = 1_000_000_000;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn weth() -> Address {
        addr(0xee)
    }

    fn caller() -> Address {
        addr(0x77)
    }

    fn setup(tokens: &[(u8, u8)]) -> (Engine, Vec<ConstantProductPool>) {
        let mut registry = PairRegistry::new();
        let mut pools = Vec::new();
        for &(a, b) in tokens {
            let Ok(pair) = TokenPair::new(addr(a), addr(b)) else {
                panic!("pair");
            };
            let Ok(cfg) = ConstantProductConfig::with_fee(pair, FeeRate::STANDARD) else {
                panic!("config");
            };
            let Ok(pool) = registry.create_pair(&cfg, Amount::new(RESERVE), Amount::new(RESERVE))
            else {
                panic!("pool");
            };
            pools.push(pool);
        }
        let wrapper = WrappedNative::with_backing(weth(), Amount::new(RESERVE));
        let Ok(engine) = ZapEngine::new(ZapConfig::default(), registry, wrapper, FixedClock(100))
        else {
            panic!("engine");
        };
        (engine, pools)
    }

    fn single_pool() -> (Engine, ConstantProductPool) {
        let (engine, mut pools) = setup(&[(1, 2)]);
        let Some(pool) = pools.pop() else {
            panic!("pool");
        };
        (engine, pool)
    }

    // -- construction ---------------------------------------------------

    #[test]
    fn rejects_invalid_config() {
        let cfg = ZapConfig::default().with_reverse_ratio_bound(crate::domain::BasisPoints::new(0));
        let result = ZapEngine::new(cfg, PairRegistry::new(), WrappedNative::new(weth()), FixedClock(0));
        assert!(matches!(result, Err(ZapError::InvalidConfiguration(_))));
    }

    // -- preconditions --------------------------------------------------

    #[test]
    fn expired_deadline_rejected_first() {
        let (mut engine, mut pool) = single_pool();
        let before = pool.clone();
        let result = engine.zap_in_token(
            &mut pool,
            addr(9),
            Amount::ZERO,
            Amount::ZERO,
            caller(),
            Deadline::at(99),
        );
        assert_eq!(result, Err(ZapError::Expired));
        assert_eq!(pool, before);
        assert!(engine.events().is_empty());
    }

    #[test]
    fn deadline_is_inclusive() {
        let (mut engine, mut pool) = single_pool();
        let result = engine.zap_in_token(
            &mut pool,
            addr(1),
            Amount::new(1_000_000),
            Amount::ZERO,
            caller(),
            Deadline::at(100),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn unregistered_pool_rejected() {
        let (mut engine, _) = single_pool();
        let Ok(pair) = TokenPair::new(addr(1), addr(2)) else {
            panic!("pair");
        };
        let Ok(cfg) = ConstantProductConfig::with_fee(pair, FeeRate::STANDARD) else {
            panic!("config");
        };
        let Ok(mut impostor) =
            ConstantProductPool::with_liquidity(addr(0x55), &cfg, Amount::new(RESERVE), Amount::new(RESERVE))
        else {
            panic!("pool");
        };
        assert_eq!(
            engine.zap_in_token(
                &mut impostor,
                addr(1),
                Amount::new(1_000_000),
                Amount::ZERO,
                caller(),
                Deadline::NEVER,
            ),
            Err(ZapError::UnknownPair)
        );
        assert_eq!(
            engine.estimate_zap_in_swap(&impostor, &addr(1), Amount::new(1_000_000)),
            Err(ZapError::UnknownPair)
        );
    }

    #[test]
    fn amount_below_minimum_rejected() {
        let (mut engine, mut pool) = single_pool();
        assert_eq!(
            engine.zap_in_token(
                &mut pool,
                addr(1),
                Amount::new(999),
                Amount::ZERO,
                caller(),
                Deadline::NEVER,
            ),
            Err(ZapError::InvalidAmount("zap amount below minimum"))
        );
    }

    #[test]
    fn both_rebalancing_amounts_below_minimum_rejected() {
        let (engine, pool) = single_pool();
        assert_eq!(
            engine.estimate_zap_in_rebalancing_swap(
                &pool,
                &addr(1),
                &addr(2),
                Amount::new(10),
                Amount::new(999)
            ),
            Err(ZapError::InvalidAmount("zap amount below minimum"))
        );
        assert!(engine
            .estimate_zap_in_rebalancing_swap(
                &pool,
                &addr(1),
                &addr(2),
                Amount::new(10),
                Amount::new(1_000_000)
            )
            .is_ok());
    }

    // -- execution ------------------------------------------------------

    #[test]
    fn zap_in_walks_the_expected_stages() {
        let (mut engine, mut pool) = single_pool();
        let Ok(receipt) = engine.zap_in_token(
            &mut pool,
            addr(2),
            Amount::new(1_000_000),
            Amount::new(1),
            caller(),
            Deadline::NEVER,
        ) else {
            panic!("zap");
        };
        assert_eq!(
            receipt.stages,
            vec![
                ZapStage::Idle,
                ZapStage::Validating,
                ZapStage::Swapping,
                ZapStage::Depositing,
                ZapStage::Transferring,
                ZapStage::Done,
            ]
        );
        assert_eq!(engine.events(), &[receipt.event]);
        assert_eq!(receipt.event.caller(), caller());
    }

    #[test]
    fn estimate_matches_execution() {
        let (mut engine, mut pool) = single_pool();
        let Ok(quote) = engine.estimate_zap_in_swap(&pool, &addr(1), Amount::new(5_000_000)) else {
            panic!("estimate");
        };
        assert_eq!(quote.token_out(), addr(2));
        let before = pool.reserves();
        let Ok(receipt) = engine.zap_in_token(
            &mut pool,
            addr(1),
            Amount::new(5_000_000),
            Amount::ZERO,
            caller(),
            Deadline::NEVER,
        ) else {
            panic!("zap");
        };
        let after = pool.reserves();
        assert_eq!(
            after.reserve0.get(),
            before.reserve0.get() + 5_000_000 - receipt.refund_of(&addr(1)).get()
        );
        // The swapped-out token1 goes straight back in, minus dust.
        assert_eq!(
            after.reserve1.get(),
            before.reserve1.get() - receipt.refund_of(&addr(2)).get()
        );
        assert!(receipt.refund_of(&addr(2)) < quote.amount_out());
    }

    #[test]
    fn slippage_failure_rolls_back() {
        let (mut engine, mut pool) = single_pool();
        let before = pool.clone();
        let result = engine.zap_in_token(
            &mut pool,
            addr(1),
            Amount::new(1_000_000),
            Amount::MAX,
            caller(),
            Deadline::NEVER,
        );
        assert_eq!(result, Err(ZapError::SlippageExceeded("lp output below minimum")));
        assert_eq!(pool, before);
        assert!(engine.events().is_empty());
    }

    #[test]
    fn excessive_rebalancing_rejected() {
        let (mut engine, mut pool) = single_pool();
        // 1% of the reserve is 10_000_000; this zap sells about half of 30_000_000.
        assert_eq!(
            engine.zap_in_token(
                &mut pool,
                addr(1),
                Amount::new(30_000_000),
                Amount::ZERO,
                caller(),
                Deadline::NEVER,
            ),
            Err(ZapError::ExcessiveRebalancing)
        );
        assert_eq!(
            engine.estimate_zap_in_swap(&pool, &addr(1), Amount::new(30_000_000)),
            Err(ZapError::ExcessiveRebalancing)
        );
    }

    #[test]
    fn balanced_rebalancing_skips_swap() {
        let (mut engine, mut pool) = single_pool();
        let request = RebalancingZap::new(addr(1), Amount::new(1_000_000), addr(2), Amount::new(1_000_000));
        let Ok(receipt) = engine.zap_in_token_rebalancing(&mut pool, request, caller(), Deadline::NEVER)
        else {
            panic!("zap");
        };
        assert!(!receipt.swapped());
        assert_eq!(receipt.amount_out, Amount::new(1_000_000));
        assert!(receipt.refunds.is_empty());
    }

    #[test]
    fn direction_checked_when_swap_floors_to_zero() {
        let (mut engine, mut pool) = single_pool();
        // Token0 is over-weight by one unit; the optimal swap rounds to zero.
        let Ok(plan) = engine.estimate_zap_in_rebalancing_swap(
            &pool,
            &addr(1),
            &addr(2),
            Amount::new(1_001),
            Amount::new(1_000),
        ) else {
            panic!("estimate");
        };
        assert!(!plan.is_valid());
        assert!(plan.sell_token0());

        let before = pool.clone();
        let wrong = RebalancingZap::new(addr(1), Amount::new(1_001), addr(2), Amount::new(1_000))
            .selling_token0(false);
        assert_eq!(
            engine.zap_in_token_rebalancing(&mut pool, wrong, caller(), Deadline::NEVER),
            Err(ZapError::WrongTradeDirection)
        );
        assert_eq!(pool, before);

        let right = RebalancingZap::new(addr(1), Amount::new(1_001), addr(2), Amount::new(1_000))
            .selling_token0(true);
        let Ok(receipt) = engine.zap_in_token_rebalancing(&mut pool, right, caller(), Deadline::NEVER)
        else {
            panic!("zap");
        };
        assert!(!receipt.swapped());
    }

    #[test]
    fn max_swap_in_enforced() {
        let (mut engine, mut pool) = single_pool();
        let request = RebalancingZap::new(addr(1), Amount::new(3_000_000), addr(2), Amount::new(1_000_000))
            .selling_token0(true)
            .with_max_swap_in(Amount::new(10));
        assert_eq!(
            engine.zap_in_token_rebalancing(&mut pool, request, caller(), Deadline::NEVER),
            Err(ZapError::SlippageExceeded("swap input above maximum"))
        );
    }

    #[test]
    fn native_rebalancing_requires_native_marker() {
        let (mut engine, mut pools) = setup(&[(0xee, 2)]);
        let Some(mut pool) = pools.pop() else {
            panic!("pool");
        };
        let request = RebalancingZap::new(weth(), Amount::new(1_000_000), addr(2), Amount::ZERO);
        assert_eq!(
            engine.zap_in_native_rebalancing(&mut pool, request, caller(), Deadline::NEVER),
            Err(ZapError::WrongToken0)
        );
    }

    #[test]
    fn native_zap_in_wraps_and_reports_native() {
        let (mut engine, mut pools) = setup(&[(0xee, 2)]);
        let Some(mut pool) = pools.pop() else {
            panic!("pool");
        };
        let backing = engine.wrapper().backing();
        let Ok(receipt) =
            engine.zap_in_native(&mut pool, Amount::new(2_000_000), Amount::ZERO, caller(), Deadline::NEVER)
        else {
            panic!("zap");
        };
        let ZapEvent::ZapIn { token_in, .. } = receipt.event else {
            panic!("event kind");
        };
        assert_eq!(token_in, Address::NATIVE);
        let refunded = receipt.refund_of(&Address::NATIVE);
        assert_eq!(
            engine.wrapper().backing(),
            Amount::new(backing.get() + 2_000_000 - refunded.get())
        );
        assert_eq!(receipt.refund_of(&weth()), Amount::ZERO);
    }

    #[test]
    fn zap_out_round_trip_loses_value() {
        let (mut engine, mut pool) = single_pool();
        let Ok(zap_in) = engine.zap_in_token(
            &mut pool,
            addr(1),
            Amount::new(2_000_000),
            Amount::ZERO,
            caller(),
            Deadline::NEVER,
        ) else {
            panic!("zap in");
        };
        let Ok(estimate) = engine.estimate_zap_out_swap(&pool, zap_in.amount_out, &addr(1)) else {
            panic!("estimate");
        };
        let Ok(zap_out) = engine.zap_out_token(
            &mut pool,
            addr(1),
            zap_in.amount_out,
            Amount::ZERO,
            caller(),
            Deadline::NEVER,
        ) else {
            panic!("zap out");
        };
        assert!(zap_out.amount_out < Amount::new(2_000_000));
        let Ok(total) = estimate.total_out() else {
            panic!("total");
        };
        assert_eq!(zap_out.amount_out, total);
        assert_eq!(engine.events().len(), 2);
    }

    #[test]
    fn zap_out_estimate_fails_like_execution_on_dust_burn() {
        let Ok(pair) = TokenPair::new(addr(1), addr(2)) else {
            panic!("pair");
        };
        let Ok(cfg) = ConstantProductConfig::with_fee(pair, FeeRate::STANDARD) else {
            panic!("config");
        };
        let mut registry = PairRegistry::new();
        let Ok(mut pool) =
            registry.create_pair(&cfg, Amount::new(1_000_000_000_000), Amount::new(1_000))
        else {
            panic!("pool");
        };
        let Ok(mut engine) = ZapEngine::new(
            ZapConfig::default(),
            registry,
            WrappedNative::new(weth()),
            FixedClock(100),
        ) else {
            panic!("engine");
        };
        let before = pool.clone();
        // 1_000 shares release no token1 at all.
        assert_eq!(
            engine.estimate_zap_out_swap(&pool, Amount::new(1_000), &addr(1)),
            Err(ZapError::InsufficientLiquidity)
        );
        assert_eq!(
            engine.zap_out_token(
                &mut pool,
                addr(1),
                Amount::new(1_000),
                Amount::ZERO,
                caller(),
                Deadline::NEVER,
            ),
            Err(ZapError::InsufficientLiquidity)
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn zap_out_foreign_token_rejected() {
        let (mut engine, mut pool) = single_pool();
        let before = pool.clone();
        assert_eq!(
            engine.estimate_zap_out_swap(&pool, Amount::new(10_000), &addr(3)),
            Err(ZapError::TokenNotInPool)
        );
        assert_eq!(
            engine.zap_out_token(
                &mut pool,
                addr(3),
                Amount::new(10_000),
                Amount::ZERO,
                caller(),
                Deadline::NEVER,
            ),
            Err(ZapError::TokenNotInPool)
        );
        assert_eq!(pool, before);
    }
}
