//! Property-based tests for the zap engine and its solvers.
//!
//! 1. **Order invariance**: swapping the caller's token order mirrors the
//!    rebalancing plan.
//! 2. **Degenerate reduction**: a rebalancing zap with nothing on one side
//!    plans exactly like a single-sided zap.
//! 3. **Bounded swap**: the swap never sells more than was contributed on
//!    the over-weight side.
//! 4. **Round trip**: zapping in then out never returns more than was
//!    paid in.
//! 5. **Rejection is inert**: a membership failure leaves the pool, the
//!    wrapper and the journal untouched.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{RebalancingZap, ZapEngine};
use crate::config::{ConstantProductConfig, ZapConfig};
use crate::domain::{Address, Amount, BasisPoints, Deadline, FeeRate, TokenPair};
use crate::error::ZapError;
use crate::factory::PairRegistry;
use crate::pools::ConstantProductPool;
use crate::solver::{optimal, SolverKind};
use crate::traits::{FixedClock, LiquidityPool};
use crate::wrapper::WrappedNative;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

type Engine = ZapEngine<PairRegistry, WrappedNative, FixedClock>;

fn tok(b: u8) -> Address {
    Address::from_bytes([b; 32])
}

fn caller() -> Address {
    tok(0x77)
}

fn fixture(r0: u128, r1: u128, solver: SolverKind) -> (Engine, ConstantProductPool) {
    let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
        panic!("valid pair");
    };
    let Ok(cfg) = ConstantProductConfig::with_fee(pair, FeeRate::QUARTER_PERCENT) else {
        panic!("valid pool config");
    };
    let mut registry = PairRegistry::new();
    let Ok(pool) = registry.create_pair(&cfg, Amount::new(r0), Amount::new(r1)) else {
        panic!("valid pool");
    };
    let config = ZapConfig::default()
        .with_reverse_ratio_bound(BasisPoints::new(10_000))
        .with_solver(solver);
    let Ok(engine) = ZapEngine::new(config, registry, WrappedNative::new(tok(0xee)), FixedClock(0))
    else {
        panic!("valid engine");
    };
    (engine, pool)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..=1_000_000_000_000u128
}

fn amount_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000_000u128
}

fn solver_strategy() -> impl Strategy<Value = SolverKind> {
    prop_oneof![Just(SolverKind::Quadratic), Just(SolverKind::Halving)]
}

// ---------------------------------------------------------------------------
// Properties 1-3: estimation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_rebalancing_is_order_invariant(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a0 in amount_strategy(),
        a1 in amount_strategy(),
        solver in solver_strategy(),
    ) {
        let (engine, pool) = fixture(r0, r1, solver);
        let forward = engine.estimate_zap_in_rebalancing_swap(
            &pool, &tok(1), &tok(2), Amount::new(a0), Amount::new(a1),
        );
        let backward = engine.estimate_zap_in_rebalancing_swap(
            &pool, &tok(2), &tok(1), Amount::new(a1), Amount::new(a0),
        );
        let (Ok(forward), Ok(backward)) = (forward, backward) else {
            return Ok(());
        };
        prop_assert_eq!(forward.swap_amount_in(), backward.swap_amount_in());
        prop_assert_eq!(forward.swap_amount_out(), backward.swap_amount_out());
        if forward.is_valid() {
            prop_assert_ne!(forward.sell_token0(), backward.sell_token0());
        }
    }

    #[test]
    fn prop_one_sided_rebalancing_matches_single_sided(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a in amount_strategy(),
        solver in solver_strategy(),
    ) {
        let (engine, pool) = fixture(r0, r1, solver);
        let Ok(rebalanced) = engine.estimate_zap_in_rebalancing_swap(
            &pool, &tok(1), &tok(2), Amount::new(a), Amount::ZERO,
        ) else {
            return Ok(());
        };
        let Ok(single) = engine.estimate_zap_in_swap(&pool, &tok(1), Amount::new(a)) else {
            return Ok(());
        };
        prop_assert_eq!(rebalanced.swap_amount_in(), single.amount_in());
        prop_assert_eq!(rebalanced.swap_amount_out(), single.amount_out());
        prop_assert!(rebalanced.sell_token0());
    }

    #[test]
    fn prop_swap_never_exceeds_contribution(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a0 in amount_strategy(),
        a1 in amount_strategy(),
        solver in solver_strategy(),
    ) {
        let (engine, pool) = fixture(r0, r1, solver);
        let Ok(single) = optimal::swap_amount(
            solver, Amount::new(a0), Amount::new(r0), Amount::new(r1), pool.fee_rate(),
        ) else {
            return Ok(());
        };
        prop_assert!(single.get() <= a0);

        let Ok(plan) = engine.estimate_zap_in_rebalancing_swap(
            &pool, &tok(1), &tok(2), Amount::new(a0), Amount::new(a1),
        ) else {
            return Ok(());
        };
        let sold = if plan.sell_token0() { a0 } else { a1 };
        prop_assert!(plan.swap_amount_in().get() <= sold);
    }
}

// ---------------------------------------------------------------------------
// Properties 4-5: execution
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_never_profits(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a in amount_strategy(),
        solver in solver_strategy(),
    ) {
        let (mut engine, mut pool) = fixture(r0, r1, solver);
        let Ok(zap_in) = engine.zap_in_token(
            &mut pool, tok(1), Amount::new(a), Amount::ZERO, caller(), Deadline::NEVER,
        ) else {
            return Ok(());
        };
        let Ok(zap_out) = engine.zap_out_token(
            &mut pool, tok(1), zap_in.amount_out, Amount::ZERO, caller(), Deadline::NEVER,
        ) else {
            return Ok(());
        };
        prop_assert!(
            zap_out.amount_out.get() <= a,
            "round trip should lose value: out={} > in={}",
            zap_out.amount_out, a
        );
    }

    #[test]
    fn prop_membership_rejection_is_inert(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        a0 in amount_strategy(),
        a1 in amount_strategy(),
        solver in solver_strategy(),
    ) {
        let (mut engine, mut pool) = fixture(r0, r1, solver);
        let before = pool.clone();
        let request = RebalancingZap::new(tok(1), Amount::new(a0), tok(3), Amount::new(a1));
        prop_assert_eq!(
            engine.zap_in_token_rebalancing(&mut pool, request, caller(), Deadline::NEVER),
            Err(ZapError::WrongToken1)
        );
        prop_assert_eq!(
            engine.zap_in_token(
                &mut pool, tok(3), Amount::new(a0), Amount::ZERO, caller(), Deadline::NEVER,
            ),
            Err(ZapError::WrongTokens)
        );
        prop_assert_eq!(&pool, &before);
        prop_assert!(engine.events().is_empty());
        prop_assert_eq!(engine.wrapper().backing(), Amount::ZERO);
    }
}
