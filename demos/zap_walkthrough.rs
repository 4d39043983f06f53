//! Zap walkthrough: single-sided, two-sided and native zaps into
//! constant-product pools, then back out.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example zap_walkthrough
//! ```

use cpmm_zap::config::{ConstantProductConfig, ZapConfig};
use cpmm_zap::domain::{Address, Amount, Deadline, FeeRate, TokenPair};
use cpmm_zap::factory::PairRegistry;
use cpmm_zap::solver::SolverKind;
use cpmm_zap::traits::{Clock, LiquidityPool, SystemClock};
use cpmm_zap::wrapper::WrappedNative;
use cpmm_zap::zap::{RebalancingZap, ZapEngine};

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Constant-Product Zaps ===\n");

    // ── 1. Tokens and pools ────────────────────────────────────────────
    let dai = Address::from_bytes([0x0d; 32]);
    let weth = Address::from_bytes([0x0e; 32]);
    let usdc = Address::from_bytes([0x0c; 32]);

    let mut registry = PairRegistry::new();
    let dai_weth = ConstantProductConfig::with_fee(TokenPair::new(dai, weth)?, FeeRate::QUARTER_PERCENT)?;
    let usdc_dai = ConstantProductConfig::with_fee(TokenPair::new(usdc, dai)?, FeeRate::STANDARD)?;
    let mut eth_pool = registry.create_pair(&dai_weth, Amount::new(2_000_000 * E18), Amount::new(1_000 * E18))?;
    let mut stable_pool = registry.create_pair(&usdc_dai, Amount::new(500_000 * E18), Amount::new(500_000 * E18))?;

    println!("DAI/WETH pool:  {}  reserves {}", eth_pool.address(), eth_pool.reserves().reserve0);
    println!("USDC/DAI pool:  {}  reserves {}\n", stable_pool.address(), stable_pool.reserves().reserve0);

    // ── 2. Engine ──────────────────────────────────────────────────────
    //    Halving estimator, 1% reverse-ratio bound, live wall clock.
    let config = ZapConfig::default().with_solver(SolverKind::Halving);
    let wrapper = WrappedNative::with_backing(weth, Amount::new(1_000 * E18));
    let clock = SystemClock;
    let deadline = Deadline::at(clock.now() + 600);
    let mut engine = ZapEngine::new(config, registry, wrapper, clock)?;
    let me = Address::from_bytes([0x42; 32]);

    // ── 3. Single-sided zap: 1 000 DAI → USDC/DAI LP ───────────────────
    let quote = engine.estimate_zap_in_swap(&stable_pool, &dai, Amount::new(1_000 * E18))?;
    println!("Estimate: {quote}");
    let receipt = engine.zap_in_token(
        &mut stable_pool,
        dai,
        Amount::new(1_000 * E18),
        Amount::new(1),
        me,
        deadline,
    )?;
    println!("{}  stages {:?}", receipt.event, receipt.stages);

    // ── 4. Native zap: 2 ETH → DAI/WETH LP ─────────────────────────────
    let receipt = engine.zap_in_native(&mut eth_pool, Amount::new(2 * E18), Amount::new(1), me, deadline)?;
    println!("{}", receipt.event);
    for refund in &receipt.refunds {
        println!("  refund {} of {}", refund.amount, refund.token);
    }

    // ── 5. Two-sided zap: 1 ETH + 500 DAI, ETH over-weight ─────────────
    let plan = engine.estimate_zap_in_rebalancing_swap(
        &eth_pool,
        &Address::NATIVE,
        &dai,
        Amount::new(E18),
        Amount::new(500 * E18),
    )?;
    println!("\nRebalancing plan: {plan}");
    let request = RebalancingZap::native(Amount::new(E18), dai, Amount::new(500 * E18))
        .selling_token0(plan.sell_token0())
        .with_max_swap_in(plan.swap_amount_in());
    let receipt = engine.zap_in_native_rebalancing(&mut eth_pool, request, me, deadline)?;
    let lp = receipt.amount_out;
    println!("{}", receipt.event);

    // ── 6. Zap out the last position into ETH ──────────────────────────
    let estimate = engine.estimate_zap_out_swap(&eth_pool, lp, &Address::NATIVE)?;
    let expected = estimate.total_out()?;
    let receipt = engine.zap_out_native(&mut eth_pool, lp, expected, me, deadline)?;
    println!("\n{}", receipt.event);

    println!("\nJournal:");
    for event in engine.events() {
        println!("  {event}");
    }
    Ok(())
}
