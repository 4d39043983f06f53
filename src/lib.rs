//! # cpmm-zap
//!
//! Zap engine for constant-product AMMs: enter an LP position with a
//! single asset or an arbitrary mix of both, and exit one into a single
//! asset, in one all-or-nothing call.
//!
//! The crate provides:
//!
//! - **Solvers** for the swap a zap must perform: the single-sided optimal
//!   swap, the two-sided rebalancing swap and the zap-out conversion, each
//!   in exact integer arithmetic with 256-bit intermediates.
//! - **[`ZapEngine`](zap::ZapEngine)**, which validates a request, re-runs
//!   the solver on live reserves, swaps, deposits or withdraws through a
//!   pool collaborator and commits only if every caller bound holds.
//! - **Reference collaborators**: a Uniswap V2 style
//!   [`ConstantProductPool`](pools::ConstantProductPool), a
//!   [`PairRegistry`](factory::PairRegistry) and a one-to-one
//!   [`WrappedNative`](wrapper::WrappedNative) ledger.
//!
//! # Quick Start
//!
//! ```rust
//! use cpmm_zap::config::{ConstantProductConfig, ZapConfig};
//! use cpmm_zap::domain::{Address, Amount, Deadline, FeeRate, TokenPair};
//! use cpmm_zap::factory::PairRegistry;
//! use cpmm_zap::traits::FixedClock;
//! use cpmm_zap::wrapper::WrappedNative;
//! use cpmm_zap::zap::ZapEngine;
//!
//! // 1. Two tokens and a registered pool
//! let usdc = Address::from_bytes([1u8; 32]);
//! let weth = Address::from_bytes([2u8; 32]);
//! let pair = TokenPair::new(usdc, weth).expect("distinct tokens");
//! let cfg = ConstantProductConfig::with_fee(pair, FeeRate::QUARTER_PERCENT).expect("valid");
//!
//! let mut registry = PairRegistry::new();
//! let mut pool = registry
//!     .create_pair(&cfg, Amount::new(2_000_000_000), Amount::new(1_000_000))
//!     .expect("pool created");
//!
//! // 2. An engine with the default 1% reverse-ratio bound
//! let mut engine = ZapEngine::new(
//!     ZapConfig::default(),
//!     registry,
//!     WrappedNative::new(weth),
//!     FixedClock(1_700_000_000),
//! )
//! .expect("valid config");
//!
//! // 3. Estimate, then zap 1 000 000 USDC in
//! let quote = engine
//!     .estimate_zap_in_swap(&pool, &usdc, Amount::new(1_000_000))
//!     .expect("estimate");
//! let receipt = engine
//!     .zap_in_token(
//!         &mut pool,
//!         usdc,
//!         Amount::new(1_000_000),
//!         Amount::new(1),
//!         Address::from_bytes([7u8; 32]),
//!         Deadline::at(1_700_000_060),
//!     )
//!     .expect("zap succeeded");
//!
//! assert!(quote.amount_in() < Amount::new(1_000_000));
//! assert!(receipt.amount_out > Amount::ZERO);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  zap_in_* / zap_out_* / estimate_*
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │  ZapEngine   │  validate → solve → swap → deposit/withdraw → commit
//! └──────┬──────┘
//!        │ re-reads reserves, stages pool + wrapper
//!        ▼
//! ┌─────────────┐      ┌──────────────────────────────┐
//! │   Solvers    │      │ LiquidityPool, PairFactory,  │
//! │ optimal,     │      │ NativeWrapper, Clock         │
//! │ rebalancing, │      └──────────────────────────────┘
//! │ zap_out      │
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │ Domain/Math  │  Amount, TokenPair, FeeRate, ZapPlan, U256 mul-div, isqrt
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Address`](domain::Address), [`TokenPair`](domain::TokenPair), [`ZapPlan`](domain::ZapPlan), etc. |
//! | [`math`]   | Checked arithmetic, 256-bit mul-div, integer square root |
//! | [`solver`] | Pure estimators: [`optimal`](solver::optimal), [`rebalancing`](solver::rebalancing), [`zap_out`](solver::zap_out) |
//! | [`zap`]    | [`ZapEngine`](zap::ZapEngine), stages, events and receipts |
//! | [`traits`] | Collaborator abstractions: [`LiquidityPool`](traits::LiquidityPool), [`PairFactory`](traits::PairFactory), [`NativeWrapper`](traits::NativeWrapper), [`Clock`](traits::Clock) |
//! | [`config`] | [`ZapConfig`](config::ZapConfig) and [`ConstantProductConfig`](config::ConstantProductConfig) |
//! | [`pools`]  | Reference [`ConstantProductPool`](pools::ConstantProductPool) |
//! | [`factory`] | Reference [`PairRegistry`](factory::PairRegistry) |
//! | [`wrapper`] | Reference [`WrappedNative`](wrapper::WrappedNative) |
//! | [`error`]  | [`ZapError`](error::ZapError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod solver;
pub mod traits;
pub mod wrapper;
pub mod zap;
