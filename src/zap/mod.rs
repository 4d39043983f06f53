//! Zap orchestration.
//!
//! [`ZapEngine`] sequences a zap through [`ZapStage`]s against a
//! [`LiquidityPool`](crate::traits::LiquidityPool), re-running the
//! solvers on live reserves and enforcing caller bounds along the way:
//!
//! | Operation | Solver | Event |
//! |-----------|--------|-------|
//! | [`ZapEngine::zap_in_token`] / [`ZapEngine::zap_in_native`] | [`optimal`](crate::solver::optimal) | [`ZapEvent::ZapIn`] |
//! | [`ZapEngine::zap_in_token_rebalancing`] / [`ZapEngine::zap_in_native_rebalancing`] | [`rebalancing`](crate::solver::rebalancing) | [`ZapEvent::ZapInRebalancing`] |
//! | [`ZapEngine::zap_out_token`] / [`ZapEngine::zap_out_native`] | [`zap_out`](crate::solver::zap_out) | [`ZapEvent::ZapOut`] |
//!
//! Each operation is all-or-nothing: it either returns a [`ZapReceipt`]
//! and journals its event, or returns an error with no effect.

mod engine;
mod events;
mod receipt;
mod stage;

#[cfg(test)]
mod proptest_properties;

pub use engine::{RebalancingZap, ZapEngine};
pub use events::ZapEvent;
pub use receipt::{Refund, ZapReceipt};
pub use stage::ZapStage;
