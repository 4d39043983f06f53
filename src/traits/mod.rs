//! Collaborator seams of the zap engine.
//!
//! The engine never owns pool, factory or wrapper state; it drives them
//! through these traits. [`LiquidityPool`] is the pool itself,
//! [`PairFactory`] answers which pool is canonical for a pair,
//! [`NativeWrapper`] moves value between the native asset and its wrapped
//! token, and [`Clock`] is consulted for deadlines.
//!
//! Reference implementations live in [`crate::pools`], [`crate::factory`]
//! and [`crate::wrapper`].

mod clock;
mod factory;
mod pool;
mod wrapper;

pub use clock::{Clock, FixedClock, SystemClock};
pub use factory::PairFactory;
pub use pool::LiquidityPool;
pub use wrapper::NativeWrapper;
