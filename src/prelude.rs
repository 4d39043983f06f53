//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use cpmm_zap::prelude::*;
//!
//! let bound = BasisPoints::new(100);
//! assert!(bound.admits(Amount::new(1), Amount::new(100)));
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, Deadline, FeeRate, Reserves, Side, SwapQuote, TokenPair,
    ZapPlan,
};

pub use crate::traits::{Clock, FixedClock, LiquidityPool, NativeWrapper, PairFactory};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{ConstantProductConfig, ZapConfig};

pub use crate::error::{Result, ZapError};

pub use crate::solver::{SolverKind, ZapOutEstimate};

pub use crate::zap::{RebalancingZap, ZapEngine, ZapEvent, ZapReceipt, ZapStage};
