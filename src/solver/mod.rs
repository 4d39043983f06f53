//! Pure estimation algorithms.
//!
//! Nothing in this module touches a pool: every function takes a reserve
//! snapshot and a fee and returns a plan or a quote. The engine in
//! [`crate::zap`] re-runs them against live state before executing.
//!
//! | Module | Question answered |
//! |--------|-------------------|
//! | [`quote_out`] | What does a swap return? |
//! | [`optimal`] | How much of a single asset to sell before depositing? |
//! | [`rebalancing`] | Which side of an unbalanced pair to sell, and how much? |
//! | [`zap_out`] | What does burning LP and converting one side yield? |

use core::fmt;

pub mod optimal;
mod orientation;
mod quote;
pub mod rebalancing;
pub mod zap_out;

pub use orientation::Orientation;
pub use quote::{quote, quote_out};
pub use zap_out::ZapOutEstimate;

/// Strategy for the balancing swap of a zap-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverKind {
    /// Closed-form root of the balancing quadratic.
    #[default]
    Quadratic,
    /// Half-split corrected for its own price impact, as deployed zap
    /// contracts compute it. The input is halved before the correction
    /// `2·⌊a/2⌋ − √(…)`, so an odd `amount_in` swaps one unit less than the
    /// deployed `a − √(…)`. Even inputs match bit for bit.
    Halving,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quadratic => write!(f, "quadratic"),
            Self::Halving => write!(f, "halving"),
        }
    }
}
