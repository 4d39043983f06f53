//! Value types shared by the solvers, collaborators and the engine.
//!
//! Every type here is a small `Copy` newtype or record. Constructors that
//! can be given nonsensical input validate it and return
//! [`ZapError`](crate::error::ZapError).

mod address;
mod amount;
mod basis_points;
mod deadline;
mod fee_rate;
mod reserves;
mod side;
mod swap_quote;
mod token_pair;
mod zap_plan;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use deadline::Deadline;
pub use fee_rate::FeeRate;
pub use reserves::Reserves;
pub use side::Side;
pub use swap_quote::SwapQuote;
pub use token_pair::TokenPair;
pub use zap_plan::ZapPlan;
