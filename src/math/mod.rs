//! Integer arithmetic for the solvers.
//!
//! Every product that can exceed 128 bits is widened to
//! [`ethnum::U256`]; results are narrowed back with an explicit check.
//! [`CheckedArithmetic`] lifts the `Option`-returning [`Amount`] methods
//! into [`ZapError`](crate::error::ZapError) results.
//!
//! [`Amount`]: crate::domain::Amount

mod checked;
mod mul_div;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use mul_div::{mul_div, mul_div_wide, narrow};
pub use sqrt::{integer_sqrt, integer_sqrt_u128};

pub(crate) use mul_div::{checked_add_wide, checked_mul_wide};
