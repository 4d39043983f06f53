//! Reference pool implementations of [`LiquidityPool`](crate::traits::LiquidityPool).
//!
//! | Pool | Style |
//! |------|-------|
//! | [`ConstantProductPool`] | Uniswap V2 pair: `x · y = k`, fee retained in reserves, LP supply seeded at `√(x·y)` with a locked minimum |

mod constant_product;

pub use constant_product::ConstantProductPool;
