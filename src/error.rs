//! Unified error type for the zap engine.
//!
//! Every fallible operation in the crate, including the read-only
//! estimators, returns [`ZapError`]. Estimators and their execution
//! counterparts share the taxonomy so a caller can pre-validate a zap
//! without risking funds.

use thiserror::Error;

/// Errors reported by solvers, collaborators and the zap engine.
///
/// Variants carrying a `&'static str` describe which computation or
/// bound failed; the rest are self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ZapError {
    /// A zero or too-small amount where a positive one is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// A pool reserve (or LP supply) is empty or below the usable minimum.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The zapped token is not a member of the target pool.
    #[error("wrong tokens")]
    WrongTokens,

    /// The caller's first token is not a member of the target pool.
    #[error("wrong token0")]
    WrongToken0,

    /// The caller's second token is not a member of the target pool.
    #[error("wrong token1")]
    WrongToken1,

    /// Both caller tokens are the same asset.
    #[error("same tokens")]
    SameAsset,

    /// The requested output token is not one of the pool's assets.
    #[error("token not in pool")]
    TokenNotInPool,

    /// The caller's asserted trade direction no longer matches the reserves.
    #[error("wrong trade direction")]
    WrongTradeDirection,

    /// The forced swap exceeds the configured reverse-ratio bound.
    #[error("quantity higher than reverse ratio limit")]
    ExcessiveRebalancing,

    /// The result is worse than the caller's bound.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// The call was submitted after its deadline.
    #[error("expired")]
    Expired,

    /// An intermediate value left the representable range, or a division by zero.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// The pool is not the factory's registered pair for its tokens.
    #[error("pool is not a registered pair")]
    UnknownPair,

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, ZapError>;
