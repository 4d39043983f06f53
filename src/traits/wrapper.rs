//! Native-asset wrapping.

use crate::domain::{Address, Amount};
use crate::error::Result;

/// Converts between the chain's native asset and its wrapped token 1:1.
///
/// The engine wraps native deposits before a zap-in and unwraps proceeds
/// after a zap-out. Like pools, wrappers are staged on a clone for the
/// duration of a zap.
pub trait NativeWrapper {
    /// Address of the wrapped token.
    #[must_use]
    fn wrapped_token(&self) -> Address;

    /// Locks `amount` native units and returns the wrapped amount issued.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for zero; `ArithmeticOverflow` if the backing
    /// total would overflow.
    fn wrap(&mut self, amount: Amount) -> Result<Amount>;

    /// Burns `amount` wrapped units and returns the native amount released.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for zero; `InsufficientLiquidity` if the backing
    /// cannot cover the request.
    fn unwrap(&mut self, amount: Amount) -> Result<Amount>;
}
