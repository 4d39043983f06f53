//! Validated configuration structs.
//!
//! [`ZapConfig`] fixes the engine's guards and solver strategy;
//! [`ConstantProductConfig`] describes a reference pool. Both validate on
//! construction and expose `validate()` for values built field by field.

mod constant_product;
mod zap;

pub use constant_product::ConstantProductConfig;
pub use zap::ZapConfig;
