//! Reference [`PairFactory`](crate::traits::PairFactory): a registry that
//! creates constant-product pools and answers which pool is canonical
//! for a token pair.
//!
//! # Usage
//!
//! ```rust
//! use cpmm_zap::domain::{Address, TokenPair};
//! use cpmm_zap::factory::PairRegistry;
//! use cpmm_zap::traits::PairFactory;
//!
//! let pair = TokenPair::new(Address::from_bytes([1; 32]), Address::from_bytes([2; 32]))
//!     .expect("distinct");
//! let mut registry = PairRegistry::new();
//! registry.register(pair, Address::from_bytes([7; 32])).expect("fresh pair");
//! assert!(registry.pair_for(&pair.first(), &pair.second()).is_some());
//! ```

mod registry;

pub use registry::PairRegistry;
