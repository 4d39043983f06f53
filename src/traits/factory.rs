//! Pair lookup.

use crate::domain::Address;

/// Resolves the canonical pool for a token pair.
///
/// The engine uses it to refuse pools that are not the registered pair
/// for their own tokens. Lookups must be order-insensitive.
pub trait PairFactory {
    /// Address of the pool trading `token_a` against `token_b`, if any.
    #[must_use]
    fn pair_for(&self, token_a: &Address, token_b: &Address) -> Option<Address>;
}

impl<F: PairFactory + ?Sized> PairFactory for &F {
    fn pair_for(&self, token_a: &Address, token_b: &Address) -> Option<Address> {
        (**self).pair_for(token_a, token_b)
    }
}
