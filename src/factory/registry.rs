//! Address-book pair factory.

use std::collections::HashMap;

use tracing::debug;

use crate::config::ConstantProductConfig;
use crate::domain::{Address, Amount, TokenPair};
use crate::error::{Result, ZapError};
use crate::pools::ConstantProductPool;
use crate::traits::PairFactory;

/// Tag byte of registry-derived pool addresses.
const POOL_ADDRESS_TAG: u8 = 0xfe;

/// Keeps one canonical pool per token pair.
///
/// Pools created through [`PairRegistry::create_pair`] receive
/// deterministic addresses in creation order. Externally deployed pools
/// can be added with [`PairRegistry::register`].
///
/// # Example
///
/// ```rust
/// use cpmm_zap::config::ConstantProductConfig;
/// use cpmm_zap::domain::{Address, Amount, FeeRate, TokenPair};
/// use cpmm_zap::factory::PairRegistry;
/// use cpmm_zap::traits::{LiquidityPool, PairFactory};
///
/// let a = Address::from_bytes([1; 32]);
/// let b = Address::from_bytes([2; 32]);
/// let pair = TokenPair::new(a, b).expect("distinct");
/// let cfg = ConstantProductConfig::with_fee(pair, FeeRate::STANDARD).expect("valid");
///
/// let mut registry = PairRegistry::new();
/// let pool = registry
///     .create_pair(&cfg, Amount::new(1_000_000), Amount::new(1_000_000))
///     .expect("created");
/// assert_eq!(registry.pair_for(&b, &a), Some(pool.address()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairRegistry {
    pairs: HashMap<TokenPair, Address>,
    created: u64,
}

impl PairRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates, seeds and registers a pool for `config`'s pair.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidConfiguration`] if the pair is already registered.
    /// - Any error of [`ConstantProductPool::with_liquidity`].
    pub fn create_pair(
        &mut self,
        config: &ConstantProductConfig,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<ConstantProductPool> {
        let pair = *config.token_pair();
        if self.pairs.contains_key(&pair) {
            return Err(ZapError::InvalidConfiguration("pair already exists"));
        }
        let address = Address::derived(POOL_ADDRESS_TAG, self.created + 1);
        let pool = ConstantProductPool::with_liquidity(address, config, amount0, amount1)?;
        self.created += 1;
        self.pairs.insert(pair, address);
        debug!(%address, token0 = %pair.first(), token1 = %pair.second(), "pair created");
        Ok(pool)
    }

    /// Registers an existing pool as canonical for `pair`.
    ///
    /// # Errors
    ///
    /// [`ZapError::InvalidConfiguration`] if the pair is already registered.
    pub fn register(&mut self, pair: TokenPair, pool: Address) -> Result<()> {
        if self.pairs.contains_key(&pair) {
            return Err(ZapError::InvalidConfiguration("pair already exists"));
        }
        self.pairs.insert(pair, pool);
        Ok(())
    }

    /// Number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` when no pair is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PairFactory for PairRegistry {
    fn pair_for(&self, token_a: &Address, token_b: &Address) -> Option<Address> {
        let pair = TokenPair::new(*token_a, *token_b).ok()?;
        self.pairs.get(&pair).copied()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FeeRate;
    use crate::traits::LiquidityPool;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    fn config(a: u8, b: u8) -> ConstantProductConfig {
        let Ok(pair) = TokenPair::new(addr(a), addr(b)) else {
            panic!("pair");
        };
        let Ok(cfg) = ConstantProductConfig::with_fee(pair, FeeRate::STANDARD) else {
            panic!("config");
        };
        cfg
    }

    #[test]
    fn created_pairs_get_distinct_addresses() {
        let mut reg = PairRegistry::new();
        let Ok(p1) = reg.create_pair(&config(1, 2), Amount::new(1_000_000), Amount::new(1_000_000))
        else {
            panic!("create");
        };
        let Ok(p2) = reg.create_pair(&config(1, 3), Amount::new(1_000_000), Amount::new(1_000_000))
        else {
            panic!("create");
        };
        assert_ne!(p1.address(), p2.address());
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.pair_for(&addr(3), &addr(1)), Some(p2.address()));
    }

    #[test]
    fn duplicate_pair_rejected() {
        let mut reg = PairRegistry::new();
        let cfg = config(1, 2);
        assert!(reg
            .create_pair(&cfg, Amount::new(1_000_000), Amount::new(1_000_000))
            .is_ok());
        assert_eq!(
            reg.create_pair(&cfg, Amount::new(1_000_000), Amount::new(1_000_000)),
            Err(ZapError::InvalidConfiguration("pair already exists"))
        );
        assert_eq!(
            reg.register(*cfg.token_pair(), addr(99)),
            Err(ZapError::InvalidConfiguration("pair already exists"))
        );
    }

    #[test]
    fn failed_creation_leaves_registry_untouched() {
        let mut reg = PairRegistry::new();
        assert!(reg
            .create_pair(&config(1, 2), Amount::new(10), Amount::new(10))
            .is_err());
        assert!(reg.is_empty());
        assert_eq!(reg.pair_for(&addr(1), &addr(2)), None);
    }

    #[test]
    fn unknown_and_degenerate_lookups() {
        let mut reg = PairRegistry::new();
        assert!(reg.register(*config(1, 2).token_pair(), addr(50)).is_ok());
        assert_eq!(reg.pair_for(&addr(2), &addr(1)), Some(addr(50)));
        assert_eq!(reg.pair_for(&addr(1), &addr(1)), None);
        assert_eq!(reg.pair_for(&addr(1), &addr(4)), None);
    }
}
