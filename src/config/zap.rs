//! Engine-wide zap parameters.

use crate::domain::{Amount, BasisPoints};
use crate::error::ZapError;
use crate::solver::SolverKind;

/// Parameters fixed at engine construction.
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `reverse_ratio_bound` | 100 bp | Largest forced swap as a share of the reserve sold into |
/// | `minimum_amount` | 1 000 | Smallest zap input and smallest usable reserve |
/// | `solver` | [`SolverKind::Quadratic`] | Balancing-swap strategy |
///
/// # Examples
///
/// ```
/// use cpmm_zap::config::ZapConfig;
/// use cpmm_zap::domain::BasisPoints;
/// use cpmm_zap::solver::SolverKind;
///
/// let cfg = ZapConfig::default()
///     .with_reverse_ratio_bound(BasisPoints::new(50))
///     .with_solver(SolverKind::Halving);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.solver(), SolverKind::Halving);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZapConfig {
    reverse_ratio_bound: BasisPoints,
    minimum_amount: Amount,
    solver: SolverKind,
}

impl ZapConfig {
    /// Default reverse-ratio bound: 1%.
    pub const DEFAULT_REVERSE_RATIO_BOUND: BasisPoints = BasisPoints::new(100);

    /// Default minimum zap input and reserve.
    pub const DEFAULT_MINIMUM_AMOUNT: Amount = Amount::new(1_000);

    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidConfiguration`] if any invariant fails.
    pub fn new(
        reverse_ratio_bound: BasisPoints,
        minimum_amount: Amount,
        solver: SolverKind,
    ) -> Result<Self, ZapError> {
        let config = Self {
            reverse_ratio_bound,
            minimum_amount,
            solver,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the reverse-ratio bound.
    #[must_use]
    pub const fn with_reverse_ratio_bound(mut self, bound: BasisPoints) -> Self {
        self.reverse_ratio_bound = bound;
        self
    }

    /// Replaces the minimum amount.
    #[must_use]
    pub const fn with_minimum_amount(mut self, minimum: Amount) -> Self {
        self.minimum_amount = minimum;
        self
    }

    /// Replaces the solver strategy.
    #[must_use]
    pub const fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidConfiguration`] if the bound is outside
    /// `1..=10_000` bp or the minimum amount is zero.
    pub const fn validate(&self) -> Result<(), ZapError> {
        if !self.reverse_ratio_bound.is_valid_percent() {
            return Err(ZapError::InvalidConfiguration(
                "reverse ratio bound must be within 1..=10000 bp",
            ));
        }
        if self.minimum_amount.is_zero() {
            return Err(ZapError::InvalidConfiguration(
                "minimum amount must be positive",
            ));
        }
        Ok(())
    }

    /// Largest forced swap relative to the sold reserve.
    #[must_use]
    pub const fn reverse_ratio_bound(&self) -> BasisPoints {
        self.reverse_ratio_bound
    }

    /// Smallest accepted zap input and reserve.
    pub const fn minimum_amount(&self) -> Amount {
        self.minimum_amount
    }

    /// Balancing-swap strategy.
    #[must_use]
    pub const fn solver(&self) -> SolverKind {
        self.solver
    }
}

impl Default for ZapConfig {
    fn default() -> Self {
        Self {
            reverse_ratio_bound: Self::DEFAULT_REVERSE_RATIO_BOUND,
            minimum_amount: Self::DEFAULT_MINIMUM_AMOUNT,
            solver: SolverKind::Quadratic,
        }
    }
}
