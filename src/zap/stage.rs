//! Step sequencing of a single zap.

use core::fmt;

use tracing::debug;

/// Step of a zap in progress.
///
/// ```text
/// Idle → Validating ─┬→ Swapping ──┬→ Depositing → Transferring → Done
///                    ├→ Depositing │
///                    └→ Withdrawing ┴→ Swapping / Transferring
/// ```
///
/// A zap-in visits `Swapping` only when the plan sells something; a
/// zap-out visits it only when the burn released a non-target amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZapStage {
    /// Nothing started.
    #[default]
    Idle,
    /// Deadline, pair registration, membership and bounds.
    Validating,
    /// The conversion swap against the pool.
    Swapping,
    /// Router-style liquidity deposit.
    Depositing,
    /// LP burn.
    Withdrawing,
    /// Forwarding output and refunds.
    Transferring,
    /// Committed.
    Done,
}

impl ZapStage {
    /// Whether `next` may directly follow `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpmm_zap::zap::ZapStage;
    ///
    /// assert!(ZapStage::Validating.can_advance_to(ZapStage::Withdrawing));
    /// assert!(!ZapStage::Depositing.can_advance_to(ZapStage::Swapping));
    /// ```
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Validating)
                | (
                    Self::Validating,
                    Self::Swapping | Self::Depositing | Self::Withdrawing
                )
                | (Self::Swapping, Self::Depositing | Self::Transferring)
                | (Self::Withdrawing, Self::Swapping | Self::Transferring)
                | (Self::Depositing, Self::Transferring)
                | (Self::Transferring, Self::Done)
        )
    }

    /// `true` for [`ZapStage::Done`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for ZapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Swapping => "swapping",
            Self::Depositing => "depositing",
            Self::Withdrawing => "withdrawing",
            Self::Transferring => "transferring",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Records the path a zap takes through [`ZapStage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StageTracker {
    current: ZapStage,
    path: Vec<ZapStage>,
}

impl StageTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: ZapStage::Idle,
            path: vec![ZapStage::Idle],
        }
    }

    pub(crate) fn advance(&mut self, next: ZapStage) {
        debug_assert!(
            self.current.can_advance_to(next),
            "illegal stage transition {} -> {}",
            self.current,
            next
        );
        debug!(from = %self.current, to = %next, "zap stage");
        self.current = next;
        self.path.push(next);
    }

    pub(crate) const fn current(&self) -> ZapStage {
        self.current
    }

    pub(crate) fn into_path(self) -> Vec<ZapStage> {
        self.path
    }
}
