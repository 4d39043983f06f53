//! Submission deadline for state-changing calls.

use core::fmt;

/// Latest timestamp (seconds) at which a zap may still execute.
///
/// The deadline is inclusive: a call at exactly `deadline` succeeds.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::Deadline;
///
/// let d = Deadline::at(100);
/// assert!(!d.has_passed(100));
/// assert!(d.has_passed(101));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(u64);

impl Deadline {
    /// No deadline.
    pub const NEVER: Self = Self(u64::MAX);

    /// Deadline at the given unix timestamp.
    #[must_use]
    pub const fn at(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// Raw timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.0
    }

    /// `true` once `now` is strictly after the deadline.
    #[must_use]
    pub const fn has_passed(&self, now: u64) -> bool {
        now > self.0
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
