//! Chain-agnostic account, token and pool identifier.

use core::fmt;

/// A 32-byte identifier for tokens, LP tokens (pools) and callers.
///
/// All byte sequences are valid. The all-zero address is reserved as
/// [`Address::NATIVE`], the marker for the chain's native asset in zap
/// records.
///
/// # Examples
///
/// ```
/// use cpmm_zap::domain::Address;
///
/// let token = Address::from_bytes([7u8; 32]);
/// assert_eq!(token.as_bytes(), [7u8; 32]);
/// assert!(!token.is_native());
/// assert!(Address::NATIVE.is_native());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// Marker for the chain's native asset (all zeros).
    pub const NATIVE: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds an address whose trailing eight bytes hold `index`
    /// (big-endian) after a one-byte `tag`.
    ///
    /// Used by the reference registry to derive deterministic pool ids.
    #[must_use]
    pub const fn derived(tag: u8, index: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = tag;
        let be = index.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for [`Address::NATIVE`].
    #[must_use]
    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in &self.0[..4] {
            write!(f, "{b:02x}")?;
        }
        write!(f, "…")?;
        for b in &self.0[28..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
