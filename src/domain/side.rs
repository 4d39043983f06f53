//! Position of an asset within a pool's canonical pair.

/// Which of a pool's two assets a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The asset with the lower address.
    Token0,
    /// The asset with the higher address.
    Token1,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Token0 => Self::Token1,
            Self::Token1 => Self::Token0,
        }
    }

    /// `true` for [`Side::Token0`].
    #[must_use]
    pub const fn is_token0(self) -> bool {
        matches!(self, Self::Token0)
    }

    /// Side selected by a "sell token0" style flag.
    #[must_use]
    pub const fn from_token0_flag(is_token0: bool) -> Self {
        if is_token0 {
            Self::Token0
        } else {
            Self::Token1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        assert_eq!(Side::Token0.opposite(), Side::Token1);
        assert_eq!(Side::Token0.opposite().opposite(), Side::Token0);
    }

    #[test]
    fn flag_round_trip() {
        assert_eq!(Side::from_token0_flag(true), Side::Token0);
        assert!(!Side::from_token0_flag(false).is_token0());
    }
}
