//! Integer square roots.

use ethnum::U256;

/// `⌊√n⌋` via Newton's method.
///
/// Starts from a power of two at or above the root, so the iteration
/// decreases monotonically and stops at the floor.
///
/// # Examples
///
/// ```
/// use cpmm_zap::math::integer_sqrt;
/// use ethnum::U256;
///
/// assert_eq!(integer_sqrt(U256::from(99u8)), U256::from(9u8));
/// assert_eq!(integer_sqrt(U256::from(100u8)), U256::from(10u8));
/// ```
#[must_use]
pub fn integer_sqrt(n: U256) -> U256 {
    if n < U256::from(2u8) {
        return n;
    }
    let bits = 256 - n.leading_zeros();
    let mut x = U256::ONE << bits.div_ceil(2);
    loop {
        let y = (x + n / x) >> 1u32;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// `⌊√n⌋` for 128-bit inputs.
#[must_use]
pub fn integer_sqrt_u128(n: u128) -> u128 {
    // √(2^128 - 1) < 2^64, so the root always narrows.
    integer_sqrt(U256::from(n)).as_u128()
}
