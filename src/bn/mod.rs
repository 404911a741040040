//! Multi-precision natural numbers, at the digit level.
//!
//! All functions here operate on caller-provided digit slices (least
//! significant digit first). Operand lengths are a caller contract: they
//! are checked with `debug_assert!()` only, since these kernels sit on the
//! hot path of every field operation. No function allocates, and the
//! sequence of digit operations depends only on the slice lengths, never
//! on the digit values.

use crate::backend::{Digit, DIGIT_BITS, addcarry, subborrow};

pub mod mul;
pub mod sqr;

pub use mul::mul;
pub use sqr::{square, square_accumulate, square_rows};

/// Add `b` to `a` (in place); both slices must have the same length.
/// The carry (0 or 1) is returned.
#[inline]
pub fn add_assign(a: &mut [Digit], b: &[Digit]) -> Digit {
    debug_assert!(a.len() == b.len());
    let mut cc = 0;
    for i in 0..a.len() {
        (a[i], cc) = addcarry(a[i], b[i], cc);
    }
    cc as Digit
}

/// Add `b & m` to `a` (in place), for a mask `m` equal to 0 or all-ones.
/// The carry (0 or 1) is returned.
#[inline]
pub fn add_assign_masked(a: &mut [Digit], b: &[Digit], m: Digit) -> Digit {
    debug_assert!(a.len() == b.len());
    let mut cc = 0;
    for i in 0..a.len() {
        (a[i], cc) = addcarry(a[i], b[i] & m, cc);
    }
    cc as Digit
}

/// Subtract `b` from `a` (in place); both slices must have the same
/// length. The borrow (0 or 1) is returned.
#[inline]
pub fn sub_assign(a: &mut [Digit], b: &[Digit]) -> Digit {
    debug_assert!(a.len() == b.len());
    let mut cc = 0;
    for i in 0..a.len() {
        (a[i], cc) = subborrow(a[i], b[i], cc);
    }
    cc as Digit
}

/// Shift `a` left by `bits` bits (in place), with `0 < bits < W`. The
/// bits pushed out of the top digit are returned (in the low bits).
#[inline]
pub fn shl_bits(a: &mut [Digit], bits: u32) -> Digit {
    debug_assert!(bits > 0 && bits < DIGIT_BITS);
    let mut cc = 0;
    for w in a.iter_mut() {
        let x = *w;
        *w = (x << bits) | cc;
        cc = x >> (DIGIT_BITS - bits);
    }
    cc
}

/// Shift `a` right by `bits` bits (in place), with `0 < bits < W`. The
/// bits pushed out of the bottom digit are returned (in the high bits).
#[inline]
pub fn shr_bits(a: &mut [Digit], bits: u32) -> Digit {
    debug_assert!(bits > 0 && bits < DIGIT_BITS);
    let mut cc = 0;
    for w in a.iter_mut().rev() {
        let x = *w;
        *w = (x >> bits) | cc;
        cc = x << (DIGIT_BITS - bits);
    }
    cc
}

/// Set all digits of `a` to zero.
#[inline]
pub fn zero(a: &mut [Digit]) {
    for w in a.iter_mut() {
        *w = 0;
    }
}
