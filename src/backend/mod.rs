//! Digit type and digit-level primitives.
//!
//! A multi-precision integer is a sequence of digits, least significant
//! first. The digit width is fixed per build: a 32-bit and a 64-bit
//! backend are provided, and the "right one" is selected automatically
//! from the target pointer width unless overridden with the
//! `w32_backend` or `w64_backend` feature.
//!
//! Each backend provides:
//!
//!  - The `Digit` type and the `DIGIT_BITS` constant.
//!
//!  - `addcarry(x, y, c) -> (d, c)` and `subborrow(x, y, c) -> (d, c)`,
//!    with a carry/borrow of 0 or 1 (x86 targets use the `_addcarry`
//!    and `_subborrow` intrinsics).
//!
//!  - `umull(x, y) -> (lo, hi)`, the double-width product of two digits,
//!    and `umull_add2(x, y, z1, z2)`, which adds two digits to that
//!    product and never overflows.
//!
//!  - `ninv(x)`, returning `-1/x mod 2^W` for an odd digit `x`.
//!
//!  - `DIGITS_PER_U64` and `limb_digit(x, j)`, which split the 64-bit
//!    limbs used to write constants into digits.

#[cfg(not(any(
    feature = "w32_backend",
    feature = "w64_backend",
    target_pointer_width = "32",
    target_pointer_width = "64",
)))]
compile_error!("no backend specified; cannot infer from pointer size");

#[cfg(all(
    feature = "w32_backend",
    feature = "w64_backend",
))]
compile_error!("cannot use w32 and w64 backends simultaneously");

#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub mod w32;

#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub use w32::{Digit, DIGIT_BITS};

#[cfg(any(
    feature = "w32_backend",
    all(not(feature = "w64_backend"), target_pointer_width = "32"),
))]
pub use w32::{addcarry, subborrow, umull, umull_add2, ninv,
    DIGITS_PER_U64, limb_digit};

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub mod w64;

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub use w64::{Digit, DIGIT_BITS};

#[cfg(any(
    feature = "w64_backend",
    all(not(feature = "w32_backend"), target_pointer_width = "64"),
))]
pub use w64::{addcarry, subborrow, umull, umull_add2, ninv,
    DIGITS_PER_U64, limb_digit};

/// Digit width, in bytes.
pub const DIGIT_BYTES: usize = (DIGIT_BITS as usize) >> 3;

/// Expand a carry or borrow (0 or 1) into a digit mask (0 or all-ones).
#[inline(always)]
pub const fn mask(c: Digit) -> Digit {
    c.wrapping_neg()
}
