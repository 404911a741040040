//! Prime fields and their quadratic and cubic extensions.
//!
//! A base field is a type generated by `define_fp!()` from a
//! configuration type implementing `FieldParams`. Elements are kept in
//! Montgomery representation; each field type comes with a double-width
//! companion (`BaseField::Dbl`) holding unreduced products over `2*N`
//! digits.
//!
//! The extension types `Fp2<F>` (`u^2 = qnr`) and `Fp3<F>` (`v^3 = cnr`)
//! are generic over the base field. Their unreduced products are built
//! from base-field products and additions on double-width values; the
//! field configuration selects, at compile time, how these additions are
//! performed (the `Headroom` profile) and how the multiplication by the
//! non-residue is expanded (the `NonResidue` class).

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use crate::backend::Digit;
use crate::{CryptoRng, RngCore};

pub mod fp;
pub mod fp2;
pub mod fp3;

pub use fp::{define_fp, define_fp_tests};
pub use fp2::{Fp2, Fp2Dbl};
pub use fp3::{Fp3, Fp3Dbl};

/// Static configuration of a prime field.
pub trait FieldParams {

    /// The modulus, as 64-bit limbs in little-endian order. The modulus
    /// must be odd and greater than 1.
    const MODULUS: &'static [u64];

    /// How sums of operands and of double-width products are computed
    /// within extension-field multiplications.
    type Headroom: Headroom;

    /// Quadratic non-residue `qnr`, with `u^2 = qnr` in `Fp2`.
    type Qnr: NonResidue;

    /// Cubic non-residue `cnr`, with `v^3 = cnr` in `Fp3`.
    type Cnr: NonResidue;
}

/// Operations on a prime field, as needed by the extension fields.
///
/// Elements are always canonical. Double-width values are unreduced
/// integers over `2*N` digits; unless noted otherwise they must remain
/// lower than `p*R` (with `R = 2^(N*W)`) to be reducible.
pub trait BaseField: Copy + Clone + Debug
    + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
    + Mul<Output = Self>
{
    /// Unreduced double-width value.
    type Dbl: Copy + Clone + Debug;

    /// Field configuration.
    type Params: FieldParams;

    const ZERO: Self;
    const ONE: Self;

    /// Number of digits in an element.
    const N: usize;

    /// Number of unused top bits in the modulus, over `N` digits.
    const SPARE_BITS: u32;

    /// Zero, in double-width.
    const DBL_ZERO: Self::Dbl;

    fn from_i64(x: i64) -> Self;
    fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self;

    /// Equality (constant-time): 0xFFFFFFFF on equality, 0 otherwise.
    fn equals(self, rhs: Self) -> u32;

    /// 0xFFFFFFFF if zero, 0 otherwise (constant-time).
    fn iszero(self) -> u32;

    /// Internal representation digits (Montgomery form).
    fn digits(&self) -> &[Digit];

    /// Digits of a double-width value.
    fn dbl_digits(d: &Self::Dbl) -> &[Digit];

    /// The modulus, as digits.
    fn modulus() -> &'static [Digit];

    /// Integer sum of the representations, without reduction. The result
    /// may be non-canonical, and is valid only as a multiplication
    /// operand.
    fn add_unreduced(&self, rhs: &Self) -> Self;

    fn add_reduced(&self, rhs: &Self) -> Self;
    fn sub_reduced(&self, rhs: &Self) -> Self;

    /// Integer product of the representations, over `2*N` digits.
    fn mul_unreduced(&self, rhs: &Self) -> Self::Dbl;

    /// Integer square of the representation, over `2*N` digits.
    fn square_unreduced(&self) -> Self::Dbl;

    /// Montgomery reduction: returns `d/R mod p`, for `d < p*R`.
    fn reduce(d: &Self::Dbl) -> Self;

    /// Plain addition (no correction).
    fn dbl_add(a: &Self::Dbl, b: &Self::Dbl) -> Self::Dbl;

    /// Plain subtraction, modulo `2^(2*N*W)`.
    fn dbl_sub(a: &Self::Dbl, b: &Self::Dbl) -> Self::Dbl;

    /// Addition modulo `p*R`; operands and result are in `[0, p*R)`.
    fn dbl_add_mod(a: &Self::Dbl, b: &Self::Dbl) -> Self::Dbl;

    /// Subtraction modulo `p*R`; operands and result are in `[0, p*R)`.
    fn dbl_sub_mod(a: &Self::Dbl, b: &Self::Dbl) -> Self::Dbl;

    /// Add `p*2^(N*W-2)` to `d`, exactly.
    fn dbl_add_quarter_modulus(d: &mut Self::Dbl);
}

/// Shorthand for the profile of a base field.
pub type HeadroomOf<F> = <<F as BaseField>::Params as FieldParams>::Headroom;

/// Shorthand for the quadratic non-residue of a base field.
pub type QnrOf<F> = <<F as BaseField>::Params as FieldParams>::Qnr;

/// Shorthand for the cubic non-residue of a base field.
pub type CnrOf<F> = <<F as BaseField>::Params as FieldParams>::Cnr;

/// Choice of the addition operations used in extension-field products.
///
/// With `Compact`, every intermediate sum is reduced, so that all
/// double-width values stay in `[0, p*R)`; this works with a single
/// spare bit in the modulus. With `Wide`, sums are plain integer
/// additions, which is faster but needs two spare bits so that
/// operand sums stay below `2^(N*W)` and their products below `p*R`.
pub trait Headroom {

    /// Minimum number of spare bits in the modulus.
    const MIN_SPARE_BITS: u32;

    /// Sum of two operands of a multiplication.
    fn sum<F: BaseField>(a: &F, b: &F) -> F;

    /// Sum of two double-width products.
    fn dbl_sum<F: BaseField>(a: &F::Dbl, b: &F::Dbl) -> F::Dbl;

    /// Difference of two double-width values, the result being known to
    /// be nonnegative as an integer.
    fn dbl_diff<F: BaseField>(a: &F::Dbl, b: &F::Dbl) -> F::Dbl;
}

/// Reduced sums; for moduli with one spare bit.
#[derive(Clone, Copy, Debug)]
pub struct Compact;

/// Unreduced sums; for moduli with at least two spare bits.
#[derive(Clone, Copy, Debug)]
pub struct Wide;

impl Headroom for Compact {
    const MIN_SPARE_BITS: u32 = 1;

    #[inline(always)]
    fn sum<F: BaseField>(a: &F, b: &F) -> F {
        a.add_reduced(b)
    }

    #[inline(always)]
    fn dbl_sum<F: BaseField>(a: &F::Dbl, b: &F::Dbl) -> F::Dbl {
        F::dbl_add_mod(a, b)
    }

    #[inline(always)]
    fn dbl_diff<F: BaseField>(a: &F::Dbl, b: &F::Dbl) -> F::Dbl {
        F::dbl_sub_mod(a, b)
    }
}

impl Headroom for Wide {
    const MIN_SPARE_BITS: u32 = 2;

    #[inline(always)]
    fn sum<F: BaseField>(a: &F, b: &F) -> F {
        a.add_unreduced(b)
    }

    #[inline(always)]
    fn dbl_sum<F: BaseField>(a: &F::Dbl, b: &F::Dbl) -> F::Dbl {
        F::dbl_add(a, b)
    }

    #[inline(always)]
    fn dbl_diff<F: BaseField>(a: &F::Dbl, b: &F::Dbl) -> F::Dbl {
        F::dbl_sub(a, b)
    }
}

/// A small non-residue, multiplied by through repeated additions or
/// subtractions.
pub trait NonResidue {

    /// The non-residue value (nonzero, small).
    const VALUE: i32;

    /// Set `c` to `c + VALUE*t`, using only `add` and `sub`. The number
    /// of calls is `|VALUE|`, independent of the operand values.
    fn fold<D: Copy>(c: &mut D, t: &D,
        add: fn(&D, &D) -> D, sub: fn(&D, &D) -> D);
}

/// The non-residue -1 (a single subtraction).
#[derive(Clone, Copy, Debug)]
pub struct MinusOne;

/// A small non-residue `K`, with `K != 0`. Negative values use `|K|`
/// subtractions; positive values use `K` additions.
#[derive(Clone, Copy, Debug)]
pub struct Small<const K: i32>;

impl NonResidue for MinusOne {
    const VALUE: i32 = -1;

    #[inline(always)]
    fn fold<D: Copy>(c: &mut D, t: &D,
        _add: fn(&D, &D) -> D, sub: fn(&D, &D) -> D)
    {
        *c = sub(c, t);
    }
}

impl<const K: i32> NonResidue for Small<K> {
    const VALUE: i32 = {
        assert!(K != 0, "non-residue must be nonzero");
        K
    };

    #[inline]
    fn fold<D: Copy>(c: &mut D, t: &D,
        add: fn(&D, &D) -> D, sub: fn(&D, &D) -> D)
    {
        let k = Self::VALUE;
        if k < 0 {
            for _ in 0..k.unsigned_abs() {
                *c = sub(c, t);
            }
        } else {
            for _ in 0..k {
                *c = add(c, t);
            }
        }
    }
}

const fn ceil_log2(x: u32) -> u32 {
    if x <= 1 {
        0
    } else {
        32 - (x - 1).leading_zeros()
    }
}

/// Spare bits needed in the modulus for the quarter-modulus recentred
/// `Fp2` product with the non-residue `qnr`: `|qnr|*p <= R/4` when
/// `qnr < 0`, `(1+qnr)*p <= R/2` when `qnr > 0`.
pub const fn offset_spare_bits(qnr: i32) -> u32 {
    if qnr < 0 {
        2 + ceil_log2(qnr.unsigned_abs())
    } else {
        1 + ceil_log2(1 + qnr as u32)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn fold_counts() {
        fn add(a: &i64, b: &i64) -> i64 { a + b }
        fn sub(a: &i64, b: &i64) -> i64 { a - b }

        let mut c = 100i64;
        MinusOne::fold(&mut c, &7, add, sub);
        assert_eq!(c, 93);

        let mut c = 100i64;
        Small::<-5>::fold(&mut c, &7, add, sub);
        assert_eq!(c, 65);

        let mut c = 100i64;
        Small::<5>::fold(&mut c, &7, add, sub);
        assert_eq!(c, 135);

        assert_eq!(<Small<-2> as NonResidue>::VALUE, -2);
        assert_eq!(<Small<3> as NonResidue>::VALUE, 3);
    }

    #[test]
    fn offset_bits() {
        assert_eq!(offset_spare_bits(-1), 2);
        assert_eq!(offset_spare_bits(-2), 3);
        assert_eq!(offset_spare_bits(-3), 4);
        assert_eq!(offset_spare_bits(-5), 5);
        assert_eq!(offset_spare_bits(1), 2);
        assert_eq!(offset_spare_bits(3), 3);
        assert_eq!(offset_spare_bits(5), 4);
    }
}
