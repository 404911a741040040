//! Quadratic extension `F[u]/(u^2 - qnr)`.
//!
//! Products are computed with Karatsuba (three base-field products) into
//! an unreduced `Fp2Dbl`, whose coefficients are reduced separately. The
//! additions and subtractions on operands and double-width products
//! follow the headroom profile of the base field; the product by the
//! non-residue is expanded into `|qnr|` additions or subtractions.

use core::ops::{Add, Mul, Neg, Sub};

use crate::field::{BaseField, Headroom, HeadroomOf, NonResidue, QnrOf,
    offset_spare_bits};
use crate::{CryptoRng, Error, RngCore, ScratchPool};

/// An element `c0 + c1*u`.
#[derive(Clone, Copy, Debug)]
pub struct Fp2<F: BaseField> {
    pub c0: F,
    pub c1: F,
}

/// An unreduced product in the quadratic extension.
#[derive(Clone, Copy, Debug)]
pub struct Fp2Dbl<F: BaseField> {
    pub c0: F::Dbl,
    pub c1: F::Dbl,
}

impl<F: BaseField> Fp2<F> {

    // Checked at compile time for each instantiation of
    // mul_unreduced_offset().
    const OFFSET_FITS: () = assert!(
        F::SPARE_BITS >= offset_spare_bits(<QnrOf<F> as NonResidue>::VALUE),
        "modulus is too large for the recentred product");

    /// Whether the base field leaves enough spare bits for
    /// `mul_unreduced_offset()` with its quadratic non-residue.
    pub const OFFSET_SUPPORTED: bool =
        F::SPARE_BITS >= offset_spare_bits(<QnrOf<F> as NonResidue>::VALUE);

    pub const ZERO: Self = Self { c0: F::ZERO, c1: F::ZERO };
    pub const ONE: Self = Self { c0: F::ONE, c1: F::ZERO };

    #[inline(always)]
    pub const fn new(c0: F, c1: F) -> Self {
        Self { c0, c1 }
    }

    /// Build `c0 + c1*u` from small integers.
    pub fn from_i64(c0: i64, c1: i64) -> Self {
        Self::new(F::from_i64(c0), F::from_i64(c1))
    }

    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        Self::new(F::random(rng), F::random(rng))
    }

    /// Unreduced product; both output coefficients are lower than `p*R`.
    pub fn mul_unreduced(&self, rhs: &Self) -> Fp2Dbl<F> {
        let (a, b) = (self, rhs);

        let t0 = <HeadroomOf<F> as Headroom>::sum(&a.c0, &a.c1);
        let t1 = <HeadroomOf<F> as Headroom>::sum(&b.c0, &b.c1);

        let mut c0 = a.c0.mul_unreduced(&b.c0);
        let c1 = a.c1.mul_unreduced(&b.c1);
        let t2 = t0.mul_unreduced(&t1);

        // a0*b0 + a1*b1
        let t0 = <HeadroomOf<F> as Headroom>::dbl_sum::<F>(&c0, &c1);

        // a0*b0 + qnr*a1*b1
        <QnrOf<F> as NonResidue>::fold(&mut c0, &c1, F::dbl_add_mod, F::dbl_sub_mod);

        // a0*b1 + a1*b0
        let c1 = <HeadroomOf<F> as Headroom>::dbl_diff::<F>(&t2, &t0);

        Fp2Dbl { c0, c1 }
    }

    /// Unreduced product, with the real part computed without any
    /// modular correction and then recentred by adding
    /// `p*2^(N*W-2)`. The base field must have enough spare bits for the
    /// non-residue (see `offset_spare_bits()`); this is checked at compile
    /// time.
    pub fn mul_unreduced_offset(&self, rhs: &Self) -> Fp2Dbl<F> {
        let () = Self::OFFSET_FITS;
        let (a, b) = (self, rhs);

        let t0 = a.c0.add_unreduced(&a.c1);
        let t1 = b.c0.add_unreduced(&b.c1);

        let mut c0 = a.c0.mul_unreduced(&b.c0);
        let c1 = a.c1.mul_unreduced(&b.c1);
        let t2 = t0.mul_unreduced(&t1);

        let t0 = F::dbl_add(&c0, &c1);

        // May be negative (modulo 2^(2*N*W)) before the offset.
        <QnrOf<F> as NonResidue>::fold(&mut c0, &c1, F::dbl_add, F::dbl_sub);

        let c1 = F::dbl_sub(&t2, &t0);

        F::dbl_add_quarter_modulus(&mut c0);
        Fp2Dbl { c0, c1 }
    }

    /// Reduced product. The unreduced intermediate is held in a buffer
    /// taken from `pool`; if none is available, `Error::ScratchExhausted`
    /// is returned. The buffer goes back to the pool in all cases.
    pub fn mul_reduced(&self, rhs: &Self, pool: &ScratchPool)
        -> Result<Self, Error>
    {
        let mut t = pool.acquire(Fp2Dbl::<F>::ZERO)?;
        *t = self.mul_unreduced(rhs);
        Ok(t.reduce())
    }

    #[inline]
    pub fn square(self) -> Self {
        self.mul_unreduced(&self).reduce()
    }

    /// Equality (constant-time): 0xFFFFFFFF on equality, 0 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        self.c0.equals(rhs.c0) & self.c1.equals(rhs.c1)
    }

    #[inline]
    pub fn iszero(self) -> u32 {
        self.c0.iszero() & self.c1.iszero()
    }
}

impl<F: BaseField> Fp2Dbl<F> {

    pub const ZERO: Self = Self { c0: F::DBL_ZERO, c1: F::DBL_ZERO };

    /// Reduce both coefficients.
    #[inline]
    pub fn reduce(&self) -> Fp2<F> {
        Fp2::new(F::reduce(&self.c0), F::reduce(&self.c1))
    }
}

impl<F: BaseField> Add for Fp2<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.c0 + other.c0, self.c1 + other.c1)
    }
}

impl<F: BaseField> Sub for Fp2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.c0 - other.c0, self.c1 - other.c1)
    }
}

impl<F: BaseField> Neg for Fp2<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<F: BaseField> Mul for Fp2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.mul_unreduced(&other).reduce()
    }
}
