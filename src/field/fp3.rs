//! Cubic extension `F[v]/(v^3 - cnr)`.
//!
//! Products use the Karatsuba layout (six base-field products):
//!
//! ```text
//!   c0 = a0*b0 + cnr*(a1*b2 + a2*b1)
//!   c1 = a0*b1 + a1*b0 + cnr*a2*b2
//!   c2 = a0*b2 + a2*b0 + a1*b1
//! ```
//!
//! where each cross sum `ai*bj + aj*bi` is obtained as
//! `(ai + aj)*(bi + bj) - ai*bi - aj*bj`.

use core::ops::{Add, Mul, Neg, Sub};

use crate::field::{BaseField, CnrOf, Headroom, HeadroomOf, NonResidue};
use crate::{CryptoRng, Error, RngCore, ScratchPool};

/// An element `c0 + c1*v + c2*v^2`.
#[derive(Clone, Copy, Debug)]
pub struct Fp3<F: BaseField> {
    pub c0: F,
    pub c1: F,
    pub c2: F,
}

/// An unreduced product in the cubic extension.
#[derive(Clone, Copy, Debug)]
pub struct Fp3Dbl<F: BaseField> {
    pub c0: F::Dbl,
    pub c1: F::Dbl,
    pub c2: F::Dbl,
}

impl<F: BaseField> Fp3<F> {

    pub const ZERO: Self = Self { c0: F::ZERO, c1: F::ZERO, c2: F::ZERO };
    pub const ONE: Self = Self { c0: F::ONE, c1: F::ZERO, c2: F::ZERO };

    #[inline(always)]
    pub const fn new(c0: F, c1: F, c2: F) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn from_i64(c0: i64, c1: i64, c2: i64) -> Self {
        Self::new(F::from_i64(c0), F::from_i64(c1), F::from_i64(c2))
    }

    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        Self::new(F::random(rng), F::random(rng), F::random(rng))
    }

    // (x + y)*(z + w) under the headroom profile.
    #[inline(always)]
    fn cross(x: &F, y: &F, z: &F, w: &F) -> F::Dbl {
        let s = <HeadroomOf<F> as Headroom>::sum(x, y);
        let t = <HeadroomOf<F> as Headroom>::sum(z, w);
        s.mul_unreduced(&t)
    }

    /// Unreduced product; all output coefficients are lower than `p*R`.
    pub fn mul_unreduced(&self, rhs: &Self) -> Fp3Dbl<F> {
        let (a, b) = (self, rhs);

        let t0 = a.c0.mul_unreduced(&b.c0);
        let t1 = a.c1.mul_unreduced(&b.c1);
        let t2 = a.c2.mul_unreduced(&b.c2);

        // a1*b2 + a2*b1
        let t5 = Self::cross(&a.c1, &a.c2, &b.c1, &b.c2);
        let t6 = F::dbl_add(&t1, &t2);
        let t4 = F::dbl_sub_mod(&t5, &t6);
        let mut c0 = t0;
        <CnrOf<F> as NonResidue>::fold(&mut c0, &t4,
            F::dbl_add_mod, F::dbl_sub_mod);

        // a0*b1 + a1*b0
        let t6 = Self::cross(&a.c0, &a.c1, &b.c0, &b.c1);
        let t4 = F::dbl_add(&t0, &t1);
        let mut c1 = F::dbl_sub_mod(&t6, &t4);
        <CnrOf<F> as NonResidue>::fold(&mut c1, &t2,
            F::dbl_add_mod, F::dbl_sub_mod);

        // a0*b2 + a2*b0
        let t4 = Self::cross(&a.c0, &a.c2, &b.c0, &b.c2);
        let t6 = F::dbl_add(&t0, &t2);
        let t5 = F::dbl_sub_mod(&t4, &t6);
        let c2 = F::dbl_add_mod(&t5, &t1);

        Fp3Dbl { c0, c1, c2 }
    }

    /// Reduced product, with the unreduced intermediate taken from
    /// `pool` (see `Fp2::mul_reduced()`).
    pub fn mul_reduced(&self, rhs: &Self, pool: &ScratchPool)
        -> Result<Self, Error>
    {
        let mut t = pool.acquire(Fp3Dbl::<F>::ZERO)?;
        *t = self.mul_unreduced(rhs);
        Ok(t.reduce())
    }

    #[inline]
    pub fn square(self) -> Self {
        self.mul_unreduced(&self).reduce()
    }

    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        self.c0.equals(rhs.c0) & self.c1.equals(rhs.c1)
            & self.c2.equals(rhs.c2)
    }

    #[inline]
    pub fn iszero(self) -> u32 {
        self.c0.iszero() & self.c1.iszero() & self.c2.iszero()
    }
}

impl<F: BaseField> Fp3Dbl<F> {

    pub const ZERO: Self = Self {
        c0: F::DBL_ZERO, c1: F::DBL_ZERO, c2: F::DBL_ZERO
    };

    #[inline]
    pub fn reduce(&self) -> Fp3<F> {
        Fp3::new(F::reduce(&self.c0), F::reduce(&self.c1),
            F::reduce(&self.c2))
    }
}

impl<F: BaseField> Add for Fp3<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.c0 + other.c0, self.c1 + other.c1,
            self.c2 + other.c2)
    }
}

impl<F: BaseField> Sub for Fp3<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.c0 - other.c0, self.c1 - other.c1,
            self.c2 - other.c2)
    }
}

impl<F: BaseField> Neg for Fp3<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl<F: BaseField> Mul for Fp3<F> {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.mul_unreduced(&other).reduce()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::fields::{FpM61, FpP60, FpBn254};
    use crate::fields::testfields::FpC63;
    use crate::backend::DIGIT_BITS;
    use crate::testutil::{to_big, TestRng};
    use num_bigint::BigUint;

    fn check_mul<F: BaseField>(seed: u64) {
        let zp = to_big(F::modulus());
        let zpr = &zp << (F::N * (DIGIT_BITS as usize));
        let k = <CnrOf<F> as NonResidue>::VALUE;
        let zc = if k < 0 {
            &zp - BigUint::from(k.unsigned_abs())
        } else {
            BigUint::from(k as u32)
        };
        let cnr = F::from_i64(k as i64);
        let mut rng = TestRng::new(seed);
        for _ in 0..100 {
            let a = Fp3::<F>::random(&mut rng);
            let b = Fp3::<F>::random(&mut rng);
            let ra = [to_big(a.c0.digits()), to_big(a.c1.digits()),
                to_big(a.c2.digits())];
            let rb = [to_big(b.c0.digits()), to_big(b.c1.digits()),
                to_big(b.c2.digits())];

            let d = a.mul_unreduced(&b);
            let d0 = to_big(F::dbl_digits(&d.c0));
            let d1 = to_big(F::dbl_digits(&d.c1));
            let d2 = to_big(F::dbl_digits(&d.c2));
            assert!(d0 < zpr && d1 < zpr && d2 < zpr);

            let e0 = &ra[0] * &rb[0] + &zc * (&ra[1] * &rb[2] + &ra[2] * &rb[1]);
            let e1 = &ra[0] * &rb[1] + &ra[1] * &rb[0] + &zc * (&ra[2] * &rb[2]);
            let e2 = &ra[0] * &rb[2] + &ra[2] * &rb[0] + &ra[1] * &rb[1];
            assert!(&d0 % &zp == e0 % &zp);
            assert!(&d1 % &zp == e1 % &zp);
            assert!(&d2 % &zp == e2 % &zp);

            let c = d.reduce();
            let x0 = a.c0 * b.c0 + cnr * (a.c1 * b.c2 + a.c2 * b.c1);
            let x1 = a.c0 * b.c1 + a.c1 * b.c0 + cnr * a.c2 * b.c2;
            let x2 = a.c0 * b.c2 + a.c2 * b.c0 + a.c1 * b.c1;
            assert!(c.equals(Fp3::new(x0, x1, x2)) == 0xFFFFFFFF);

            let pool = ScratchPool::new(1);
            let h = a.mul_reduced(&b, &pool).unwrap();
            assert!(h.equals(c) == 0xFFFFFFFF);
            assert_eq!(pool.in_use(), 0);
        }
    }

    #[test]
    fn mul_m61() {
        check_mul::<FpM61>(21);
    }

    #[test]
    fn mul_p60() {
        check_mul::<FpP60>(22);
    }

    #[test]
    fn mul_c63() {
        check_mul::<FpC63>(24);
    }

    #[test]
    fn mul_bn254() {
        check_mul::<FpBn254>(23);
    }

    fn check_algebra<F: BaseField>(seed: u64) {
        let mut rng = TestRng::new(seed);
        for _ in 0..50 {
            let a = Fp3::<F>::random(&mut rng);
            let b = Fp3::<F>::random(&mut rng);
            let c = Fp3::<F>::random(&mut rng);
            assert!((a * b).equals(b * a) == 0xFFFFFFFF);
            assert!(((a * b) * c).equals(a * (b * c)) == 0xFFFFFFFF);
            assert!((a * (b + c)).equals(a * b + a * c) == 0xFFFFFFFF);
            assert!((a * Fp3::ONE).equals(a) == 0xFFFFFFFF);
            assert!((a + (-a) - Fp3::ZERO).iszero() == 0xFFFFFFFF);
        }

        // v^3 = cnr
        let v = Fp3::<F>::from_i64(0, 1, 0);
        let k = <CnrOf<F> as NonResidue>::VALUE as i64;
        assert!((v * v * v).equals(Fp3::from_i64(k, 0, 0)) == 0xFFFFFFFF);
    }

    #[test]
    fn algebra() {
        check_algebra::<FpM61>(30);
        check_algebra::<FpP60>(31);
        check_algebra::<FpBn254>(32);
    }

    #[test]
    fn pool_exhausted() {
        let a = Fp3::<FpP60>::from_i64(1, 2, 3);
        let b = Fp3::<FpP60>::from_i64(4, 5, 6);
        let pool = ScratchPool::new(0);
        assert_eq!(a.mul_reduced(&b, &pool).unwrap_err(),
            Error::ScratchExhausted { capacity: 0 });
        assert_eq!(pool.in_use(), 0);

        // With cnr = 5:
        //   c0 = 4 + 5*(12 + 15) = 139
        //   c1 = 5 + 8 + 5*18 = 103
        //   c2 = 6 + 12 + 10 = 28
        let pool = ScratchPool::new(2);
        let c = a.mul_reduced(&b, &pool).unwrap();
        assert!(c.equals(Fp3::from_i64(139, 103, 28)) == 0xFFFFFFFF);
    }
}
