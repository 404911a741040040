//! Generic prime field implementation.
//!
//! `define_fp!(Fp, FpDbl, Params, fp_impl)` defines the field element type
//! `Fp` and its double-width companion `FpDbl`, for the modulus and
//! profile given by the configuration type `Params` (which must implement
//! `FieldParams`). The definitions are made in the sub-module `fp_impl`
//! and re-exported in the caller's module.
//!
//! Elements use Montgomery representation: the value `x` is stored as
//! `x*R mod p`, with `R = 2^(N*W)`, `N` being the number of digits of the
//! modulus and `W` the digit width. The stored value is always fully
//! reduced. Double-width values are plain integers over `2*N` digits;
//! the product of two elements is such a value, and `reduce()` converts
//! it back (it divides by `R` modulo `p`) as long as it is lower than
//! `p*R`.
//!
//! A compile-time assertion checks that the modulus is odd and leaves at
//! least as many spare bits as the headroom profile needs.

#[macro_export]
macro_rules! define_fp { ($typename:ident, $dblname:ident, $params:ident, $submod:ident) => {
    // We define a sub-module so that the 'use' clauses do not spill over
    // the caller.
    pub use $submod::{$typename, $dblname};
    mod $submod {

    use $crate::backend::{Digit, DIGIT_BITS, DIGIT_BYTES, DIGITS_PER_U64,
        addcarry, umull_add2, ninv, limb_digit, mask};
    use $crate::bn;
    use $crate::field::{BaseField, FieldParams, Headroom};
    use $crate::{CryptoRng, RngCore};
    use super::$params;

    /// A field element (Montgomery representation).
    #[derive(Clone, Copy, Debug)]
    pub struct $typename([Digit; $typename::N]);

    /// An unreduced double-width value.
    #[derive(Clone, Copy, Debug)]
    pub struct $dblname([Digit; $typename::N << 1]);

    const _: () = assert!((<$params as FieldParams>::MODULUS[0] & 1) == 1,
        "modulus must be odd");
    const _: () = assert!($typename::SPARE_BITS
        >= <<$params as FieldParams>::Headroom as Headroom>::MIN_SPARE_BITS,
        "modulus is too large for the selected headroom profile");

    static MODULUS_DIGITS: [Digit; $typename::N] = $typename::MODULUS;

    impl $typename {

        /// Number of digits in an element.
        pub const N: usize =
            <$params as FieldParams>::MODULUS.len() * DIGITS_PER_U64;

        /// Modulus (little-endian digits).
        pub const MODULUS: [Digit; Self::N] = Self::make_modulus();

        /// Modulus length, in bits.
        pub const BITLEN: u32 = Self::mod_bitlen();

        /// Unused bits at the top of the modulus.
        pub const SPARE_BITS: u32 = (Self::N as u32) * DIGIT_BITS - Self::BITLEN;

        /// Element encoded length, in bytes.
        pub const ENC_LEN: usize = ((Self::BITLEN as usize) + 7) >> 3;

        const M0I: Digit = ninv(Self::MODULUS[0]);
        const R: [Digit; Self::N] =
            Self::pow2mod(Self::N * (DIGIT_BITS as usize));
        const R2: [Digit; Self::N] =
            Self::pow2mod(Self::N * (DIGIT_BITS as usize) * 2);

        pub const ZERO: Self = Self([0; Self::N]);
        pub const ONE: Self = Self(Self::R);

        const fn make_modulus() -> [Digit; Self::N] {
            let m = <$params as FieldParams>::MODULUS;
            let mut d = [0 as Digit; Self::N];
            let mut i = 0;
            while i < Self::N {
                d[i] = limb_digit(m[i / DIGITS_PER_U64], i % DIGITS_PER_U64);
                i += 1;
            }
            d
        }

        const fn mod_bitlen() -> u32 {
            let mut i = Self::N;
            while i > 0 {
                i -= 1;
                let w = Self::MODULUS[i];
                if w != 0 {
                    return (i as u32) * DIGIT_BITS + DIGIT_BITS - w.leading_zeros();
                }
            }
            0
        }

        // x - y - cc, with the borrow (const context).
        const fn const_sbb(x: Digit, y: Digit, cc: Digit) -> (Digit, Digit) {
            let d = x.wrapping_sub(y).wrapping_sub(cc);
            let b = (x < y) | ((x == y) & (cc != 0));
            (d, b as Digit)
        }

        // 2^n mod p (const context, plain integer).
        const fn pow2mod(n: usize) -> [Digit; Self::N] {
            let mut d = [0 as Digit; Self::N];
            d[0] = 1;
            let mut k = 0;
            while k < n {
                let mut hi: Digit = 0;
                let mut i = 0;
                while i < Self::N {
                    let x = d[i];
                    d[i] = (x << 1) | hi;
                    hi = x >> (DIGIT_BITS - 1);
                    i += 1;
                }
                let mut e = [0 as Digit; Self::N];
                let mut cc: Digit = 0;
                let mut i = 0;
                while i < Self::N {
                    let (x, b) = Self::const_sbb(d[i], Self::MODULUS[i], cc);
                    e[i] = x;
                    cc = b;
                    i += 1;
                }
                if hi != 0 || cc == 0 {
                    d = e;
                }
                k += 1;
            }
            d
        }

        #[inline]
        fn set_add(&mut self, rhs: &Self) {
            let cc1 = bn::add_assign(&mut self.0, &rhs.0);
            let cc2 = bn::sub_assign(&mut self.0, &Self::MODULUS);

            // Undo the subtraction if it borrowed, unless the addition
            // itself carried.
            let m = mask(cc2) & !mask(cc1);
            bn::add_assign_masked(&mut self.0, &Self::MODULUS, m);
        }

        #[inline]
        fn set_sub(&mut self, rhs: &Self) {
            let cc = bn::sub_assign(&mut self.0, &rhs.0);
            bn::add_assign_masked(&mut self.0, &Self::MODULUS, mask(cc));
        }

        // Negate this element.
        #[inline]
        pub fn set_neg(&mut self) {
            let mut r = Self::ZERO;
            r.set_sub(self);
            *self = r;
        }

        // Set this element to `a` if ctl == 0xFFFFFFFF; leave it unchanged
        // if ctl == 0.
        #[inline]
        pub fn set_cond(&mut self, a: &Self, ctl: u32) {
            let cw = ((ctl as i32) as i64) as Digit;
            for i in 0..Self::N {
                self.0[i] ^= cw & (self.0[i] ^ a.0[i]);
            }
        }

        // a0 if ctl == 0, a1 if ctl == 0xFFFFFFFF.
        #[inline]
        pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
            let mut r = *a0;
            r.set_cond(a1, ctl);
            r
        }

        #[inline(always)]
        pub fn add_reduced(&self, rhs: &Self) -> Self {
            let mut r = *self;
            r.set_add(rhs);
            r
        }

        #[inline(always)]
        pub fn sub_reduced(&self, rhs: &Self) -> Self {
            let mut r = *self;
            r.set_sub(rhs);
            r
        }

        /// Integer sum of the internal representations. The carry is
        /// dropped, so there must be a spare bit in the modulus.
        #[inline(always)]
        pub fn add_unreduced(&self, rhs: &Self) -> Self {
            let mut r = *self;
            bn::add_assign(&mut r.0, &rhs.0);
            r
        }

        #[inline]
        pub fn mul_unreduced(&self, rhs: &Self) -> $dblname {
            let mut d = $dblname::ZERO;
            bn::mul(&mut d.0, &self.0, &rhs.0);
            d
        }

        #[inline]
        pub fn square_unreduced(&self) -> $dblname {
            let mut d = $dblname::ZERO;
            bn::square(&mut d.0, &self.0);
            d
        }

        /// Montgomery reduction of `d`, which must be lower than `p*R`.
        pub fn reduce(d: &$dblname) -> Self {
            let mut t = d.0;
            let mut cch = 0u8;
            for i in 0..Self::N {
                let f = t[i].wrapping_mul(Self::M0I);
                let mut cc: Digit = 0;
                for j in 0..Self::N {
                    (t[i + j], cc) = umull_add2(f, Self::MODULUS[j], t[i + j], cc);
                }
                (t[i + Self::N], cch) = addcarry(t[i + Self::N], cc, cch);
            }

            // Upper half plus cch*R is lower than 2*p.
            let mut r = Self::ZERO;
            r.0.copy_from_slice(&t[Self::N..]);
            let cc = bn::sub_assign(&mut r.0, &Self::MODULUS);
            bn::add_assign_masked(&mut r.0, &Self::MODULUS,
                (cch as Digit).wrapping_sub(cc));
            r
        }

        #[inline]
        fn set_mul(&mut self, rhs: &Self) {
            *self = Self::reduce(&self.mul_unreduced(rhs));
        }

        #[inline]
        pub fn square(self) -> Self {
            Self::reduce(&self.square_unreduced())
        }

        #[inline]
        pub fn dbl_add(a: &$dblname, b: &$dblname) -> $dblname {
            let mut d = *a;
            bn::add_assign(&mut d.0, &b.0);
            d
        }

        #[inline]
        pub fn dbl_sub(a: &$dblname, b: &$dblname) -> $dblname {
            let mut d = *a;
            bn::sub_assign(&mut d.0, &b.0);
            d
        }

        /// Sum modulo `p*R` of two values in `[0, p*R)`.
        #[inline]
        pub fn dbl_add_mod(a: &$dblname, b: &$dblname) -> $dblname {
            let mut d = *a;
            let cc1 = bn::add_assign(&mut d.0, &b.0);
            let cc2 = bn::sub_assign(&mut d.0[Self::N..], &Self::MODULUS);
            let m = mask(cc2) & !mask(cc1);
            bn::add_assign_masked(&mut d.0[Self::N..], &Self::MODULUS, m);
            d
        }

        /// Difference modulo `p*R` of two values in `[0, p*R)`.
        #[inline]
        pub fn dbl_sub_mod(a: &$dblname, b: &$dblname) -> $dblname {
            let mut d = *a;
            let cc = bn::sub_assign(&mut d.0, &b.0);
            bn::add_assign_masked(&mut d.0[Self::N..], &Self::MODULUS, mask(cc));
            d
        }

        /// Add `p*2^(N*W-2)` to `d`. The operation is exact if the result
        /// fits on `2*N*W-2` bits; the two top bits of `d` are cleared.
        #[inline]
        pub fn dbl_add_quarter_modulus(d: &mut $dblname) {
            let w = &mut d.0[(Self::N - 1)..];
            bn::shl_bits(w, 2);
            bn::add_assign(&mut w[1..], &Self::MODULUS);
            bn::shr_bits(w, 2);
        }

        // Create an element from its digits (little-endian). The value is
        // implicitly reduced modulo p.
        #[inline]
        pub fn from_digits(x: [Digit; Self::N]) -> Self {
            let mut r = Self(x);
            r.set_mul(&Self(Self::R2));
            r
        }

        // Get the canonical value of this element, as digits
        // (little-endian).
        #[inline]
        pub fn to_digits(self) -> [Digit; Self::N] {
            let mut d = $dblname::ZERO;
            d.0[..Self::N].copy_from_slice(&self.0);
            Self::reduce(&d).0
        }

        #[inline]
        pub fn from_u64(x: u64) -> Self {
            let mut d = [0 as Digit; Self::N];
            for j in 0..DIGITS_PER_U64 {
                d[j] = limb_digit(x, j);
            }
            Self::from_digits(d)
        }

        #[inline]
        pub fn from_i64(x: i64) -> Self {
            let r = Self::from_u64(x.unsigned_abs());
            Self::select(&r, &-r, (x >> 63) as u32)
        }

        // Equality check (constant-time): returned value is 0xFFFFFFFF on
        // equality, 0 otherwise.
        #[inline]
        pub fn equals(self, rhs: Self) -> u32 {
            let mut r = 0;
            for i in 0..Self::N {
                r |= self.0[i] ^ rhs.0[i];
            }
            ((r | r.wrapping_neg()) >> (DIGIT_BITS - 1)).wrapping_sub(1) as u32
        }

        #[inline]
        pub fn iszero(self) -> u32 {
            self.equals(Self::ZERO)
        }

        // Encode this value into bytes (unsigned little-endian encoding
        // of the value, normalized to [0..p-1], with the same size as
        // the modulus).
        pub fn encode(self) -> [u8; Self::ENC_LEN] {
            let x = self.to_digits();
            let mut d = [0u8; Self::ENC_LEN];
            let mut j = 0;
            for i in 0..Self::N {
                let k = core::cmp::min(DIGIT_BYTES, Self::ENC_LEN - j);
                d[j..(j + k)].copy_from_slice(&x[i].to_le_bytes()[..k]);
                j += k;
            }
            d
        }

        // Decode a value from bytes. The slice length must be exactly
        // `Self::ENC_LEN` and the unsigned little-endian value must be
        // lower than p; otherwise, `None` is returned.
        pub fn decode(buf: &[u8]) -> Option<Self> {
            if buf.len() != Self::ENC_LEN {
                return None;
            }
            let mut x = [0 as Digit; Self::N];
            for (i, chunk) in buf.chunks(DIGIT_BYTES).enumerate() {
                let mut tmp = [0u8; DIGIT_BYTES];
                tmp[..chunk.len()].copy_from_slice(chunk);
                x[i] = Digit::from_le_bytes(tmp);
            }
            let mut t = x;
            if bn::sub_assign(&mut t, &Self::MODULUS) == 0 {
                return None;
            }
            Some(Self::from_digits(x))
        }

        // Get a uniformly random element (rejection sampling).
        pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
            let excess = ((Self::ENC_LEN as u32) << 3) - Self::BITLEN;
            let mut buf = [0u8; Self::ENC_LEN];
            loop {
                rng.fill_bytes(&mut buf);
                buf[Self::ENC_LEN - 1] &= 0xFFu8 >> excess;
                if let Some(x) = Self::decode(&buf) {
                    return x;
                }
            }
        }

        /// Internal representation (Montgomery form).
        #[inline(always)]
        pub fn raw_digits(&self) -> &[Digit; Self::N] {
            &self.0
        }
    }

    impl $dblname {
        pub const ZERO: Self = Self([0; $typename::N << 1]);

        #[inline(always)]
        pub fn from_digits(x: [Digit; $typename::N << 1]) -> Self {
            Self(x)
        }

        #[inline(always)]
        pub fn digits(&self) -> &[Digit; $typename::N << 1] {
            &self.0
        }
    }

    impl BaseField for $typename {
        type Dbl = $dblname;
        type Params = $params;

        const ZERO: Self = $typename::ZERO;
        const ONE: Self = $typename::ONE;
        const N: usize = $typename::N;
        const SPARE_BITS: u32 = $typename::SPARE_BITS;
        const DBL_ZERO: $dblname = $dblname::ZERO;

        #[inline(always)]
        fn from_i64(x: i64) -> Self { $typename::from_i64(x) }

        #[inline(always)]
        fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
            $typename::random(rng)
        }

        #[inline(always)]
        fn equals(self, rhs: Self) -> u32 { $typename::equals(self, rhs) }

        #[inline(always)]
        fn iszero(self) -> u32 { $typename::iszero(self) }

        #[inline(always)]
        fn digits(&self) -> &[Digit] { &self.0 }

        #[inline(always)]
        fn dbl_digits(d: &$dblname) -> &[Digit] { &d.0 }

        #[inline(always)]
        fn modulus() -> &'static [Digit] { &MODULUS_DIGITS }

        #[inline(always)]
        fn add_unreduced(&self, rhs: &Self) -> Self {
            $typename::add_unreduced(self, rhs)
        }

        #[inline(always)]
        fn add_reduced(&self, rhs: &Self) -> Self {
            $typename::add_reduced(self, rhs)
        }

        #[inline(always)]
        fn sub_reduced(&self, rhs: &Self) -> Self {
            $typename::sub_reduced(self, rhs)
        }

        #[inline(always)]
        fn mul_unreduced(&self, rhs: &Self) -> $dblname {
            $typename::mul_unreduced(self, rhs)
        }

        #[inline(always)]
        fn square_unreduced(&self) -> $dblname {
            $typename::square_unreduced(self)
        }

        #[inline(always)]
        fn reduce(d: &$dblname) -> Self { $typename::reduce(d) }

        #[inline(always)]
        fn dbl_add(a: &$dblname, b: &$dblname) -> $dblname {
            $typename::dbl_add(a, b)
        }

        #[inline(always)]
        fn dbl_sub(a: &$dblname, b: &$dblname) -> $dblname {
            $typename::dbl_sub(a, b)
        }

        #[inline(always)]
        fn dbl_add_mod(a: &$dblname, b: &$dblname) -> $dblname {
            $typename::dbl_add_mod(a, b)
        }

        #[inline(always)]
        fn dbl_sub_mod(a: &$dblname, b: &$dblname) -> $dblname {
            $typename::dbl_sub_mod(a, b)
        }

        #[inline(always)]
        fn dbl_add_quarter_modulus(d: &mut $dblname) {
            $typename::dbl_add_quarter_modulus(d)
        }
    }

    impl core::ops::Add<$typename> for $typename {
        type Output = $typename;

        #[inline(always)]
        fn add(self, other: $typename) -> $typename {
            let mut r = self;
            r.set_add(&other);
            r
        }
    }

    impl core::ops::Add<&$typename> for $typename {
        type Output = $typename;

        #[inline(always)]
        fn add(self, other: &$typename) -> $typename {
            let mut r = self;
            r.set_add(other);
            r
        }
    }

    impl core::ops::AddAssign<$typename> for $typename {
        #[inline(always)]
        fn add_assign(&mut self, other: $typename) {
            self.set_add(&other);
        }
    }

    impl core::ops::AddAssign<&$typename> for $typename {
        #[inline(always)]
        fn add_assign(&mut self, other: &$typename) {
            self.set_add(other);
        }
    }

    impl core::ops::Mul<$typename> for $typename {
        type Output = $typename;

        #[inline(always)]
        fn mul(self, other: $typename) -> $typename {
            let mut r = self;
            r.set_mul(&other);
            r
        }
    }

    impl core::ops::Mul<&$typename> for $typename {
        type Output = $typename;

        #[inline(always)]
        fn mul(self, other: &$typename) -> $typename {
            let mut r = self;
            r.set_mul(other);
            r
        }
    }

    impl core::ops::MulAssign<$typename> for $typename {
        #[inline(always)]
        fn mul_assign(&mut self, other: $typename) {
            self.set_mul(&other);
        }
    }

    impl core::ops::MulAssign<&$typename> for $typename {
        #[inline(always)]
        fn mul_assign(&mut self, other: &$typename) {
            self.set_mul(other);
        }
    }

    impl core::ops::Neg for $typename {
        type Output = $typename;

        #[inline(always)]
        fn neg(self) -> $typename {
            let mut r = self;
            r.set_neg();
            r
        }
    }

    impl core::ops::Neg for &$typename {
        type Output = $typename;

        #[inline(always)]
        fn neg(self) -> $typename {
            let mut r = *self;
            r.set_neg();
            r
        }
    }

    impl core::ops::Sub<$typename> for $typename {
        type Output = $typename;

        #[inline(always)]
        fn sub(self, other: $typename) -> $typename {
            let mut r = self;
            r.set_sub(&other);
            r
        }
    }

    impl core::ops::Sub<&$typename> for $typename {
        type Output = $typename;

        #[inline(always)]
        fn sub(self, other: &$typename) -> $typename {
            let mut r = self;
            r.set_sub(other);
            r
        }
    }

    impl core::ops::SubAssign<$typename> for $typename {
        #[inline(always)]
        fn sub_assign(&mut self, other: $typename) {
            self.set_sub(&other);
        }
    }

    impl core::ops::SubAssign<&$typename> for $typename {
        #[inline(always)]
        fn sub_assign(&mut self, other: &$typename) {
            self.set_sub(other);
        }
    }

    } // end of module
} } // End of macro: define_fp

pub use define_fp;

// ========================================================================

#[macro_export]
macro_rules! define_fp_tests { ($typename:ident, $dblname:ident, $submod:ident) => {

    #[cfg(test)]
    mod $submod {

    use super::{$typename, $dblname};
    use $crate::backend::{Digit, DIGIT_BITS};
    use $crate::testutil::{to_big, mkrnd_digits, TestRng};
    use num_bigint::BigUint;

    fn zp() -> BigUint {
        to_big(&$typename::MODULUS)
    }

    fn zr() -> BigUint {
        BigUint::from(1u32) << ($typename::N * (DIGIT_BITS as usize))
    }

    fn val(a: $typename) -> BigUint {
        to_big(&a.to_digits())
    }

    #[test]
    fn constants() {
        let zp = zp();
        assert!(zp.bits() as u32 == $typename::BITLEN);
        assert!(val($typename::ZERO) == BigUint::from(0u32));
        assert!(val($typename::ONE) == BigUint::from(1u32));
        assert!(to_big($typename::ONE.raw_digits()) == zr() % &zp);
        assert!($typename::ZERO.iszero() == 0xFFFFFFFF);
        assert!($typename::ONE.iszero() == 0);
    }

    #[test]
    fn ops() {
        let zp = zp();
        let mut rng = TestRng::new(0x5EED);
        for _ in 0..200 {
            let a = $typename::random(&mut rng);
            let b = $typename::random(&mut rng);
            let za = val(a);
            let zb = val(b);
            assert!(za < zp && zb < zp);

            assert!(val(a + b) == (&za + &zb) % &zp);
            assert!(val(a - b) == (&zp + &za - &zb) % &zp);
            assert!(val(-a) == (&zp - &za) % &zp);
            assert!(val(a * b) == (&za * &zb) % &zp);
            assert!(val(a.square()) == (&za * &za) % &zp);

            let mut c = a;
            c += b;
            c -= a;
            c *= a;
            assert!(c.equals(b * a) == 0xFFFFFFFF);
            assert!(c.equals(b * a + $typename::ONE) == 0);

            let enc = a.encode();
            assert!(BigUint::from_bytes_le(&enc) == za);
            let d = $typename::decode(&enc).unwrap();
            assert!(d.equals(a) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn unreduced() {
        let zp = zp();
        let zr = zr();
        let zpr = &zp * &zr;
        let mut rng = TestRng::new(0xD0B1);
        for _ in 0..200 {
            let a = $typename::random(&mut rng);
            let b = $typename::random(&mut rng);
            let c = $typename::random(&mut rng);
            let ra = to_big(a.raw_digits());
            let rb = to_big(b.raw_digits());
            let rc = to_big(c.raw_digits());

            let d = a.mul_unreduced(&b);
            assert!(to_big(d.digits()) == &ra * &rb);
            let e = c.square_unreduced();
            assert!(to_big(e.digits()) == &rc * &rc);

            // reduce() divides by R.
            let r = $typename::reduce(&d);
            assert!((to_big(r.raw_digits()) * &zr) % &zp == (&ra * &rb) % &zp);
            assert!(r.equals(a * b) == 0xFFFFFFFF);

            let s = $typename::dbl_add(&d, &e);
            assert!(to_big(s.digits()) == &ra * &rb + &rc * &rc);
            let s = $typename::dbl_sub(&d, &e);
            if ra.clone() * &rb >= rc.clone() * &rc {
                assert!(to_big(s.digits()) == &ra * &rb - &rc * &rc);
            }
            let s = $typename::dbl_add_mod(&d, &e);
            assert!(to_big(s.digits()) == (&ra * &rb + &rc * &rc) % &zpr);
            let s = $typename::dbl_sub_mod(&d, &e);
            assert!(to_big(s.digits()) == (&zpr + &ra * &rb - &rc * &rc) % &zpr);

            let sum = a.add_unreduced(&b);
            assert!(to_big(sum.raw_digits()) == &ra + &rb);

            // Exact only while the sum fits on 2*N*W-2 bits; with a single
            // spare bit, large products do not.
            let qw = &ra * &rb + (&zp << ($typename::N * (DIGIT_BITS as usize) - 2));
            if qw.bits() as usize <= 2 * $typename::N * (DIGIT_BITS as usize) - 2 {
                let mut q = d;
                $typename::dbl_add_quarter_modulus(&mut q);
                assert!(to_big(q.digits()) == qw);
                assert!($typename::reduce(&q).equals(a * b) == 0xFFFFFFFF);
            }
        }
    }

    #[test]
    fn dbl_bounds() {
        // Values close to p*R exercise the corrections.
        let zp = zp();
        let zpr = &zp * zr();
        let n = $typename::N;
        let mut top = [0 as Digit; $typename::N << 1];
        for i in 0..n {
            top[i] = Digit::MAX;
            top[n + i] = $typename::MODULUS[i];
        }
        top[n] -= 1;
        let x = $dblname::from_digits(top);
        let zx = to_big(x.digits());
        assert!(zx == zpr.clone() - 1u32);

        let s = $typename::dbl_add_mod(&x, &x);
        assert!(to_big(s.digits()) == (&zx + &zx) % &zpr);
        let mut small = [0 as Digit; $typename::N << 1];
        mkrnd_digits(&mut small[..n], 11);
        let y = $dblname::from_digits(small);
        let s = $typename::dbl_sub_mod(&y, &x);
        assert!(to_big(s.digits()) == (&zpr + to_big(&small) - &zx) % &zpr);
        let r = $typename::reduce(&x);
        assert!(to_big(&r.to_digits()) < zp);
    }

    #[test]
    fn conversions() {
        let a = $typename::from_i64(-7);
        let b = $typename::from_u64(7);
        assert!((a + b).iszero() == 0xFFFFFFFF);
        assert!(val(b) == BigUint::from(7u32));
        let m = (BigUint::from(1u64) << 63) % zp();
        assert!(val($typename::from_i64(i64::MIN)) == (zp() - m) % zp());

        let mut x = [0 as Digit; $typename::N];
        mkrnd_digits(&mut x, 3);
        let a = $typename::from_digits(x);
        assert!(val(a) == to_big(&x) % zp());

        // p itself is not a valid encoding; neither is a short slice.
        let mut buf = [0u8; $typename::ENC_LEN];
        buf.copy_from_slice(&$typename::ZERO.sub_reduced(&$typename::ONE).encode());
        buf[0] = buf[0].wrapping_add(1);
        assert!($typename::decode(&buf).is_none());
        assert!($typename::decode(&buf[1..]).is_none());
    }

    #[test]
    fn random_distinct() {
        let mut rng = TestRng::new(77);
        let a = $typename::random(&mut rng);
        let b = $typename::random(&mut rng);
        assert!(a.equals(b) == 0);
    }

    }
} } // End of macro: define_fp_tests

pub use define_fp_tests;
