// 64-bit digits. All multi-precision code in the crate is written against
// the `Digit` alias and the primitives below; the w32 backend provides the
// same names for 32-bit digits.

/// A single digit of a multi-precision integer.
pub type Digit = u64;

/// A value wide enough to hold the product of two digits.
pub(crate) type DoubleDigit = u128;

/// Digit width, in bits.
pub const DIGIT_BITS: u32 = 64;

// Carrying addition and subtraction should use u64::carrying_add()
// and u64::borrowing_sub(), but these functions are currently only
// experimental.

// Add with carry; carry is 0 or 1.
// (x, y, c_in) -> x + y + c_in mod 2^64, c_out

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn addcarry(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    use core::arch::x86_64::_addcarry_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _addcarry_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub const fn addcarry(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    let z = (x as DoubleDigit).wrapping_add(y as DoubleDigit)
        .wrapping_add(c as DoubleDigit);
    (z as Digit, (z >> 64) as u8)
}

// Subtract with borrow; borrow is 0 or 1.
// (x, y, c_in) -> x - y - c_in mod 2^64, c_out

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn subborrow(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    use core::arch::x86_64::_subborrow_u64;
    unsafe {
        let mut d = 0u64;
        let cc = _subborrow_u64(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline(always)]
pub const fn subborrow(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    let z = (x as DoubleDigit).wrapping_sub(y as DoubleDigit)
        .wrapping_sub(c as DoubleDigit);
    (z as Digit, (z >> 127) as u8)
}

// Compute x*y over 128 bits, returned as two digits (lo, hi).
#[inline(always)]
pub const fn umull(x: Digit, y: Digit) -> (Digit, Digit) {
    let z = (x as DoubleDigit) * (y as DoubleDigit);
    (z as Digit, (z >> 64) as Digit)
}

// Compute x*y+z1+z2 over 128 bits, returned as two digits (lo, hi).
// This cannot overflow: (2^64-1)^2 + 2*(2^64-1) = 2^128-1.
#[inline(always)]
pub const fn umull_add2(x: Digit, y: Digit, z1: Digit, z2: Digit)
    -> (Digit, Digit)
{
    let t = ((x as DoubleDigit) * (y as DoubleDigit))
        .wrapping_add(z1 as DoubleDigit).wrapping_add(z2 as DoubleDigit);
    (t as Digit, (t >> 64) as Digit)
}

// Return -1/x mod 2^64. It is assumed that x is odd.
pub const fn ninv(x: Digit) -> Digit {
    let y = 2u64.wrapping_sub(x);
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u64.wrapping_sub(y.wrapping_mul(x)));
    y.wrapping_neg()
}

// Split a 64-bit limb into digits (little-endian). With 64-bit digits
// this is the identity.
pub const DIGITS_PER_U64: usize = 1;

#[inline(always)]
pub const fn limb_digit(x: u64, _j: usize) -> Digit {
    x
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn carries() {
        assert_eq!(addcarry(u64::MAX, 1, 0), (0, 1));
        assert_eq!(addcarry(u64::MAX, u64::MAX, 1), (u64::MAX, 1));
        assert_eq!(addcarry(5, 7, 1), (13, 0));
        assert_eq!(subborrow(0, 1, 0), (u64::MAX, 1));
        assert_eq!(subborrow(0, u64::MAX, 1), (0, 1));
        assert_eq!(subborrow(9, 4, 1), (4, 0));
        assert_eq!(umull(u64::MAX, u64::MAX), (1, u64::MAX - 1));
        assert_eq!(umull_add2(u64::MAX, u64::MAX, u64::MAX, u64::MAX),
            (u64::MAX, u64::MAX));
    }

    #[test]
    fn inverse() {
        for &x in [1u64, 3, 0x1FFFFFFFFFFFFFFF, 0xD87CFD47_3C208C16].iter() {
            let x = x | 1;
            assert_eq!(x.wrapping_mul(ninv(x)), u64::MAX);
        }
    }
}
