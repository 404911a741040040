// 32-bit digits. Same interface as the w64 backend.

/// A single digit of a multi-precision integer.
pub type Digit = u32;

/// A value wide enough to hold the product of two digits.
pub(crate) type DoubleDigit = u64;

/// Digit width, in bits.
pub const DIGIT_BITS: u32 = 32;

// Carrying addition and subtraction should use u32::carrying_add()
// and u32::borrowing_sub(), but these functions are currently only
// experimental.

// Add with carry; carry is 0 or 1.
// (x, y, c_in) -> x + y + c_in mod 2^32, c_out

#[cfg(target_arch = "x86")]
#[inline(always)]
pub fn addcarry(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    use core::arch::x86::_addcarry_u32;
    unsafe {
        let mut d = 0u32;
        let cc = _addcarry_u32(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86"))]
#[inline(always)]
pub const fn addcarry(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    let z = (x as DoubleDigit).wrapping_add(y as DoubleDigit)
        .wrapping_add(c as DoubleDigit);
    (z as Digit, (z >> 32) as u8)
}

// Subtract with borrow; borrow is 0 or 1.
// (x, y, c_in) -> x - y - c_in mod 2^32, c_out

#[cfg(target_arch = "x86")]
#[inline(always)]
pub fn subborrow(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    use core::arch::x86::_subborrow_u32;
    unsafe {
        let mut d = 0u32;
        let cc = _subborrow_u32(c, x, y, &mut d);
        (d, cc)
    }
}

#[cfg(not(target_arch = "x86"))]
#[inline(always)]
pub const fn subborrow(x: Digit, y: Digit, c: u8) -> (Digit, u8) {
    let z = (x as DoubleDigit).wrapping_sub(y as DoubleDigit)
        .wrapping_sub(c as DoubleDigit);
    (z as Digit, (z >> 63) as u8)
}

// Compute x*y over 64 bits, returned as two digits (lo, hi).
#[inline(always)]
pub const fn umull(x: Digit, y: Digit) -> (Digit, Digit) {
    let z = (x as DoubleDigit) * (y as DoubleDigit);
    (z as Digit, (z >> 32) as Digit)
}

// Compute x*y+z1+z2 over 64 bits, returned as two digits (lo, hi).
#[inline(always)]
pub const fn umull_add2(x: Digit, y: Digit, z1: Digit, z2: Digit)
    -> (Digit, Digit)
{
    let t = ((x as DoubleDigit) * (y as DoubleDigit))
        .wrapping_add(z1 as DoubleDigit).wrapping_add(z2 as DoubleDigit);
    (t as Digit, (t >> 32) as Digit)
}

// Return -1/x mod 2^32. It is assumed that x is odd.
pub const fn ninv(x: Digit) -> Digit {
    let y = 2u32.wrapping_sub(x);
    let y = y.wrapping_mul(2u32.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u32.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u32.wrapping_sub(y.wrapping_mul(x)));
    let y = y.wrapping_mul(2u32.wrapping_sub(y.wrapping_mul(x)));
    y.wrapping_neg()
}

// Split a 64-bit limb into digits (little-endian).
pub const DIGITS_PER_U64: usize = 2;

#[inline(always)]
pub const fn limb_digit(x: u64, j: usize) -> Digit {
    (x >> (32 * j)) as Digit
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn carries() {
        assert_eq!(addcarry(u32::MAX, 1, 0), (0, 1));
        assert_eq!(addcarry(u32::MAX, u32::MAX, 1), (u32::MAX, 1));
        assert_eq!(subborrow(0, 1, 0), (u32::MAX, 1));
        assert_eq!(subborrow(0, u32::MAX, 1), (0, 1));
        assert_eq!(umull(u32::MAX, u32::MAX), (1, u32::MAX - 1));
        assert_eq!(umull_add2(u32::MAX, u32::MAX, u32::MAX, u32::MAX),
            (u32::MAX, u32::MAX));
    }

    #[test]
    fn inverse() {
        for &x in [1u32, 3, 0x7CFD47, 0xD87CFD47].iter() {
            assert_eq!(x.wrapping_mul(ninv(x)), u32::MAX);
        }
    }
}
