//! Comba squaring.
//!
//! The full squaring produces one column of the result per iteration,
//! keeping a running three-digit accumulator `(r0, r1, r2)`: each cross
//! product `a[j]*a[k]` with `j < k` is added twice, each diagonal product
//! `a[j]*a[j]` once. Once a column is complete, `r0` is emitted and the
//! accumulator is shifted down by one digit.
//!
//! The accumulate variant adds a single "row" of a schoolbook squaring
//! into an existing buffer; it is the building block of `square_rows()`.
//!
//! Overflows are detected by comparing a wrapped sum with one of its
//! operands (the sum wrapped if and only if it is lower than the operand).
//! A digit product `x*y` has a high digit of at most `2^W - 2`, which is
//! what makes the doubling overflow detectable that way.

use crate::backend::{Digit, umull};

// (r0, r1, r2) += 2*x*y
#[inline(always)]
fn comba_step_sqr(r: (Digit, Digit, Digit), x: Digit, y: Digit)
    -> (Digit, Digit, Digit)
{
    let (r0, r1, r2) = r;
    let (p0, p1) = umull(x, y);

    // 2*x*y = s2:s1:s0; s2 is the bit lost when doubling the high digit.
    let s0 = p0.wrapping_add(p0);
    let s1 = p1.wrapping_add(p1).wrapping_add((s0 < p0) as Digit);
    let s2 = (s1 < p1) as Digit;

    let t = r1;
    let r0 = r0.wrapping_add(s0);
    let r1 = r1.wrapping_add((r0 < s0) as Digit);
    let r2 = r2.wrapping_add((r1 < t) as Digit);
    let r1 = r1.wrapping_add(s1);
    let r2 = r2.wrapping_add((r1 < s1) as Digit).wrapping_add(s2);
    (r0, r1, r2)
}

// (r0, r1, r2) += x*x
#[inline(always)]
fn comba_final(r: (Digit, Digit, Digit), x: Digit) -> (Digit, Digit, Digit) {
    let (r0, r1, r2) = r;
    let (p0, p1) = umull(x, x);

    let t = r1;
    let r0 = r0.wrapping_add(p0);
    let r1 = r1.wrapping_add((r0 < p0) as Digit);
    let r2 = r2.wrapping_add((r1 < t) as Digit);
    let r1 = r1.wrapping_add(p1);
    let r2 = r2.wrapping_add((r1 < p1) as Digit);
    (r0, r1, r2)
}

/// Compute the square of `a` into `c`.
///
/// `a` MUST be non-empty and `c` MUST have length exactly `2*a.len()`.
/// The previous contents of `c` are ignored. The output is the exact
/// square of the integer represented by `a`.
pub fn square(c: &mut [Digit], a: &[Digit]) {
    let size = a.len();
    debug_assert!(size >= 1);
    debug_assert!(c.len() == size << 1);

    let mut r = (0, 0, 0);

    // Low half: column i gathers the pairs (j, i - j) with j < i - j,
    // and the diagonal term a[i/2]^2 when i is even.
    for i in 0..size {
        for j in 0..((i + 1) >> 1) {
            r = comba_step_sqr(r, a[j], a[i - j]);
        }
        if (i & 1) == 0 {
            r = comba_final(r, a[i >> 1]);
        }
        c[i] = r.0;
        r = (r.1, r.2, 0);
    }

    // High half: column size + i gathers the pairs (i + 1 + j, size - 1 - j),
    // and the diagonal term when size + i is even.
    for i in 0..size {
        let n = (size - 1 - i) >> 1;
        for j in 0..n {
            r = comba_step_sqr(r, a[i + 1 + j], a[size - 1 - j]);
        }
        if ((size - i) & 1) == 0 {
            r = comba_final(r, a[i + 1 + n]);
        }
        c[size + i] = r.0;
        r = (r.1, r.2, 0);
    }
}

/// Add one row of a schoolbook squaring into `c`.
///
/// With `size = a.len()` (at least 1), `c` MUST have length `size + 1`:
/// the last digit is a guard digit that receives the top of the row. The
/// value added is:
///
/// ```text
///     a[0]^2 + 2 * a[0] * (a[1]*W + a[2]*W^2 + ... + a[size-1]*W^(size-1))
/// ```
///
/// The part of the sum that does not fit in `c` is returned; it has
/// weight `W^(size+1)` and must be folded by the caller into the next
/// digit of the enclosing buffer. The returned value is at most 2.
///
/// Two carry registers are kept across digits: `c0`, a full digit, and
/// `c1`, the carry of the carry (0 or 1). A single extra digit is not
/// enough, since adding the doubled product, the pending carry and the
/// existing buffer digit may exceed `2*W^2`.
pub fn square_accumulate(c: &mut [Digit], a: &[Digit]) -> Digit {
    let size = a.len();
    debug_assert!(size >= 1);
    debug_assert!(c.len() == size + 1);

    // Diagonal term.
    let t = a[0];
    let (p0, p1) = umull(t, t);
    let r0 = p0.wrapping_add(c[0]);
    let r1 = p1.wrapping_add((r0 < p0) as Digit);
    c[0] = r0;

    let mut c0 = r1;
    let mut c1: Digit = 0;

    for i in 1..size {
        let (p0, p1) = umull(t, a[i]);
        let r0 = p0.wrapping_add(p0);
        let r1 = p1.wrapping_add(p1).wrapping_add((r0 < p0) as Digit);

        // Add the pending carry.
        let s0 = r0.wrapping_add(c0);
        let s1 = r1.wrapping_add((s0 < r0) as Digit);

        // Add the existing buffer digit.
        let t0 = s0.wrapping_add(c[i]);
        let t1 = s1.wrapping_add((t0 < s0) as Digit);
        c[i] = t0;

        // The old carry of the carry joins the next carry; at most one
        // of the four overflows below can happen for a given digit.
        let nc0 = t1.wrapping_add(c1);
        c1 = ((t1 < s1) | (s1 < r1) | (r1 < p1) | (nc0 < c1)) as Digit;
        c0 = nc0;
    }

    c[size] = c[size].wrapping_add(c0);
    c1 + ((c[size] < c0) as Digit)
}

/// Compute the square of `a` into `c` row by row, with one call to
/// `square_accumulate()` per digit of `a`.
///
/// Same contract as `square()`: `a` non-empty, `c.len() == 2*a.len()`.
/// This is the schoolbook counterpart of the column-wise Comba squaring;
/// both yield the same output.
pub fn square_rows(c: &mut [Digit], a: &[Digit]) {
    let size = a.len();
    debug_assert!(size >= 1);
    debug_assert!(c.len() == size << 1);

    super::zero(c);

    // Row i covers c[2*i..=i+size] (guard digit included); its overflow
    // lands on c[i+size+1], which no previous row has touched and which
    // is the guard digit of the next row.
    for i in 0..size {
        let cc = square_accumulate(&mut c[(i << 1)..(i + size + 1)], &a[i..]);
        if i + size + 1 < (size << 1) {
            c[i + size + 1] = cc;
        } else {
            debug_assert!(cc == 0);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::backend::DIGIT_BITS;
    use crate::testutil::{to_big, mkrnd_digits};
    use num_bigint::BigUint;

    fn check_square(a: &[Digit]) {
        let za = to_big(a);
        let zs = &za * &za;

        let mut c = [0 as Digit; 64];
        let c = &mut c[..(a.len() << 1)];
        for w in c.iter_mut() {
            *w = 0x5A5A5A5A as Digit;
        }
        square(c, a);
        assert!(to_big(c) == zs);

        for w in c.iter_mut() {
            *w = !0;
        }
        square_rows(c, a);
        assert!(to_big(c) == zs);
    }

    fn check_accumulate(prior: &[Digit], a: &[Digit]) {
        let size = a.len();
        let mut c = [0 as Digit; 33];
        let c = &mut c[..(size + 1)];
        c.copy_from_slice(prior);

        let za = to_big(a);
        let a0 = BigUint::from(a[0]);
        let rest = (&za - &a0) >> (DIGIT_BITS as usize);
        let row = &a0 * &a0 + ((&a0 * &rest) << (1 + DIGIT_BITS as usize));
        let expected = to_big(prior) + row;

        let cc = square_accumulate(c, a);
        assert!(cc <= 2);
        let zw = BigUint::from(1u32) << ((size + 1) * DIGIT_BITS as usize);
        assert!(to_big(c) + BigUint::from(cc) * zw == expected);
    }

    #[test]
    fn square_random() {
        for size in 1..=32 {
            for k in 0..20 {
                let mut a = [0 as Digit; 32];
                let a = &mut a[..size];
                mkrnd_digits(a, ((size as u64) << 16) + k);
                check_square(a);
            }
        }
    }

    #[test]
    fn square_edges() {
        for size in 1..=32 {
            let a = [!(0 as Digit); 32];
            check_square(&a[..size]);
            let a = [0 as Digit; 32];
            check_square(&a[..size]);
            let mut a = [0 as Digit; 32];
            a[size - 1] = !0;
            check_square(&a[..size]);
            let mut a = [!(0 as Digit); 32];
            a[0] = 1;
            check_square(&a[..size]);
        }
    }

    #[test]
    fn accumulate() {
        for size in 1..=32 {
            // All-ones content everywhere maximizes both carry registers.
            let prior = [!(0 as Digit); 33];
            let a = [!(0 as Digit); 32];
            check_accumulate(&prior[..(size + 1)], &a[..size]);

            let prior = [0 as Digit; 33];
            check_accumulate(&prior[..(size + 1)], &a[..size]);

            for k in 0..20 {
                let mut prior = [0 as Digit; 33];
                let mut a = [0 as Digit; 32];
                mkrnd_digits(&mut prior[..(size + 1)], (1 << 40) + ((size as u64) << 16) + k);
                mkrnd_digits(&mut a[..size], (1 << 41) + ((size as u64) << 16) + k);
                check_accumulate(&prior[..(size + 1)], &a[..size]);
            }
        }
    }

    #[test]
    fn accumulate_overflow() {
        // Guard digit and row both at their maximum: the returned overflow
        // digit is exercised, and must be reproduced exactly.
        let prior = [!(0 as Digit); 2];
        let a = [!(0 as Digit)];
        let mut c = prior;
        let cc = square_accumulate(&mut c, &a);
        // (W^2 - 1) + (W - 1)^2 = W^2 + (W^2 - 2W) = 1*W^2 + (W - 2)*W + 0
        assert_eq!(cc, 1);
        assert_eq!(c, [0, !(0 as Digit) - 1]);
    }
}
