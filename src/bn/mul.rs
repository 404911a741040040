//! Comba multiplication of two equal-length digit sequences.

use crate::backend::{Digit, addcarry, umull};

// (r0, r1, r2) += x*y
#[inline(always)]
fn comba_step(r: (Digit, Digit, Digit), x: Digit, y: Digit)
    -> (Digit, Digit, Digit)
{
    let (r0, r1, r2) = r;
    let (lo, hi) = umull(x, y);
    let (r0, cc) = addcarry(r0, lo, 0);
    let (r1, cc) = addcarry(r1, hi, cc);
    (r0, r1, r2.wrapping_add(cc as Digit))
}

/// Compute the product of `a` and `b` into `c`.
///
/// `a` and `b` MUST have the same non-zero length, and `c` MUST have
/// twice that length. The previous contents of `c` are ignored.
pub fn mul(c: &mut [Digit], a: &[Digit], b: &[Digit]) {
    let size = a.len();
    debug_assert!(size >= 1);
    debug_assert!(b.len() == size);
    debug_assert!(c.len() == size << 1);

    let mut r = (0, 0, 0);
    for i in 0..size {
        for j in 0..=i {
            r = comba_step(r, a[j], b[i - j]);
        }
        c[i] = r.0;
        r = (r.1, r.2, 0);
    }

    // Column size - 1 + i gathers the pairs (j, size - 1 + i - j) for
    // j in i..size.
    for i in 1..size {
        for j in i..size {
            r = comba_step(r, a[j], b[size - 1 + i - j]);
        }
        c[size - 1 + i] = r.0;
        r = (r.1, r.2, 0);
    }
    c[(size << 1) - 1] = r.0;
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::testutil::{to_big, mkrnd_digits};

    #[test]
    fn mul_random() {
        for size in 1..=24 {
            for k in 0..20 {
                let mut a = [0 as Digit; 24];
                let mut b = [0 as Digit; 24];
                let mut c = [0 as Digit; 48];
                mkrnd_digits(&mut a[..size], ((size as u64) << 20) + 2 * k);
                mkrnd_digits(&mut b[..size], ((size as u64) << 20) + 2 * k + 1);
                if k == 0 {
                    for i in 0..size {
                        a[i] = !0;
                        b[i] = !0;
                    }
                }
                mul(&mut c[..(size << 1)], &a[..size], &b[..size]);
                assert!(to_big(&c[..(size << 1)])
                    == to_big(&a[..size]) * to_big(&b[..size]));
            }
        }
    }

    #[test]
    fn mul_matches_square() {
        for size in 1..=12 {
            let mut a = [0 as Digit; 12];
            let mut c = [0 as Digit; 24];
            let mut d = [0 as Digit; 24];
            mkrnd_digits(&mut a[..size], 0xA11CE + size as u64);
            mul(&mut c[..(size << 1)], &a[..size], &a[..size]);
            super::super::square(&mut d[..(size << 1)], &a[..size]);
            assert!(c == d);
        }
    }
}
