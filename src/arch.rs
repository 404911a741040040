//! Architecture layer.
//!
//! This module provides the two CPU-dependent services used by the rest
//! of the library and by benchmarks:
//!
//!  - A leading-zero count. Hardware support (LZCNT on x86, CLZ on
//!    aarch64) is used when available; otherwise a portable routine with
//!    no data-dependent branches is used. Note that `u64::leading_zeros()`
//!    cannot be used blindly: on x86 without LZCNT it compiles to a BSR
//!    opcode plus an explicit test and conditional jump for the zero
//!    input, which is not constant-time.
//!
//!  - A cycle counter (`cycles()`), for benchmarking only.
//!
//! The choice of leading-zero count is captured in an `Arch` value,
//! produced by a capability probe. With the `std` feature, `init()` runs
//! the probe once (later calls return the same value); the value is never
//! modified afterwards, so arithmetic code may read it from any thread.
//! Without `std`, runtime detection is unavailable and the probe relies on
//! the compile-time target features.

use crate::backend::{Digit, DIGIT_BITS};

/// Selected implementations of the CPU-dependent primitives.
#[derive(Clone, Copy, Debug)]
pub struct Arch {
    lzcnt32: fn(u32) -> u32,
    lzcnt64: fn(u64) -> u32,
    hardware: bool,
}

impl Arch {

    /// Get the portable implementations (no hardware support assumed).
    pub fn portable() -> Self {
        Self {
            lzcnt32: lzcnt32_soft,
            lzcnt64: lzcnt64_soft,
            hardware: false,
        }
    }

    /// Probe the current CPU and select the best implementations.
    pub fn probe() -> Self {
        #[cfg(any(
            target_arch = "x86",
            target_arch = "x86_64",
            target_arch = "aarch64",
        ))]
        {
            if has_lzcnt_hard() {
                return Self {
                    lzcnt32: lzcnt32_hard,
                    lzcnt64: lzcnt64_hard,
                    hardware: true,
                };
            }
        }
        Self::portable()
    }

    /// Returns `true` if the leading-zero count uses a hardware opcode.
    pub fn has_hardware_lzcnt(&self) -> bool {
        self.hardware
    }

    /// Number of leading zeros in a 32-bit word (32 for zero).
    #[inline(always)]
    pub fn lzcnt32(&self, x: u32) -> u32 {
        (self.lzcnt32)(x)
    }

    /// Number of leading zeros in a 64-bit word (64 for zero).
    #[inline(always)]
    pub fn lzcnt64(&self, x: u64) -> u32 {
        (self.lzcnt64)(x)
    }

    /// Number of leading zeros in a digit, counted over the configured
    /// digit width (`DIGIT_BITS` for zero).
    #[inline(always)]
    pub fn leading_zero_count(&self, x: Digit) -> u32 {
        if DIGIT_BITS == 32 {
            self.lzcnt32(x as u32)
        } else {
            self.lzcnt64(x as u64)
        }
    }
}

#[cfg(feature = "std")]
static ARCH: std::sync::OnceLock<Arch> = std::sync::OnceLock::new();

/// Initialize the architecture layer (if not already done) and return
/// the selected implementations.
///
/// With the `std` feature, the probe runs at most once per process.
pub fn init() -> Arch {
    #[cfg(feature = "std")]
    {
        *ARCH.get_or_init(|| {
            let arch = Arch::probe();
            tracing::debug!(
                hardware_lzcnt = arch.hardware,
                digit_bits = DIGIT_BITS,
                "architecture layer initialized");
            arch
        })
    }

    #[cfg(not(feature = "std"))]
    {
        Arch::probe()
    }
}

/// Number of leading zeros in a digit, counted over the configured digit
/// width, using the implementation selected by `init()`.
#[inline]
pub fn leading_zero_count(x: Digit) -> u32 {
    init().leading_zero_count(x)
}

// ========================================================================
// Capability probe and hardware leading-zero count.

#[cfg(all(
    feature = "std",
    any(target_arch = "x86", target_arch = "x86_64"),
))]
fn has_lzcnt_hard() -> bool {
    std::is_x86_feature_detected!("lzcnt")
}

#[cfg(all(
    not(feature = "std"),
    any(target_arch = "x86", target_arch = "x86_64"),
))]
fn has_lzcnt_hard() -> bool {
    cfg!(target_feature = "lzcnt")
}

// CLZ is part of the base aarch64 instruction set.
#[cfg(target_arch = "aarch64")]
fn has_lzcnt_hard() -> bool {
    true
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[target_feature(enable = "lzcnt")]
unsafe fn lzcnt32_lzcnt(x: u32) -> u32 {
    x.leading_zeros()
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[target_feature(enable = "lzcnt")]
unsafe fn lzcnt64_lzcnt(x: u64) -> u32 {
    x.leading_zeros()
}

// These two are installed by Arch::probe() only after the probe has
// confirmed LZCNT support.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn lzcnt32_hard(x: u32) -> u32 {
    unsafe { lzcnt32_lzcnt(x) }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn lzcnt64_hard(x: u64) -> u32 {
    unsafe { lzcnt64_lzcnt(x) }
}

#[cfg(target_arch = "aarch64")]
fn lzcnt32_hard(x: u32) -> u32 {
    x.leading_zeros()
}

#[cfg(target_arch = "aarch64")]
fn lzcnt64_hard(x: u64) -> u32 {
    x.leading_zeros()
}

// ========================================================================
// Portable leading-zero count.

// Return 0xFFFFFFFFFFFFFFFF if x >= 0x8000000000000000, 0 otherwise
// (i.e. take the sign bit of the signed interpretation, and expand it
// to 64 bits).
#[inline(always)]
const fn sgnw64(x: u64) -> u64 {
    ((x as i64) >> 63) as u64
}

#[inline(always)]
const fn sgnw32(x: u32) -> u32 {
    ((x as i32) >> 31) as u32
}

/// Portable, constant-time count of leading zeros in a 64-bit word.
pub const fn lzcnt64_soft(x: u64) -> u32 {
    let m = sgnw64((x >> 32).wrapping_sub(1));
    let s = m & 32;
    let x = (x >> 32) ^ (m & (x ^ (x >> 32)));

    let m = sgnw64((x >> 16).wrapping_sub(1));
    let s = s | (m & 16);
    let x = (x >> 16) ^ (m & (x ^ (x >> 16)));

    let m = sgnw64((x >>  8).wrapping_sub(1));
    let s = s | (m &  8);
    let x = (x >>  8) ^ (m & (x ^ (x >>  8)));

    let m = sgnw64((x >>  4).wrapping_sub(1));
    let s = s | (m &  4);
    let x = (x >>  4) ^ (m & (x ^ (x >>  4)));

    let m = sgnw64((x >>  2).wrapping_sub(1));
    let s = s | (m &  2);
    let x = (x >>  2) ^ (m & (x ^ (x >>  2)));

    // At this point, x fits on 2 bits. Number of leading zeros is then:
    //   x = 0   -> 2
    //   x = 1   -> 1
    //   x = 2   -> 0
    //   x = 3   -> 0
    let s = s.wrapping_add(2u64.wrapping_sub(x) & ((x.wrapping_sub(3) >> 2)));

    s as u32
}

/// Portable, constant-time count of leading zeros in a 32-bit word.
pub const fn lzcnt32_soft(x: u32) -> u32 {
    let m = sgnw32((x >> 16).wrapping_sub(1));
    let s = m & 16;
    let x = (x >> 16) ^ (m & (x ^ (x >> 16)));

    let m = sgnw32((x >>  8).wrapping_sub(1));
    let s = s | (m &  8);
    let x = (x >>  8) ^ (m & (x ^ (x >>  8)));

    let m = sgnw32((x >>  4).wrapping_sub(1));
    let s = s | (m &  4);
    let x = (x >>  4) ^ (m & (x ^ (x >>  4)));

    let m = sgnw32((x >>  2).wrapping_sub(1));
    let s = s | (m &  2);
    let x = (x >>  2) ^ (m & (x ^ (x >>  2)));

    s.wrapping_add(2u32.wrapping_sub(x) & ((x.wrapping_sub(3) >> 2)))
}

// ========================================================================
// Cycle counter.

/// Read the CPU cycle counter (or the closest monotonic tick counter
/// available in user space). Only differences between two readings are
/// meaningful.
#[cfg(target_arch = "x86")]
pub fn cycles() -> u64 {
    use core::arch::x86::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

/// Read the CPU cycle counter (or the closest monotonic tick counter
/// available in user space). Only differences between two readings are
/// meaningful.
#[cfg(target_arch = "x86_64")]
pub fn cycles() -> u64 {
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    unsafe {
        _mm_lfence();
        _rdtsc()
    }
}

/// Read the CPU cycle counter (or the closest monotonic tick counter
/// available in user space). Only differences between two readings are
/// meaningful.
#[cfg(target_arch = "aarch64")]
pub fn cycles() -> u64 {
    // pmccntr_el0 is usually not readable from user space; the virtual
    // counter always is.
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("isb", "mrs {}, cntvct_el0", out(reg) x);
    }
    x
}

/// Read the CPU cycle counter (or the closest monotonic tick counter
/// available in user space). Only differences between two readings are
/// meaningful.
#[cfg(target_arch = "riscv64")]
pub fn cycles() -> u64 {
    use core::arch::asm;
    let mut x: u64;
    unsafe {
        asm!("rdtime {}", out(reg) x);
    }
    x
}

/// Read a monotonic tick counter (nanoseconds since the first call).
#[cfg(all(
    feature = "std",
    not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "riscv64",
    )),
))]
pub fn cycles() -> u64 {
    use std::time::Instant;
    static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

/// No counter is available on this target without `std`; always 0.
#[cfg(all(
    not(feature = "std"),
    not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "riscv64",
    )),
))]
pub fn cycles() -> u64 {
    0
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::testutil::mkrnd_digits;

    fn ref_lzcnt64(x: u64) -> u32 {
        let mut n = 0;
        for i in (0..64).rev() {
            if ((x >> i) & 1) != 0 {
                break;
            }
            n += 1;
        }
        n
    }

    fn ref_lzcnt32(x: u32) -> u32 {
        ref_lzcnt64(x as u64) - 32
    }

    fn check_arch(arch: &Arch) {
        assert_eq!(arch.lzcnt32(0), 32);
        assert_eq!(arch.lzcnt64(0), 64);
        assert_eq!(arch.leading_zero_count(0), DIGIT_BITS);
        for i in 0..64 {
            let x = 1u64 << i;
            assert_eq!(arch.lzcnt64(x), 63 - i);
            assert_eq!(arch.lzcnt64(x | (x >> 1)), 63 - i);
            assert_eq!(arch.lzcnt64((x << 1).wrapping_sub(1)), 63 - i);
        }
        for i in 0..32 {
            let x = 1u32 << i;
            assert_eq!(arch.lzcnt32(x), 31 - i);
            assert_eq!(arch.lzcnt32((x << 1).wrapping_sub(1)), 31 - i);
        }
        let mut d = [0 as Digit; 256];
        mkrnd_digits(&mut d, 0x1257);
        for (k, &w) in d.iter().enumerate() {
            // Vary the bit length of the samples.
            let w = w >> (k as u32 % DIGIT_BITS);
            if w == 0 {
                continue;
            }
            assert_eq!(arch.lzcnt64(w as u64), ref_lzcnt64(w as u64));
            assert_eq!(arch.lzcnt32(w as u32 | 1), ref_lzcnt32(w as u32 | 1));
            assert_eq!(arch.leading_zero_count(w),
                ref_lzcnt64(w as u64) - (64 - DIGIT_BITS));
        }
    }

    #[test]
    fn lzcnt_portable() {
        check_arch(&Arch::portable());
        assert!(!Arch::portable().has_hardware_lzcnt());
    }

    #[test]
    fn lzcnt_probed() {
        check_arch(&Arch::probe());
        let a = init();
        let b = init();
        assert_eq!(a.has_hardware_lzcnt(), b.has_hardware_lzcnt());
        check_arch(&a);
        assert_eq!(leading_zero_count(1), DIGIT_BITS - 1);
    }

    #[test]
    fn cycles_monotonic() {
        let t0 = cycles();
        let t1 = cycles();
        assert!(t1 >= t0);
    }
}
