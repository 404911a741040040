// Helpers shared by the unit tests: conversion of digit sequences to
// arbitrary-precision integers (the reference arithmetic), and
// deterministic pseudo-random inputs derived from SHA-256.

use std::vec;
use std::vec::Vec;
use core::convert::TryFrom;

use num_bigint::BigUint;
use sha2::{Sha256, Digest};

use crate::backend::{Digit, DIGIT_BYTES};
use crate::{CryptoRng, RngCore, RngError};

pub(crate) fn to_big(a: &[Digit]) -> BigUint {
    let mut buf = Vec::with_capacity(a.len() * DIGIT_BYTES);
    for w in a.iter() {
        buf.extend_from_slice(&w.to_le_bytes());
    }
    BigUint::from_bytes_le(&buf)
}

// Fill the provided slice with pseudo-random bytes; distinct seeds yield
// unrelated outputs.
pub(crate) fn mkrnd_bytes(out: &mut [u8], seed: u64) {
    let mut j = 0;
    while j < out.len() {
        let mut sh = Sha256::new();
        sh.update(seed.to_le_bytes());
        sh.update((j as u64).to_le_bytes());
        let h = sh.finalize();
        let n = core::cmp::min(32, out.len() - j);
        out[j..(j + n)].copy_from_slice(&h[..n]);
        j += n;
    }
}

pub(crate) fn mkrnd_digits(out: &mut [Digit], seed: u64) {
    let mut buf = vec![0u8; out.len() * DIGIT_BYTES];
    mkrnd_bytes(&mut buf, seed);
    for i in 0..out.len() {
        out[i] = Digit::from_le_bytes(*<&[u8; DIGIT_BYTES]>::try_from(
            &buf[(i * DIGIT_BYTES)..((i + 1) * DIGIT_BYTES)]).unwrap());
    }
}

// A deterministic RNG for tests of the random element generators.
pub(crate) struct TestRng {
    seed: u64,
    ctr: u64,
}

impl TestRng {
    pub(crate) fn new(seed: u64) -> Self {
        Self { seed, ctr: 0 }
    }
}

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        mkrnd_bytes(dest, self.seed ^ (self.ctr << 32));
        self.ctr += 1;
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for TestRng {}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn long_digit_runs() {
        // Output length is not bounded by any internal buffer.
        let mut a = [0 as Digit; 300];
        mkrnd_digits(&mut a, 7);
        let mut b = [0 as Digit; 40];
        mkrnd_digits(&mut b, 7);
        assert!(a[..40] == b[..]);
        assert!(a[290..].iter().any(|&w| w != 0));
    }
}
