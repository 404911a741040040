//! Fptower is a library of low-level arithmetic kernels for
//! pairing-based cryptography.
//!
//! It provides, from the bottom up:
//!
//!  - `backend`: the digit type (32-bit or 64-bit, the "right one" is
//!    automatically selected, unless overridden by a compile-time
//!    feature) and the carry-propagating digit primitives.
//!
//!  - `bn`: multi-precision kernels on digit slices, in particular the
//!    Comba squaring engine (`bn::square()` for full squares,
//!    `bn::square_accumulate()` for the row-wise accumulate step, and
//!    `bn::square_rows()` which chains the latter) and Comba
//!    multiplication.
//!
//!  - `field`: prime fields in Montgomery representation (generated by
//!    the `define_fp!` macro from a configuration type), and the generic
//!    quadratic and cubic extensions `Fp2<F>` and `Fp3<F>`, with
//!    Karatsuba products into unreduced double-width values.
//!
//!  - `fields`: a few concrete configurations (including the BN254 base
//!    field).
//!
//!  - `arch`: one-time selection of CPU-specific helpers (leading zero
//!    count) and a cycle counter for benchmarks.
//!
//! # Usage
//!
//! The library is `no_std`. The default `std` feature enables the runtime
//! CPU capability probe; without it, the architecture layer follows the
//! compile-time target features.
//!
//! # Conventions
//!
//! Field operations are constant-time. Booleans derived from secret values
//! are returned as `u32`, with 0xFFFFFFFF meaning "true" and 0x00000000
//! meaning "false"; the `Eq` and `PartialEq` traits are not implemented
//! on field elements.
//!
//! Operand lengths of the `bn` kernels are caller contracts, checked in
//! debug builds only. The reduced extension-field products draw their
//! double-width temporary from a `ScratchPool` and report exhaustion of
//! that pool with `Error::ScratchExhausted`; this is the only recoverable
//! error of the library.
//!
//! Diagnostics are emitted through `tracing`; the library never installs
//! a subscriber.

#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

pub mod backend;
pub mod arch;
pub mod bn;
pub mod field;
pub mod fields;

mod error;
mod scratch;

pub use error::Error;
pub use scratch::{Scratch, ScratchPool};

#[cfg(test)]
mod testutil;
