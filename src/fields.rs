//! Concrete field configurations.
//!
//! | type      | modulus                       | qnr | cnr | profile   |
//! |-----------|-------------------------------|-----|-----|-----------|
//! | `FpM61`   | `2^61 - 1`                    | -1  | -5  | `Wide`    |
//! | `FpP60`   | `2^60 - 579`                  | -2  |  5  | `Compact` |
//! | `FpBn254` | base field of the BN254 curve | -1  | -3  | `Wide`    |
//!
//! Each base field `X` comes with `Fp2X = Fp2<X>` and `Fp3X = Fp3<X>`.

use crate::field::{Compact, FieldParams, Fp2, Fp3, MinusOne, Small, Wide};
use crate::field::{define_fp, define_fp_tests};

/// Mersenne prime `2^61 - 1`.
pub struct M61Params;

impl FieldParams for M61Params {
    const MODULUS: &'static [u64] = &[ 0x1FFFFFFFFFFFFFFF ];
    type Headroom = Wide;
    type Qnr = MinusOne;
    type Cnr = Small<-5>;
}

/// Prime `2^60 - 579`.
pub struct P60Params;

impl FieldParams for P60Params {
    const MODULUS: &'static [u64] = &[ 0x0FFFFFFFFFFFFDBD ];
    type Headroom = Compact;
    type Qnr = Small<-2>;
    type Cnr = Small<5>;
}

/// BN254 base field.
pub struct Bn254Params;

impl FieldParams for Bn254Params {
    const MODULUS: &'static [u64] = &[
        0x3C208C16D87CFD47,
        0x97816A916871CA8D,
        0xB85045B68181585D,
        0x30644E72E131A029,
    ];
    type Headroom = Wide;
    type Qnr = MinusOne;
    type Cnr = Small<-3>;
}

define_fp!(FpM61, FpM61Dbl, M61Params, fpm61);
define_fp!(FpP60, FpP60Dbl, P60Params, fpp60);
define_fp!(FpBn254, FpBn254Dbl, Bn254Params, fpbn254);

pub type Fp2M61 = Fp2<FpM61>;
pub type Fp3M61 = Fp3<FpM61>;
pub type Fp2P60 = Fp2<FpP60>;
pub type Fp3P60 = Fp3<FpP60>;
pub type Fp2Bn254 = Fp2<FpBn254>;
pub type Fp3Bn254 = Fp3<FpBn254>;

define_fp_tests!(FpM61, FpM61Dbl, fpm61_tests);
define_fp_tests!(FpP60, FpP60Dbl, fpp60_tests);
define_fp_tests!(FpBn254, FpBn254Dbl, fpbn254_tests);

/// Test-only field: 63-bit modulus with a single spare bit, so that
/// sums are reduced (`Compact`) with `qnr = -1`.
#[cfg(test)]
pub(crate) mod testfields {

    use crate::field::{Compact, FieldParams, MinusOne, Small};
    use crate::field::{define_fp, define_fp_tests};

    pub struct C63Params;

    impl FieldParams for C63Params {
        const MODULUS: &'static [u64] = &[ 0x7FFFFFFFFFFFFFE7 ];
        type Headroom = Compact;
        type Qnr = MinusOne;
        type Cnr = Small<-2>;
    }

    define_fp!(FpC63, FpC63Dbl, C63Params, fpc63);
    define_fp_tests!(FpC63, FpC63Dbl, fpc63_tests);
}
