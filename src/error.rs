/// Errors reported by the library.
///
/// Arithmetic kernels do not fail: operand-size mismatches are caller
/// contract violations, not runtime errors. The only recoverable failure
/// is the exhaustion of temporary storage in the reduced-product
/// wrappers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("scratch pool exhausted: all {capacity} double-width buffers are in use")]
    ScratchExhausted { capacity: usize },
}
