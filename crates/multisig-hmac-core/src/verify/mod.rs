//! Verification module
//!
//! Verification re-signs the data with every key the bitfield claims and XORs
//! each result back into the combined signature. Because XOR cancels itself,
//! a genuine signature leaves an all-zero residual and an empty bitfield.
//!
//! Malformed input is reported as an [`Error`]; a signature that does not
//! authenticate is `Ok(false)`.

mod derived;
mod stored;

pub use derived::verify_derived;
pub use stored::verify;

use crate::sign::xor_into;
use crate::{Algorithm, CombinedSignature, Error, Result, Signature, SignerIndex};
use subtle::ConstantTimeEq;

#[cfg(feature = "multi-thread")]
use rayon::prelude::*;

/// Checks shared by both verification paths
fn check_preconditions(
    combined: &CombinedSignature,
    threshold: usize,
    algorithm: Algorithm,
) -> Result<()> {
    if combined.bytes.len() != algorithm.sig_length() {
        return Err(Error::LengthMismatch {
            expected: algorithm.sig_length(),
            actual: combined.bytes.len(),
        });
    }
    if threshold == 0 {
        return Err(Error::InvalidThreshold(threshold));
    }
    Ok(())
}

/// Recompute the per-key signature for every claimed index
#[cfg(feature = "multi-thread")]
fn recompute<F>(positions: &[SignerIndex], sign_at: F) -> Result<Vec<Signature>>
where
    F: Fn(SignerIndex) -> Result<Signature> + Send + Sync,
{
    positions.par_iter().map(|&i| sign_at(i)).collect()
}

/// Recompute the per-key signature for every claimed index
#[cfg(not(feature = "multi-thread"))]
fn recompute<F>(positions: &[SignerIndex], sign_at: F) -> Result<Vec<Signature>>
where
    F: Fn(SignerIndex) -> Result<Signature> + Send + Sync,
{
    positions.iter().map(|&i| sign_at(i)).collect()
}

/// Fold the recomputed signatures out of `combined` and test for a zero residual
fn cancels(combined: &CombinedSignature, recomputed: &[Signature]) -> bool {
    let mut sig_acc = combined.bytes.clone();
    let mut bit_acc = combined.bitfield;

    for signature in recomputed {
        xor_into(&mut sig_acc, &signature.bytes);
        bit_acc ^= signature.tag;
    }

    let zeros = vec![0u8; sig_acc.len()];
    let residual_is_zero: bool = sig_acc.as_slice().ct_eq(zeros.as_slice()).into();
    bit_acc == 0 && residual_is_zero
}
