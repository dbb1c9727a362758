//! Verification against keys derived from a shared seed

use super::{cancels, check_preconditions, recompute};
use crate::bitfield::{highest_set_bit_plus_one, popcount, set_bit_positions, MAX_SIGNERS};
use crate::keygen::derive_key;
use crate::sign::sign;
use crate::{Algorithm, CombinedSignature, Error, Result, Seed, SignerIndex};
use tracing::{debug, instrument};

/// Verify `combined` over `data`, deriving each signer's key from `seed`.
///
/// Same rules as [`verify`](super::verify), except keys are produced on demand
/// and no key list length applies.
///
/// # Errors
/// * [`Error::InvalidBitfield`] if the bitfield exceeds the signer capacity
/// * [`Error::InvalidKey`] if the seed length does not match `algorithm`
/// * [`Error::LengthMismatch`] if the signature length does not match `algorithm`
/// * [`Error::InvalidThreshold`] if `threshold` is zero
#[instrument(
    level = "debug",
    skip(seed, combined, data),
    fields(bitfield = combined.bitfield)
)]
pub fn verify_derived(
    seed: &Seed,
    combined: &CombinedSignature,
    data: &[u8],
    threshold: usize,
    algorithm: Algorithm,
) -> Result<bool> {
    check_preconditions(combined, threshold, algorithm)?;

    let n_keys = popcount(combined.bitfield);
    if highest_set_bit_plus_one(combined.bitfield) > MAX_SIGNERS {
        return Err(Error::InvalidBitfield(combined.bitfield));
    }

    if n_keys < threshold {
        debug!(signers = n_keys, "Below threshold");
        return Ok(false);
    }

    let positions: Vec<SignerIndex> = set_bit_positions(combined.bitfield).collect();
    let recomputed = recompute(&positions, |i| {
        let key = derive_key(seed, i, algorithm)?;
        sign(&key, data, algorithm)
    })?;

    let valid = cancels(combined, &recomputed);
    debug!(valid, "Verified combined signature against derived keys");
    Ok(valid)
}
