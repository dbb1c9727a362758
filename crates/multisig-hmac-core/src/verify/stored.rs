//! Verification against an explicit key list

use super::{cancels, check_preconditions, recompute};
use crate::bitfield::{highest_set_bit_plus_one, popcount, set_bit_positions};
use crate::sign::sign;
use crate::{Algorithm, CombinedSignature, Error, KeyMaterial, Result, SignerIndex};
use tracing::{debug, instrument};

/// Verify `combined` over `data` against a list of keys indexed by signer index.
///
/// `keys[i]` must be the key of signer `i` for every index in the bitfield.
///
/// # Errors
/// * [`Error::InsufficientKeys`] if `keys` is too short to cover the bitfield
/// * [`Error::LengthMismatch`] if the signature length does not match `algorithm`
/// * [`Error::InvalidThreshold`] if `threshold` is zero
/// * [`Error::InvalidKey`] if a referenced key has the wrong length
///
/// # Returns
/// `true` if at least `threshold` signers contributed and every contribution
/// authenticates, `false` otherwise
#[instrument(
    level = "debug",
    skip(keys, combined, data),
    fields(bitfield = combined.bitfield, keys = keys.len())
)]
pub fn verify(
    keys: &[KeyMaterial],
    combined: &CombinedSignature,
    data: &[u8],
    threshold: usize,
    algorithm: Algorithm,
) -> Result<bool> {
    check_preconditions(combined, threshold, algorithm)?;

    let n_keys = popcount(combined.bitfield);
    let highest = highest_set_bit_plus_one(combined.bitfield);
    if keys.len() < n_keys || keys.len() < highest {
        return Err(Error::InsufficientKeys {
            required: n_keys.max(highest),
            supplied: keys.len(),
        });
    }

    if n_keys < threshold {
        debug!(signers = n_keys, "Below threshold");
        return Ok(false);
    }

    let positions: Vec<SignerIndex> = set_bit_positions(combined.bitfield).collect();
    let recomputed = recompute(&positions, |i| sign(&keys[i], data, algorithm))?;

    let valid = cancels(combined, &recomputed);
    debug!(valid, "Verified combined signature");
    Ok(valid)
}
