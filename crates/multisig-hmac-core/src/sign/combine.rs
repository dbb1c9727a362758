//! Signature combination

use crate::{CombinedSignature, Error, Result, Signature};
use tracing::{debug, instrument};

/// XOR-fold per-key signatures into one combined signature.
///
/// The result does not depend on the order of `signatures`. Each signer index
/// may appear at most once: a repeated tag would cancel out of both the bytes
/// and the bitfield.
#[instrument(level = "debug", skip(signatures), fields(count = signatures.len()))]
pub fn combine(signatures: &[Signature], sig_length: usize) -> Result<CombinedSignature> {
    if signatures.is_empty() {
        return Err(Error::EmptySignatureSet);
    }

    let mut bytes = vec![0u8; sig_length];
    let mut bitfield = 0u32;

    for signature in signatures {
        if signature.bytes.len() != sig_length {
            return Err(Error::LengthMismatch {
                expected: sig_length,
                actual: signature.bytes.len(),
            });
        }
        let index = signature
            .index()
            .ok_or(Error::InvalidBitfield(signature.tag))?;
        if bitfield & signature.tag != 0 {
            return Err(Error::DuplicateIndex(index));
        }

        xor_into(&mut bytes, &signature.bytes);
        bitfield |= signature.tag;
    }

    debug!(bitfield, "Combined signatures");
    Ok(CombinedSignature { bytes, bitfield })
}

/// `acc ^= other`, byte-wise. Both slices have the same length.
pub(crate) fn xor_into(acc: &mut [u8], other: &[u8]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a ^= b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::generate_key;
    use crate::sign::sign;
    use crate::Algorithm;

    fn signatures(indices: &[usize]) -> Vec<Signature> {
        indices
            .iter()
            .map(|&i| {
                let key = generate_key(i, Algorithm::HmacSha256).unwrap();
                sign(&key, b"hello world", Algorithm::HmacSha256).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_combine() {
        let sigs = signatures(&[0, 2]);
        let combined = combine(&sigs, 32).unwrap();

        assert_eq!(combined.bitfield, 0b101);
        assert_eq!(combined.signer_count(), 2);
        let expected: Vec<u8> = sigs[0]
            .bytes
            .iter()
            .zip(&sigs[1].bytes)
            .map(|(a, b)| a ^ b)
            .collect();
        assert_eq!(combined.bytes, expected);
    }

    #[test]
    fn test_single_signature() {
        let sigs = signatures(&[9]);
        let combined = combine(&sigs, 32).unwrap();
        assert_eq!(combined.bytes, sigs[0].bytes);
        assert_eq!(combined.bitfield, 1 << 9);
    }

    #[test]
    fn test_order_independent() {
        let mut sigs = signatures(&[1, 4, 30]);
        let forward = combine(&sigs, 32).unwrap();
        sigs.reverse();
        assert_eq!(combine(&sigs, 32).unwrap(), forward);
    }

    #[test]
    fn test_duplicate_index() {
        let sig = signatures(&[3]).remove(0);
        assert_eq!(
            combine(&[sig.clone(), sig], 32).unwrap_err(),
            Error::DuplicateIndex(3)
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(combine(&[], 32).unwrap_err(), Error::EmptySignatureSet);

        let sigs = signatures(&[0]);
        assert_eq!(
            combine(&sigs, 64).unwrap_err(),
            Error::LengthMismatch {
                expected: 64,
                actual: 32
            }
        );

        let multi_bit = Signature {
            bytes: vec![0; 32],
            tag: 0b110,
        };
        assert_eq!(
            combine(&[multi_bit], 32).unwrap_err(),
            Error::InvalidBitfield(0b110)
        );
    }
}
