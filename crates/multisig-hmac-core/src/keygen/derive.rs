//! Seed-based key derivation
//!
//! `block(0) = HMAC(seed, "derived" || LE32(index) || 0x00)`
//! `block(n) = HMAC(seed, block(n - 1) || n)`
//!
//! Blocks are concatenated and truncated to the algorithm's key length.

use super::DERIVATION_DOMAIN;
use crate::types::check_index;
use crate::{Algorithm, Error, KeyMaterial, KeyOrigin, Result, Seed, SignerIndex};
use tracing::{debug, instrument};
use zeroize::Zeroizing;

/// Derive the key for `index` from `seed`.
///
/// Deterministic: the same seed, index and algorithm always give the same key.
#[instrument(level = "debug", skip(seed))]
pub fn derive_key(seed: &Seed, index: SignerIndex, algorithm: Algorithm) -> Result<KeyMaterial> {
    check_index(index)?;

    let key_length = algorithm.key_length();
    if seed.len() != key_length {
        return Err(Error::InvalidKey {
            expected: key_length,
            actual: seed.len(),
        });
    }

    let sig_length = algorithm.sig_length();

    // sized up front so neither buffer reallocates and leaves key bytes behind
    let mut message = Zeroizing::new(Vec::with_capacity(
        (DERIVATION_DOMAIN.len() + 5).max(sig_length + 1),
    ));
    message.extend_from_slice(DERIVATION_DOMAIN);
    message.extend_from_slice(&(index as u32).to_le_bytes());
    message.push(0);

    let mut output = Zeroizing::new(Vec::with_capacity(key_length + sig_length));
    let mut counter: u8 = 0;
    loop {
        let block = Zeroizing::new(algorithm.mac(seed.as_bytes(), &message)?);
        output.extend_from_slice(&block);
        if output.len() >= key_length {
            break;
        }
        counter += 1;
        message.clear();
        message.extend_from_slice(&block);
        message.push(counter);
    }
    let secret = output[..key_length].to_vec();

    debug!(index, "Derived key from seed");
    KeyMaterial::new(index, secret, KeyOrigin::Derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::generate_seed;
    use crate::MAX_SIGNERS;

    #[test]
    fn test_deterministic() {
        for algorithm in Algorithm::ALL {
            let seed = generate_seed(algorithm);
            let a = derive_key(&seed, 3, algorithm).unwrap();
            let b = derive_key(&seed, 3, algorithm).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.secret().len(), algorithm.key_length());
            assert_eq!(a.origin(), KeyOrigin::Derived);
        }
    }

    #[test]
    fn test_distinct_indices() {
        let seed = generate_seed(Algorithm::HmacSha256);
        let keys: Vec<_> = (0..MAX_SIGNERS)
            .map(|i| derive_key(&seed, i, Algorithm::HmacSha256).unwrap())
            .collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a.secret(), b.secret());
            }
        }
    }

    #[test]
    fn test_first_block_layout() {
        let seed = Seed::from_bytes(vec![0x42; 64]);
        let key = derive_key(&seed, 2, Algorithm::HmacSha256).unwrap();

        let block0 = Algorithm::HmacSha256
            .mac(seed.as_bytes(), b"derived\x02\x00\x00\x00\x00")
            .unwrap();
        let mut next = block0.clone();
        next.push(1);
        let block1 = Algorithm::HmacSha256.mac(seed.as_bytes(), &next).unwrap();

        assert_eq!(&key.secret()[..32], block0.as_slice());
        assert_eq!(&key.secret()[32..], block1.as_slice());
    }

    #[test]
    fn test_block_chain_all_algorithms() {
        for algorithm in Algorithm::ALL {
            let seed = Seed::from_bytes(vec![0x17; algorithm.key_length()]);
            let key = derive_key(&seed, 30, algorithm).unwrap();

            let mut expected = Vec::new();
            let mut message = b"derived\x1e\x00\x00\x00\x00".to_vec();
            let mut counter = 0u8;
            while expected.len() < algorithm.key_length() {
                let block = algorithm.mac(seed.as_bytes(), &message).unwrap();
                expected.extend_from_slice(&block);
                counter += 1;
                message = block;
                message.push(counter);
            }
            expected.truncate(algorithm.key_length());

            assert_eq!(key.secret(), expected.as_slice());
        }
    }

    #[test]
    fn test_algorithm_separation() {
        let seed = Seed::from_bytes(vec![9; 128]);
        let a = derive_key(&seed, 0, Algorithm::HmacSha384).unwrap();
        let b = derive_key(&seed, 0, Algorithm::HmacSha512).unwrap();
        assert_ne!(a.secret(), b.secret());
    }

    #[test]
    fn test_invalid_inputs() {
        let seed = generate_seed(Algorithm::HmacSha256);
        assert_eq!(
            derive_key(&seed, 32, Algorithm::HmacSha256).unwrap_err(),
            Error::InvalidIndex(32)
        );
        assert_eq!(
            derive_key(&seed, 0, Algorithm::HmacSha512).unwrap_err(),
            Error::InvalidKey {
                expected: 128,
                actual: 64
            }
        );
    }
}
