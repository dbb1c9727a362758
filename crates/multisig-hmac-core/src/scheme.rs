//! Scheme handle binding one algorithm to every operation

use crate::{keygen, sign, verify};
use crate::{
    Algorithm, AlgorithmParams, CombinedSignature, KeyMaterial, Result, Seed, Signature,
    SignerIndex,
};

/// A multisig HMAC scheme instance.
///
/// All keys, seeds and signatures used with one instance share its
/// algorithm, and therefore its key and signature lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultisigHmac {
    algorithm: Algorithm,
}

impl MultisigHmac {
    /// Create a scheme instance for `algorithm`
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn params(&self) -> &'static AlgorithmParams {
        self.algorithm.params()
    }

    /// Secret key and seed length in bytes
    pub fn key_length(&self) -> usize {
        self.algorithm.key_length()
    }

    /// Signature length in bytes
    pub fn signature_length(&self) -> usize {
        self.algorithm.sig_length()
    }

    /// Generate a random key for signer `index`
    pub fn generate_key(&self, index: SignerIndex) -> Result<KeyMaterial> {
        keygen::generate_key(index, self.algorithm)
    }

    /// Generate a random master seed
    pub fn generate_seed(&self) -> Seed {
        keygen::generate_seed(self.algorithm)
    }

    /// Derive the key for signer `index` from `seed`
    pub fn derive_key(&self, seed: &Seed, index: SignerIndex) -> Result<KeyMaterial> {
        keygen::derive_key(seed, index, self.algorithm)
    }

    /// Sign `data` with one key
    pub fn sign(&self, key: &KeyMaterial, data: &[u8]) -> Result<Signature> {
        sign::sign(key, data, self.algorithm)
    }

    /// Combine per-key signatures
    pub fn combine(&self, signatures: &[Signature]) -> Result<CombinedSignature> {
        sign::combine(signatures, self.signature_length())
    }

    /// Verify against an explicit key list
    pub fn verify(
        &self,
        keys: &[KeyMaterial],
        combined: &CombinedSignature,
        data: &[u8],
        threshold: usize,
    ) -> Result<bool> {
        verify::verify(keys, combined, data, threshold, self.algorithm)
    }

    /// Verify against keys derived from `seed`
    pub fn verify_derived(
        &self,
        seed: &Seed,
        combined: &CombinedSignature,
        data: &[u8],
        threshold: usize,
    ) -> Result<bool> {
        verify::verify_derived(seed, combined, data, threshold, self.algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_keys() {
        let scheme = MultisigHmac::default();
        assert_eq!(scheme.key_length(), 64);
        assert_eq!(scheme.signature_length(), 32);

        let keys: Vec<_> = (0..3).map(|i| scheme.generate_key(i).unwrap()).collect();
        let data = b"hello world";
        let sigs = vec![
            scheme.sign(&keys[0], data).unwrap(),
            scheme.sign(&keys[2], data).unwrap(),
        ];
        let combined = scheme.combine(&sigs).unwrap();

        assert!(scheme.verify(&keys, &combined, data, 2).unwrap());
        assert!(!scheme.verify(&keys, &combined, data, 3).unwrap());
    }

    #[test]
    fn test_derived_keys() {
        let scheme = MultisigHmac::new(Algorithm::HmacSha384);
        let seed = scheme.generate_seed();
        let data = b"hello world";
        let sigs: Vec<_> = [0, 2]
            .iter()
            .map(|&i| {
                let key = scheme.derive_key(&seed, i).unwrap();
                scheme.sign(&key, data).unwrap()
            })
            .collect();
        let combined = scheme.combine(&sigs).unwrap();

        assert_eq!(combined.bytes.len(), 48);
        assert!(scheme.verify_derived(&seed, &combined, data, 2).unwrap());
    }
}
