//! Random key and seed generation

use crate::types::check_index;
use crate::{Algorithm, KeyMaterial, KeyOrigin, Result, Seed, SignerIndex};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

/// Generate a random key for `index` using the operating system RNG
pub fn generate_key(index: SignerIndex, algorithm: Algorithm) -> Result<KeyMaterial> {
    generate_key_with_rng(&mut OsRng, index, algorithm)
}

/// Generate a random key for `index` from the given RNG
pub fn generate_key_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    index: SignerIndex,
    algorithm: Algorithm,
) -> Result<KeyMaterial> {
    check_index(index)?;

    let mut secret = vec![0u8; algorithm.key_length()];
    rng.fill_bytes(&mut secret);

    debug!(index, algorithm = %algorithm, "Generated random key");
    KeyMaterial::new(index, secret, KeyOrigin::Random)
}

/// Generate a random master seed using the operating system RNG
pub fn generate_seed(algorithm: Algorithm) -> Seed {
    generate_seed_with_rng(&mut OsRng, algorithm)
}

/// Generate a random master seed from the given RNG
pub fn generate_seed_with_rng<R: RngCore + CryptoRng>(rng: &mut R, algorithm: Algorithm) -> Seed {
    let mut bytes = vec![0u8; algorithm.key_length()];
    rng.fill_bytes(&mut bytes);
    Seed::from_bytes(bytes)
}
