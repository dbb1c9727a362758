//! Key generation module
//!
//! Keys come from one of two places:
//! - a secure random source, one independent secret per signer
//! - a shared seed, from which any index's key can be re-derived

mod derive;
mod random;

pub use derive::derive_key;
pub use random::{generate_key, generate_key_with_rng, generate_seed, generate_seed_with_rng};

/// Domain separation prefix for seed-derived keys
pub const DERIVATION_DOMAIN: &[u8] = b"derived";
