//! # Multisig HMAC Core
//!
//! Threshold multisignatures built from HMAC.
//!
//! Every signer MACs the same message with its own secret key. The per-key
//! signatures are XORed into one fixed-size combined signature, alongside a
//! 32-bit bitfield recording which signer indices contributed. A verifier
//! holding the keys (or the seed they were derived from) recomputes each
//! claimed signature and XORs it back out; the combined signature is valid
//! when everything cancels to zero and at least `threshold` signers took part.
//!
//! ## Example
//!
//! ```rust
//! use multisig_hmac_core::{Algorithm, MultisigHmac};
//!
//! let scheme = MultisigHmac::new(Algorithm::HmacSha256);
//! let keys: Vec<_> = (0..3).map(|i| scheme.generate_key(i).unwrap()).collect();
//!
//! let data = b"hello world";
//! let signatures = vec![
//!     scheme.sign(&keys[0], data).unwrap(),
//!     scheme.sign(&keys[2], data).unwrap(),
//! ];
//! let combined = scheme.combine(&signatures).unwrap();
//!
//! assert!(scheme.verify(&keys, &combined, data, 2).unwrap());
//! ```

pub mod algorithm;
pub mod bitfield;
pub mod error;
pub mod keygen;
pub mod scheme;
pub mod sign;
pub mod types;
pub mod verify;

pub use algorithm::{Algorithm, AlgorithmParams};
pub use bitfield::MAX_SIGNERS;
pub use error::{Error, Result};
pub use scheme::MultisigHmac;
pub use types::{CombinedSignature, KeyMaterial, KeyOrigin, Seed, Signature, SignerIndex};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default threshold for a 3-signer setup
pub const DEFAULT_THRESHOLD: usize = 2;
