//! Algorithm table and the keyed-hash primitive
//!
//! Each supported HMAC variant fixes two lengths for a scheme instance: the
//! secret key length and the signature (MAC output) length.

use crate::{Error, Result};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

/// Parameters of one HMAC variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmParams {
    /// Canonical name
    pub name: &'static str,
    /// Secret key length in bytes (the hash block size)
    pub key_length: usize,
    /// Signature length in bytes (the hash output size)
    pub sig_length: usize,
}

const ALGORITHMS: [AlgorithmParams; 3] = [
    AlgorithmParams {
        name: "HmacSHA256",
        key_length: 64,
        sig_length: 32,
    },
    AlgorithmParams {
        name: "HmacSHA384",
        key_length: 128,
        sig_length: 48,
    },
    AlgorithmParams {
        name: "HmacSHA512",
        key_length: 128,
        sig_length: 64,
    },
];

/// Supported HMAC variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "HmacSHA256")]
    HmacSha256,
    #[serde(rename = "HmacSHA384")]
    HmacSha384,
    #[serde(rename = "HmacSHA512")]
    HmacSha512,
}

impl Algorithm {
    /// All supported algorithms, in table order
    pub const ALL: [Algorithm; 3] = [
        Algorithm::HmacSha256,
        Algorithm::HmacSha384,
        Algorithm::HmacSha512,
    ];

    /// Look up the fixed parameters for this algorithm
    pub fn params(self) -> &'static AlgorithmParams {
        match self {
            Algorithm::HmacSha256 => &ALGORITHMS[0],
            Algorithm::HmacSha384 => &ALGORITHMS[1],
            Algorithm::HmacSha512 => &ALGORITHMS[2],
        }
    }

    /// Canonical algorithm name
    pub fn name(self) -> &'static str {
        self.params().name
    }

    /// Secret key length in bytes
    pub fn key_length(self) -> usize {
        self.params().key_length
    }

    /// Signature length in bytes
    pub fn sig_length(self) -> usize {
        self.params().sig_length
    }

    /// Compute `HMAC(key, data)` with this algorithm's hash.
    ///
    /// Accepts keys of any length; callers that need the key length
    /// invariant check it themselves.
    pub fn mac(self, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Algorithm::HmacSha256 => compute::<Hmac<Sha256>>(key, data, self.key_length()),
            Algorithm::HmacSha384 => compute::<Hmac<Sha384>>(key, data, self.key_length()),
            Algorithm::HmacSha512 => compute::<Hmac<Sha512>>(key, data, self.key_length()),
        }
    }
}

fn compute<M: Mac + KeyInit>(key: &[u8], data: &[u8], key_length: usize) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| Error::InvalidKey {
        expected: key_length,
        actual: key.len(),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.to_ascii_lowercase().replace(['-', '_'], "");
        let digest = normalized.strip_prefix("hmac").unwrap_or(&normalized);
        match digest {
            "sha256" => Ok(Algorithm::HmacSha256),
            "sha384" => Ok(Algorithm::HmacSha384),
            "sha512" => Ok(Algorithm::HmacSha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}
