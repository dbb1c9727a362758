//! Core types for HMAC multisignatures

use crate::bitfield::{self, SetBits, MAX_SIGNERS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Position of a signer in the participant bitfield
pub type SignerIndex = usize;

/// How a key's secret was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrigin {
    /// Drawn from a cryptographically secure random source
    Random,
    /// Derived from a shared seed and the signer index
    Derived,
}

/// A signer's secret key bound to its index
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(try_from = "RawKeyMaterial")]
pub struct KeyMaterial {
    #[zeroize(skip)]
    index: SignerIndex,

    #[serde(with = "hex_bytes")]
    secret: Vec<u8>,

    #[zeroize(skip)]
    origin: KeyOrigin,
}

impl KeyMaterial {
    /// Bind a secret to a signer index.
    ///
    /// The secret length is checked against the algorithm when the key is used.
    pub fn new(index: SignerIndex, secret: Vec<u8>, origin: KeyOrigin) -> Result<Self> {
        check_index(index)?;
        Ok(Self {
            index,
            secret,
            origin,
        })
    }

    /// Signer index
    pub fn index(&self) -> SignerIndex {
        self.index
    }

    /// Secret key bytes
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Where the secret came from
    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Single-bit tag for this signer
    pub fn tag(&self) -> u32 {
        1 << self.index
    }
}

/// Unvalidated key fields as read from storage
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct RawKeyMaterial {
    #[zeroize(skip)]
    index: SignerIndex,

    #[serde(with = "hex_bytes")]
    secret: Vec<u8>,

    #[zeroize(skip)]
    origin: KeyOrigin,
}

impl TryFrom<RawKeyMaterial> for KeyMaterial {
    type Error = Error;

    fn try_from(mut raw: RawKeyMaterial) -> Result<Self> {
        let secret = std::mem::take(&mut raw.secret);
        KeyMaterial::new(raw.index, secret, raw.origin)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("index", &self.index)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Master seed from which per-index keys are derived
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Seed(#[serde(with = "hex_bytes")] Vec<u8>);

impl Seed {
    /// Wrap existing seed bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Seed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Seed length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the seed is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({} bytes)", self.0.len())
    }
}

/// Signature produced by a single key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// HMAC of the signed data
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
    /// `1 << index` of the signing key
    pub tag: u32,
}

impl Signature {
    /// Signer index encoded in the tag, if the tag is a single bit
    pub fn index(&self) -> Option<SignerIndex> {
        if self.tag.count_ones() == 1 {
            Some(self.tag.trailing_zeros() as SignerIndex)
        } else {
            None
        }
    }
}

/// Aggregate of several per-key signatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedSignature {
    /// XOR of all contributing signature bytes
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
    /// Union of all contributing tags
    pub bitfield: u32,
}

impl CombinedSignature {
    /// Number of contributing signers
    pub fn signer_count(&self) -> usize {
        bitfield::popcount(self.bitfield)
    }

    /// Contributing signer indices, ascending
    pub fn signers(&self) -> SetBits {
        bitfield::set_bit_positions(self.bitfield)
    }
}

pub(crate) fn check_index(index: SignerIndex) -> Result<()> {
    if index >= MAX_SIGNERS {
        return Err(Error::InvalidIndex(index));
    }
    Ok(())
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map_err(serde::de::Error::custom)
    }
}
