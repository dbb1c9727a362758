//! Per-key signing

use crate::types::check_index;
use crate::{Algorithm, Error, KeyMaterial, Result, Signature};

/// Sign `data` with a single key.
///
/// The signature bytes are `HMAC(key.secret, data)` and the tag is
/// `1 << key.index`.
pub fn sign(key: &KeyMaterial, data: &[u8], algorithm: Algorithm) -> Result<Signature> {
    check_index(key.index())?;

    let expected = algorithm.key_length();
    if key.secret().len() != expected {
        return Err(Error::InvalidKey {
            expected,
            actual: key.secret().len(),
        });
    }

    Ok(Signature {
        bytes: algorithm.mac(key.secret(), data)?,
        tag: key.tag(),
    })
}
