// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key derivation from ECDH shared-secret material
//!
//! Both derivations are one-shot pure functions. The derived key never appears
//! on the wire, so switching derivation (or later adding salt/info to HKDF)
//! does not change the envelope layout.

use crate::config::KeyDerivation;
use crate::error::{EciesError, Result};
use hkdf::Hkdf;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Symmetric key length produced for the envelope ciphers
pub const DERIVED_KEY_LENGTH: usize = 32;

/// Largest output HKDF-SHA256 can expand to (255 blocks)
pub const MAX_HKDF_OUTPUT: usize = 255 * 32;

/// SHA-256 over the material
pub fn sha256_key(material: &[u8]) -> Zeroizing<[u8; DERIVED_KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; DERIVED_KEY_LENGTH]);
    key.copy_from_slice(&Sha256::digest(material));
    key
}

/// HKDF-SHA256 with no salt and no info, expanded to `length` bytes
///
/// # Errors
///
/// `OutputTooLong` if `length` exceeds [`MAX_HKDF_OUTPUT`].
pub fn hkdf_sha256(material: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>> {
    let hkdf = Hkdf::<Sha256>::new(None, material);
    let mut okm = Zeroizing::new(vec![0u8; length]);
    hkdf.expand(&[], &mut okm).map_err(|_| EciesError::OutputTooLong {
        maximum: MAX_HKDF_OUTPUT,
        requested: length,
    })?;

    Ok(okm)
}

/// Derive the 32-byte envelope key with the configured derivation
pub fn derive_key(
    material: &[u8],
    derivation: KeyDerivation,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    match derivation {
        KeyDerivation::Sha256 => Ok(sha256_key(material)),
        KeyDerivation::HkdfSha256 => {
            let okm = hkdf_sha256(material, DERIVED_KEY_LENGTH)?;
            let mut key = Zeroizing::new([0u8; DERIVED_KEY_LENGTH]);
            key.copy_from_slice(&okm);
            Ok(key)
        }
    }
}
