// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Agreement
//!
//! Computes `S = d * Q` on secp256k1 and turns it into a SEC1-style
//! representation: a parity tag (`0x02` for even `S.y`, `0x03` for odd)
//! followed by `S.x` left-padded to 32 bytes. A shared X with leading zero
//! bytes therefore never shortens the material.
//!
//! Also provides the KEM pair [`encapsulate`]/[`decapsulate`], which feeds
//! HKDF-SHA256 with `sender_pub || S` in uncompressed form.

use crate::curve::{CurveProvider, Secp256k1, FIELD_BYTES, UNCOMPRESSED_POINT_LENGTH};
use crate::error::{EciesError, Result};
use crate::kdf::{self, DERIVED_KEY_LENGTH};
use crate::private_key::PrivateKey;
use crate::public_key::PublicKey;
use zeroize::Zeroizing;

/// Length of the parity-tagged X coordinate
pub const SHARED_SECRET_MATERIAL_LENGTH: usize = 1 + FIELD_BYTES;

/// `tag || padded S.x`, zeroized on drop
///
/// Raw ECDH output is structured and biased, so this must go through a KDF
/// before being used as a symmetric key.
pub struct SharedSecretMaterial(Zeroizing<[u8; SHARED_SECRET_MATERIAL_LENGTH]>);

impl SharedSecretMaterial {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl AsRef<[u8]> for SharedSecretMaterial {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

fn shared_point(private: &PrivateKey, peer: &PublicKey) -> Result<PublicKey> {
    PublicKey::from_affine(Secp256k1::scalar_mult(&private.scalar(), peer.as_affine()))
        .map_err(|_| EciesError::InvalidPeerKey)
}

/// Unhashed ECDH: the parity-tagged, zero-padded shared X coordinate
///
/// Only meant as input to an external KDF, never as a key by itself.
pub fn unsafe_agree(private: &PrivateKey, peer: &PublicKey) -> Result<SharedSecretMaterial> {
    let point = shared_point(private, peer)?;
    Ok(SharedSecretMaterial(Zeroizing::new(
        point.to_compressed_bytes(),
    )))
}

/// ECDH followed by SHA-256, giving a 32-byte symmetric key
pub fn agree(
    private: &PrivateKey,
    peer: &PublicKey,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    let material = unsafe_agree(private, peer)?;
    Ok(kdf::sha256_key(material.as_bytes()))
}

/// [`agree`] against an encoded peer key
///
/// # Errors
///
/// `InvalidPeerKey` if `peer` is empty, otherwise any decoding error from
/// [`PublicKey::from_bytes`].
pub fn agree_with_encoded(
    private: &PrivateKey,
    peer: &[u8],
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    if peer.is_empty() {
        return Err(EciesError::InvalidPeerKey);
    }
    let peer = PublicKey::from_bytes(peer)?;
    agree(private, &peer)
}

/// KEM encapsulation: HKDF-SHA256 over `sender.pub || (sender.d * peer)`
pub fn encapsulate(
    sender: &PrivateKey,
    peer: &PublicKey,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    let point = shared_point(sender, peer)?;
    kem_key(sender.public_key(), &point)
}

/// KEM decapsulation, the receiving side of [`encapsulate`]
pub fn decapsulate(
    sender: &PublicKey,
    recipient: &PrivateKey,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    let point = shared_point(recipient, sender)?;
    kem_key(sender, &point)
}

fn kem_key(
    sender: &PublicKey,
    shared: &PublicKey,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    let mut secret = Zeroizing::new([0u8; 2 * UNCOMPRESSED_POINT_LENGTH]);
    secret[..UNCOMPRESSED_POINT_LENGTH].copy_from_slice(&sender.to_bytes());
    secret[UNCOMPRESSED_POINT_LENGTH..].copy_from_slice(&shared.to_bytes());

    let okm = kdf::hkdf_sha256(&secret[..], DERIVED_KEY_LENGTH)?;
    let mut key = Zeroizing::new([0u8; DERIVED_KEY_LENGTH]);
    key.copy_from_slice(&okm);
    Ok(key)
}
