// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Symmetric Envelope (AES-256-GCM / XChaCha20-Poly1305)
//!
//! Authenticated encryption with no associated data, producing a
//! self-contained byte string.
//!
//! **Envelope Format**:
//! ```text
//! [nonce (N bytes) | tag (16 bytes) | ciphertext (len(plaintext))]
//! ```
//!
//! - N: 12 or 16 for AES-256-GCM (default 16), 24 for XChaCha20-Poly1305
//! - The tag sits right after the nonce rather than after the ciphertext, so
//!   the only variable-length field comes last
//! - Both ciphers take a 32-byte key

use crate::config::{Config, SymmetricAlgorithm};
use crate::error::{EciesError, Result};
use aes_gcm::aead::{
    consts::{U12, U16},
    AeadInPlace, KeyInit, Nonce, Tag,
};
use aes_gcm::{aes::Aes256, AesGcm};
use chacha20poly1305::XChaCha20Poly1305;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// Key length for both ciphers
pub const KEY_LENGTH: usize = 32;

/// Authentication tag length for both ciphers
pub const TAG_LENGTH: usize = 16;

type Aes256Gcm12 = AesGcm<Aes256, U12>;
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Cipher instance selected by a [`Config`]
enum Cipher {
    Aes256Gcm12(Aes256Gcm12),
    Aes256Gcm16(Aes256Gcm16),
    XChaCha20Poly1305(XChaCha20Poly1305),
}

impl Cipher {
    fn new(key: &[u8], config: &Config) -> Result<Self> {
        if key.len() != KEY_LENGTH {
            return Err(EciesError::KeyLength {
                expected: KEY_LENGTH,
                actual: key.len(),
            });
        }
        let key_error = |_| EciesError::KeyLength {
            expected: KEY_LENGTH,
            actual: key.len(),
        };

        match (config.symmetric_algorithm(), config.nonce_length()) {
            (SymmetricAlgorithm::Aes256Gcm, 12) => Ok(Cipher::Aes256Gcm12(
                Aes256Gcm12::new_from_slice(key).map_err(key_error)?,
            )),
            (SymmetricAlgorithm::Aes256Gcm, 16) => Ok(Cipher::Aes256Gcm16(
                Aes256Gcm16::new_from_slice(key).map_err(key_error)?,
            )),
            (SymmetricAlgorithm::XChaCha20Poly1305, _) => Ok(Cipher::XChaCha20Poly1305(
                XChaCha20Poly1305::new_from_slice(key).map_err(key_error)?,
            )),
            (algorithm, length) => Err(EciesError::UnsupportedNonceLength {
                algorithm: algorithm.name(),
                length,
            }),
        }
    }

    fn seal_detached(&self, nonce: &[u8], buffer: &mut [u8], tag_out: &mut [u8]) -> Result<()> {
        match self {
            Cipher::Aes256Gcm12(c) => seal_detached(c, nonce, buffer, tag_out),
            Cipher::Aes256Gcm16(c) => seal_detached(c, nonce, buffer, tag_out),
            Cipher::XChaCha20Poly1305(c) => seal_detached(c, nonce, buffer, tag_out),
        }
    }

    fn open_detached(&self, nonce: &[u8], buffer: &mut [u8], tag: &[u8]) -> Result<()> {
        match self {
            Cipher::Aes256Gcm12(c) => open_detached(c, nonce, buffer, tag),
            Cipher::Aes256Gcm16(c) => open_detached(c, nonce, buffer, tag),
            Cipher::XChaCha20Poly1305(c) => open_detached(c, nonce, buffer, tag),
        }
    }
}

fn seal_detached<C: AeadInPlace>(
    cipher: &C,
    nonce: &[u8],
    buffer: &mut [u8],
    tag_out: &mut [u8],
) -> Result<()> {
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<C>::from_slice(nonce), b"", buffer)
        .map_err(|_| EciesError::Encryption)?;
    tag_out.copy_from_slice(&tag);
    Ok(())
}

fn open_detached<C: AeadInPlace>(
    cipher: &C,
    nonce: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> Result<()> {
    cipher
        .decrypt_in_place_detached(
            Nonce::<C>::from_slice(nonce),
            b"",
            buffer,
            Tag::<C>::from_slice(tag),
        )
        .map_err(|_| EciesError::Authentication)
}

/// Smallest envelope [`open`] accepts for `config`
pub fn min_envelope_length(config: &Config) -> usize {
    config.nonce_length() + TAG_LENGTH + 1
}

/// Encrypt `plaintext` under `key` with a fresh random nonce
///
/// # Returns
///
/// `nonce || tag || ciphertext`
///
/// # Errors
///
/// - `KeyLength` if `key` is not 32 bytes
/// - `InvalidLength` if `plaintext` is empty (the result could never be opened)
/// - `Randomness` if the nonce cannot be drawn
pub fn seal(key: &[u8], plaintext: &[u8], config: &Config) -> Result<Vec<u8>> {
    let cipher = Cipher::new(key, config)?;

    if plaintext.is_empty() {
        return Err(EciesError::InvalidLength {
            minimum: 1,
            actual: 0,
        });
    }

    let nonce_length = config.nonce_length();
    let mut envelope = vec![0u8; nonce_length + TAG_LENGTH + plaintext.len()];
    envelope[nonce_length + TAG_LENGTH..].copy_from_slice(plaintext);

    let (nonce, rest) = envelope.split_at_mut(nonce_length);
    let (tag, body) = rest.split_at_mut(TAG_LENGTH);
    OsRng.try_fill_bytes(nonce)?;

    if let Err(e) = cipher.seal_detached(nonce, body, tag) {
        body.iter_mut().for_each(|b| *b = 0);
        return Err(e);
    }

    Ok(envelope)
}

/// Verify and decrypt an envelope produced by [`seal`]
///
/// Either the whole plaintext is returned or nothing: on failure the working
/// buffer is zeroized before the error is returned.
///
/// # Errors
///
/// - `KeyLength` if `key` is not 32 bytes
/// - `InvalidLength` if the envelope is not longer than `nonce + tag`
/// - `Authentication` if the tag does not verify
pub fn open(key: &[u8], envelope: &[u8], config: &Config) -> Result<Vec<u8>> {
    let cipher = Cipher::new(key, config)?;

    let minimum = min_envelope_length(config);
    if envelope.len() < minimum {
        return Err(EciesError::InvalidLength {
            minimum,
            actual: envelope.len(),
        });
    }

    let (nonce, rest) = envelope.split_at(config.nonce_length());
    let (tag, body) = rest.split_at(TAG_LENGTH);

    let mut buffer = Zeroizing::new(body.to_vec());
    cipher.open_detached(nonce, &mut buffer, tag)?;

    Ok(std::mem::take(&mut *buffer))
}
