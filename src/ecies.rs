// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES Encrypt / Decrypt
//!
//! Composes a fresh ephemeral key, ECDH, key derivation and the symmetric
//! envelope into public-key encryption towards a recipient's long-term key.
//!
//! ## Envelope
//!
//! ```text
//! ephemeral_pubkey (65, uncompressed SEC1) | nonce (N) | tag (16) | ciphertext
//! ```
//!
//! The envelope names neither the cipher nor the key derivation; the
//! recipient must decrypt with the same [`Config`] the sender used.
//!
//! ## Protocol Flow
//!
//! 1. Sender generates an ephemeral key pair (never reused)
//! 2. Sender derives the symmetric key from ECDH(ephemeral, recipient)
//! 3. Sender seals the plaintext and prefixes the ephemeral public key
//! 4. Recipient validates the ephemeral key before any decryption attempt
//! 5. Recipient derives the same key and opens the envelope

use crate::config::Config;
use crate::curve::UNCOMPRESSED_POINT_LENGTH;
use crate::ecdh;
use crate::error::{EciesError, Result};
use crate::kdf;
use crate::private_key::PrivateKey;
use crate::public_key::PublicKey;
use crate::symmetric;
use tracing::debug;

/// Smallest envelope [`decrypt`] accepts for `config`
pub fn min_envelope_length(config: &Config) -> usize {
    UNCOMPRESSED_POINT_LENGTH + symmetric::min_envelope_length(config)
}

/// Encrypt `plaintext` for `recipient`
///
/// Empty plaintext is refused rather than encrypted. Its envelope would be
/// exactly `65 + nonce + tag` bytes, which [`decrypt`] rejects as too short, so
/// it could never be opened. Every non-empty plaintext round-trips.
///
/// # Errors
///
/// - `Randomness` if the ephemeral key or nonce cannot be drawn
/// - `InvalidLength` if `plaintext` is empty
pub fn encrypt(recipient: &PublicKey, plaintext: &[u8], config: &Config) -> Result<Vec<u8>> {
    debug!(
        "ECIES encrypt: {} bytes with {} (nonce {} bytes, kdf {})",
        plaintext.len(),
        config.symmetric_algorithm(),
        config.nonce_length(),
        config.key_derivation()
    );

    let ephemeral = PrivateKey::generate()?;
    let material = ecdh::unsafe_agree(&ephemeral, recipient)?;
    let key = kdf::derive_key(material.as_bytes(), config.key_derivation())?;

    let sealed = symmetric::seal(&key[..], plaintext, config)?;

    let mut envelope = Vec::with_capacity(UNCOMPRESSED_POINT_LENGTH + sealed.len());
    envelope.extend_from_slice(&ephemeral.public_key().to_bytes());
    envelope.extend_from_slice(&sealed);

    Ok(envelope)
}

/// Decrypt an envelope produced by [`encrypt`]
///
/// # Errors
///
/// - `InvalidLength` if the envelope is not longer than `65 + nonce + tag`
/// - any [`PublicKey::from_bytes`] error for a malformed or off-curve
///   ephemeral key
/// - `Authentication` if the envelope was tampered with or the key is wrong
pub fn decrypt(recipient: &PrivateKey, envelope: &[u8], config: &Config) -> Result<Vec<u8>> {
    let minimum = min_envelope_length(config);
    if envelope.len() < minimum {
        return Err(EciesError::InvalidLength {
            minimum,
            actual: envelope.len(),
        });
    }

    debug!(
        "ECIES decrypt: {} byte envelope with {}",
        envelope.len(),
        config.symmetric_algorithm()
    );

    let (ephemeral_bytes, sealed) = envelope.split_at(UNCOMPRESSED_POINT_LENGTH);
    let ephemeral = PublicKey::from_bytes(ephemeral_bytes)?;

    let material = ecdh::unsafe_agree(recipient, &ephemeral)?;
    let key = kdf::derive_key(material.as_bytes(), config.key_derivation())?;

    symmetric::open(&key[..], sealed, config).map_err(|e| {
        if e == EciesError::Authentication {
            debug!("ECIES decrypt: authentication failed");
        }
        e
    })
}

/// [`encrypt`] towards a hex-encoded recipient public key
pub fn encrypt_to_hex_key(
    recipient_hex: &str,
    plaintext: &[u8],
    config: &Config,
) -> Result<Vec<u8>> {
    let recipient = PublicKey::from_hex(recipient_hex)?;
    encrypt(&recipient, plaintext, config)
}

/// [`decrypt`] with a hex-encoded recipient private key
pub fn decrypt_with_hex_key(
    recipient_hex: &str,
    envelope: &[u8],
    config: &Config,
) -> Result<Vec<u8>> {
    let recipient = PrivateKey::from_hex(recipient_hex)?;
    decrypt(&recipient, envelope, config)
}
