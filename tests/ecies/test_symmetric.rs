// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Symmetric Envelope Tests
//!
//! Covers both ciphers, the `nonce | tag | ciphertext` layout, length
//! boundaries and tamper detection.

use aes_gcm::aead::{consts::U16, Aead, KeyInit};
use aes_gcm::{aes::Aes256, AesGcm, Nonce};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use fabstir_ecies::symmetric::{min_envelope_length, open, seal, TAG_LENGTH};
use fabstir_ecies::{Config, EciesError};
use rand::{rngs::OsRng, RngCore};

fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

fn all_configs() -> Vec<Config> {
    vec![
        Config::default(),
        Config::aes_256_gcm(12).unwrap(),
        Config::xchacha20_poly1305(),
    ]
}

#[test]
fn test_seal_open_roundtrip() {
    let plaintext = b"Hello, World! This is a test message.";
    for config in all_configs() {
        let key = random_key();
        let envelope = seal(&key, plaintext, &config).unwrap();

        // Ciphertext should be different from plaintext
        let body = &envelope[config.nonce_length() + TAG_LENGTH..];
        assert_ne!(body, plaintext);

        let decrypted = open(&key, &envelope, &config).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn test_layout_matches_native_aes_gcm() {
    // Reassemble `body || tag` and hand it to the primitive directly
    let key = random_key();
    let config = Config::default();
    let envelope = seal(&key, b"layout check", &config).unwrap();

    let (nonce, rest) = envelope.split_at(16);
    let (tag, body) = rest.split_at(TAG_LENGTH);
    let mut native = body.to_vec();
    native.extend_from_slice(tag);

    let cipher = AesGcm::<Aes256, U16>::new_from_slice(&key).unwrap();
    let plaintext = cipher
        .decrypt(Nonce::<U16>::from_slice(nonce), native.as_slice())
        .unwrap();
    assert_eq!(plaintext, b"layout check");
}

#[test]
fn test_layout_matches_native_xchacha() {
    let key = random_key();
    let config = Config::xchacha20_poly1305();
    let envelope = seal(&key, b"layout check", &config).unwrap();

    let (nonce, rest) = envelope.split_at(24);
    let (tag, body) = rest.split_at(TAG_LENGTH);
    let mut native = body.to_vec();
    native.extend_from_slice(tag);

    let cipher = XChaCha20Poly1305::new_from_slice(&key).unwrap();
    let plaintext = cipher
        .decrypt(XNonce::from_slice(nonce), native.as_slice())
        .unwrap();
    assert_eq!(plaintext, b"layout check");
}

#[test]
fn test_fresh_nonce_per_seal() {
    let key = random_key();
    let config = Config::default();
    let a = seal(&key, b"same message", &config).unwrap();
    let b = seal(&key, b"same message", &config).unwrap();
    assert_ne!(a[..16], b[..16]);
    assert_ne!(a, b);
}

#[test]
fn test_invalid_key_size() {
    for config in all_configs() {
        for bad in [0usize, 16, 31, 33, 64] {
            let key = vec![0u8; bad];
            assert_eq!(
                seal(&key, b"test", &config).unwrap_err(),
                EciesError::KeyLength {
                    expected: 32,
                    actual: bad
                }
            );
            assert!(matches!(
                open(&key, &[0u8; 64], &config),
                Err(EciesError::KeyLength { .. })
            ));
        }
    }
}

#[test]
fn test_length_boundary() {
    let key = random_key();
    for config in all_configs() {
        let minimum = min_envelope_length(&config);
        assert_eq!(minimum, config.nonce_length() + TAG_LENGTH + 1);

        // nonce + tag only: rejected before touching the cipher
        let too_short = vec![0u8; minimum - 1];
        assert_eq!(
            open(&key, &too_short, &config).unwrap_err(),
            EciesError::InvalidLength {
                minimum,
                actual: minimum - 1
            }
        );

        // one byte of ciphertext passes the length gate
        let envelope = seal(&key, b"x", &config).unwrap();
        assert_eq!(envelope.len(), minimum);
        assert_eq!(open(&key, &envelope, &config).unwrap(), b"x");
    }
}

#[test]
fn test_empty_plaintext_rejected() {
    let key = random_key();
    assert!(matches!(
        seal(&key, b"", &Config::default()),
        Err(EciesError::InvalidLength { .. })
    ));
}

#[test]
fn test_any_bit_flip_fails_authentication() {
    let key = random_key();
    for config in all_configs() {
        let envelope = seal(&key, b"tamper", &config).unwrap();
        for i in 0..envelope.len() {
            let mut tampered = envelope.clone();
            tampered[i] ^= 0x01;
            assert_eq!(
                open(&key, &tampered, &config).unwrap_err(),
                EciesError::Authentication,
                "flip at byte {} must not decrypt",
                i
            );
        }
    }
}

#[test]
fn test_config_mismatch_fails() {
    let key = random_key();
    let envelope = seal(&key, b"aes with 16 byte nonce", &Config::default()).unwrap();
    assert!(open(&key, &envelope, &Config::aes_256_gcm(12).unwrap()).is_err());
    assert!(open(&key, &envelope, &Config::xchacha20_poly1305()).is_err());
}

#[test]
fn test_large_message() {
    let key = random_key();
    let mut plaintext = vec![0u8; 1 << 20];
    OsRng.fill_bytes(&mut plaintext);

    for config in all_configs() {
        let envelope = seal(&key, &plaintext, &config).unwrap();
        assert_eq!(open(&key, &envelope, &config).unwrap(), plaintext);
    }
}
