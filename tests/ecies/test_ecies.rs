// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES Encrypt/Decrypt Tests
//!
//! End-to-end behaviour of the facade: round-trips for every configuration,
//! envelope uniqueness, tamper detection across all envelope regions and
//! the minimum-length boundary.

use fabstir_ecies::{
    decrypt, decrypt_with_hex_key, encrypt, encrypt_to_hex_key, min_envelope_length, Config,
    EciesError, KeyDerivation, PrivateKey,
};
use proptest::prelude::*;

const TESTING_MESSAGE: &str = "helloworld";
const TESTING_JSON_MESSAGE: &str = r#"{"code":0,"msg":"ok","data":{"pageNumber":1,"pageSize":10,"total":0,"list":[],"realTotal":0}}"#;
const RECEIVER_PUBKEY_HEX: &str = "0498afe4f150642cd05cc9d2fa36458ce0a58567daeaf5fde7333ba9b403011140\
                                   a4e28911fcf83ab1f457a30b4959efc4b9306f514a4c3711a16a80e3b47eb58b";
const RECEIVER_PRIVKEY_HEX: &str = "95d3c5e483e9b1d4f5fc8e79b2deaf51362980de62dbb082a9a4257eef653d7d";

fn all_configs() -> Vec<Config> {
    let mut configs = Vec::new();
    for base in [
        Config::default(),
        Config::aes_256_gcm(12).unwrap(),
        Config::xchacha20_poly1305(),
    ] {
        configs.push(base);
        configs.push(base.with_key_derivation(KeyDerivation::HkdfSha256));
    }
    configs
}

#[test]
fn test_encrypt_and_decrypt() {
    let recipient = PrivateKey::from_hex(RECEIVER_PRIVKEY_HEX).unwrap();

    for config in all_configs() {
        for message in [TESTING_MESSAGE, TESTING_JSON_MESSAGE] {
            let envelope = encrypt(recipient.public_key(), message.as_bytes(), &config).unwrap();
            assert_eq!(
                envelope.len(),
                65 + config.nonce_length() + 16 + message.len()
            );

            let plaintext = decrypt(&recipient, &envelope, &config).unwrap();
            assert_eq!(plaintext, message.as_bytes());
        }
    }
}

#[test]
fn test_hex_key_helpers() {
    let config = Config::default();
    let envelope = encrypt_to_hex_key(RECEIVER_PUBKEY_HEX, TESTING_MESSAGE.as_bytes(), &config)
        .unwrap();
    let plaintext = decrypt_with_hex_key(RECEIVER_PRIVKEY_HEX, &envelope, &config).unwrap();
    assert_eq!(plaintext, TESTING_MESSAGE.as_bytes());

    assert!(matches!(
        encrypt_to_hex_key("zz", b"x", &config),
        Err(EciesError::Encoding(_))
    ));
}

#[test]
fn test_envelopes_are_unique() {
    let recipient = PrivateKey::generate().unwrap();
    let config = Config::default();

    let a = encrypt(recipient.public_key(), b"same plaintext", &config).unwrap();
    let b = encrypt(recipient.public_key(), b"same plaintext", &config).unwrap();

    assert_ne!(a, b);
    // Fresh ephemeral key each time
    assert_ne!(a[..65], b[..65]);
    // Fresh nonce each time
    assert_ne!(a[65..81], b[65..81]);
}

#[test]
fn test_ephemeral_key_is_valid_point() {
    let recipient = PrivateKey::generate().unwrap();
    let envelope = encrypt(recipient.public_key(), b"payload", &Config::default()).unwrap();

    let ephemeral = fabstir_ecies::PublicKey::from_bytes(&envelope[..65]).unwrap();
    assert_ne!(&ephemeral, recipient.public_key());
}

#[test]
fn test_every_bit_flip_is_detected() {
    let recipient = PrivateKey::generate().unwrap();

    for config in [Config::default(), Config::xchacha20_poly1305()] {
        let envelope = encrypt(recipient.public_key(), b"tamper evident", &config).unwrap();

        for i in 0..envelope.len() {
            for bit in [0x01u8, 0x80] {
                let mut tampered = envelope.clone();
                tampered[i] ^= bit;

                match decrypt(&recipient, &tampered, &config) {
                    Err(EciesError::Authentication)
                    | Err(EciesError::InvalidPoint(_))
                    | Err(EciesError::UnsupportedFormat { .. }) => {}
                    other => panic!("flip 0x{:02x} at byte {} gave {:?}", bit, i, other),
                }
            }
        }
    }
}

#[test]
fn test_tampered_ephemeral_key_rejected_before_decryption() {
    let recipient = PrivateKey::generate().unwrap();
    let config = Config::default();
    let mut envelope = encrypt(recipient.public_key(), b"payload", &config).unwrap();

    envelope[0] = 0x02;
    assert_eq!(
        decrypt(&recipient, &envelope, &config).unwrap_err(),
        EciesError::UnsupportedFormat { tag: 0x02 }
    );

    envelope[0] = 0x04;
    envelope[1..33].copy_from_slice(&[0xff; 32]);
    assert!(matches!(
        decrypt(&recipient, &envelope, &config),
        Err(EciesError::InvalidPoint(_))
    ));
}

#[test]
fn test_length_boundary() {
    let recipient = PrivateKey::generate().unwrap();

    for config in all_configs() {
        let minimum = 65 + config.nonce_length() + 16 + 1;
        assert_eq!(min_envelope_length(&config), minimum);

        // Exactly key + nonce + tag is too short
        let envelope = vec![0u8; minimum - 1];
        assert_eq!(
            decrypt(&recipient, &envelope, &config).unwrap_err(),
            EciesError::InvalidLength {
                minimum,
                actual: minimum - 1
            }
        );

        // A one-byte message produces the smallest accepted envelope
        let envelope = encrypt(recipient.public_key(), b"1", &config).unwrap();
        assert_eq!(envelope.len(), minimum);
        assert_eq!(decrypt(&recipient, &envelope, &config).unwrap(), b"1");
    }
}

#[test]
fn test_short_envelopes_rejected() {
    let recipient = PrivateKey::generate().unwrap();
    let config = Config::default();
    for len in [0usize, 1, 64, 65, 96, 97] {
        assert!(matches!(
            decrypt(&recipient, &vec![0x04; len], &config),
            Err(EciesError::InvalidLength { .. })
        ));
    }
}

#[test]
fn test_empty_plaintext_rejected() {
    let recipient = PrivateKey::generate().unwrap();

    for config in all_configs() {
        assert_eq!(
            encrypt(recipient.public_key(), b"", &config).unwrap_err(),
            EciesError::InvalidLength {
                minimum: 1,
                actual: 0
            }
        );

        // An envelope with no ciphertext would be key + nonce + tag, which decrypt refuses
        let header_only = 65 + config.nonce_length() + 16;
        assert!(matches!(
            decrypt(&recipient, &vec![0x04; header_only], &config),
            Err(EciesError::InvalidLength { actual, .. }) if actual == header_only
        ));
    }
}

#[test]
fn test_key_derivation_must_match() {
    let recipient = PrivateKey::generate().unwrap();
    let sha = Config::default();
    let hkdf = sha.with_key_derivation(KeyDerivation::HkdfSha256);

    let envelope = encrypt(recipient.public_key(), b"kdf mismatch", &sha).unwrap();
    assert_eq!(
        decrypt(&recipient, &envelope, &hkdf).unwrap_err(),
        EciesError::Authentication
    );
}

#[test]
fn test_concurrent_encrypt_decrypt() {
    let recipient = std::sync::Arc::new(PrivateKey::generate().unwrap());

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let recipient = recipient.clone();
            std::thread::spawn(move || {
                let message = vec![i; 64 + i as usize];
                let config = Config::default();
                let envelope = encrypt(recipient.public_key(), &message, &config).unwrap();
                assert_eq!(decrypt(&recipient, &envelope, &config).unwrap(), message);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_roundtrip(plaintext in proptest::collection::vec(any::<u8>(), 1..512), xchacha in any::<bool>()) {
        let recipient = PrivateKey::generate().unwrap();
        let config = if xchacha { Config::xchacha20_poly1305() } else { Config::default() };

        let envelope = encrypt(recipient.public_key(), &plaintext, &config).unwrap();
        prop_assert_eq!(decrypt(&recipient, &envelope, &config).unwrap(), plaintext);
    }

    #[test]
    fn prop_truncation_never_decrypts(plaintext in proptest::collection::vec(any::<u8>(), 1..128), cut in 1usize..64) {
        let recipient = PrivateKey::generate().unwrap();
        let config = Config::default();

        let envelope = encrypt(recipient.public_key(), &plaintext, &config).unwrap();
        let cut = cut.min(envelope.len());
        prop_assert!(decrypt(&recipient, &envelope[..envelope.len() - cut], &config).is_err());
    }
}
