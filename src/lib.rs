// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fabstir ECIES
//!
//! Elliptic Curve Integrated Encryption Scheme over secp256k1. A sender who
//! knows only the recipient's public key produces an authenticated envelope
//! that only the matching private key can open.
//!
//! ## Envelope Layout
//!
//! ```text
//! ephemeral public key (65) | nonce (12, 16 or 24) | tag (16) | ciphertext
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use fabstir_ecies::{decrypt, encrypt, Config, PrivateKey};
//!
//! # fn main() -> Result<(), fabstir_ecies::EciesError> {
//! let recipient = PrivateKey::generate()?;
//! let config = Config::default();
//!
//! let envelope = encrypt(recipient.public_key(), b"hello", &config)?;
//! assert_eq!(decrypt(&recipient, &envelope, &config)?, b"hello");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod curve;
pub mod ecdh;
pub mod ecies;
pub mod error;
pub mod kdf;
pub mod private_key;
pub mod public_key;
pub mod symmetric;
pub mod version;

pub use config::{Config, KeyDerivation, SymmetricAlgorithm};
pub use ecdh::SharedSecretMaterial;
pub use ecies::{decrypt, decrypt_with_hex_key, encrypt, encrypt_to_hex_key, min_envelope_length};
pub use error::{EciesError, Result};
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
