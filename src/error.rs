// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES Error Types
//!
//! A single error enum covers every failure the library can surface. Nothing is
//! retried internally; each error is returned to the caller as-is.
//!
//! ## Error Variants
//!
//! - **Randomness**: the OS random source failed (fatal)
//! - **Encoding**: malformed hex or byte input
//! - **UnsupportedFormat** / **InvalidPoint**: public key tag byte or curve membership check failed
//! - **InvalidPrivateKey**: scalar is zero, not below the curve order, or wider than 32 bytes
//! - **InvalidLength**: envelope shorter than the minimum for its format
//! - **InvalidPeerKey**: no peer key was supplied to key agreement
//! - **Authentication**: AEAD tag verification failed (deliberately carries no detail)
//! - **Encryption**: the AEAD refused to encrypt
//! - **KeyLength**: symmetric key is not the length the algorithm needs
//! - **OutputTooLong**: HKDF expansion request beyond its limit
//! - **UnsupportedAlgorithm** / **UnsupportedNonceLength** / **Config**: configuration errors
//!
//! ## Usage Example
//!
//! ```rust
//! use fabstir_ecies::EciesError;
//!
//! fn check_envelope(envelope: &[u8]) -> Result<(), EciesError> {
//!     if envelope.len() <= 97 {
//!         return Err(EciesError::InvalidLength {
//!             minimum: 98,
//!             actual: envelope.len(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Errors produced by key handling, key agreement and envelope encryption
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EciesError {
    /// Secure random source unavailable or exhausted
    #[error("Secure random source failed: {0}")]
    Randomness(String),

    /// Malformed hex or byte input
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Public key uses a SEC1 tag this library does not accept
    #[error("Unsupported public key format tag 0x{tag:02x}")]
    UnsupportedFormat { tag: u8 },

    /// Public key bytes do not describe a valid secp256k1 point
    #[error("Invalid public key point: {0}")]
    InvalidPoint(&'static str),

    /// Private scalar outside `1..order`, or wider than the field
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(&'static str),

    /// Input shorter than the minimum its format requires
    #[error("Invalid length: expected at least {minimum} bytes, got {actual}")]
    InvalidLength { minimum: usize, actual: usize },

    /// Key agreement was asked to run without a peer key
    #[error("Peer public key is missing")]
    InvalidPeerKey,

    /// AEAD verification failed
    #[error("Message authentication failed")]
    Authentication,

    /// AEAD refused to encrypt (message exceeds the cipher's limit)
    #[error("Encryption failed")]
    Encryption,

    /// Symmetric key has the wrong length for the selected algorithm
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    /// Key derivation asked for more output than it can produce
    #[error("Requested {requested} bytes of key material, maximum is {maximum}")]
    OutputTooLong { maximum: usize, requested: usize },

    /// Unknown symmetric algorithm or key derivation name
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Nonce length not supported by the selected algorithm
    #[error("Unsupported nonce length {length} for {algorithm}")]
    UnsupportedNonceLength {
        algorithm: &'static str,
        length: usize,
    },

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EciesError>;

impl From<hex::FromHexError> for EciesError {
    fn from(err: hex::FromHexError) -> Self {
        EciesError::Encoding(format!("hex decode error: {}", err))
    }
}

impl From<rand::Error> for EciesError {
    fn from(err: rand::Error) -> Self {
        EciesError::Randomness(err.to_string())
    }
}
