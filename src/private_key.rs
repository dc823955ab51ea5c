// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! secp256k1 Private Keys
//!
//! A private key is a scalar `d` with `0 < d < order` together with its public
//! point `d * G`, computed once at construction.
//!
//! ## Security Considerations
//!
//! - Generation draws from the OS random source and surfaces its failures
//! - The scalar is never logged; `Debug` prints only the public key
//! - The underlying `k256::SecretKey` zeroizes itself on drop
//! - Equality runs in constant time
//!
//! ## Usage
//!
//! ```no_run
//! use fabstir_ecies::PrivateKey;
//!
//! // Load the recipient key from ECIES_PRIVATE_KEY
//! let key = PrivateKey::from_env("ECIES_PRIVATE_KEY")?;
//! println!("public key: {}", key.public_key());
//! # Ok::<(), fabstir_ecies::EciesError>(())
//! ```

use crate::curve::{CurveProvider, Secp256k1, FIELD_BYTES};
use crate::ecdh::{self, SharedSecretMaterial};
use crate::error::{EciesError, Result};
use crate::public_key::PublicKey;
use k256::{FieldBytes, NonZeroScalar, SecretKey};
use rand::{rngs::OsRng, RngCore};
use std::env;
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use tracing::info;
use zeroize::Zeroizing;

/// Draws beyond this count mean the random source is broken; a healthy one
/// lands outside `1..order` with probability about 2^-128.
const MAX_GENERATION_ATTEMPTS: usize = 64;

/// Secret scalar plus its derived public key
#[derive(Clone)]
pub struct PrivateKey {
    secret: SecretKey,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Generate a uniformly random key in `[1, order - 1]`
    ///
    /// # Errors
    ///
    /// `Randomness` if the OS random source fails.
    pub fn generate() -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; FIELD_BYTES]);
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            OsRng.try_fill_bytes(&mut bytes[..])?;
            if let Ok(secret) = SecretKey::from_bytes(FieldBytes::from_slice(&bytes[..])) {
                return Self::from_secret(secret);
            }
        }

        Err(EciesError::Randomness(
            "no valid scalar drawn from random source".to_string(),
        ))
    }

    /// Interpret `raw` as a big-endian scalar
    ///
    /// Inputs shorter than 32 bytes are left-padded, so the single byte `0x02`
    /// is the scalar 2.
    ///
    /// # Errors
    ///
    /// `InvalidPrivateKey` if `raw` is wider than 32 bytes, is zero, or is not
    /// below the curve order.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        if raw.len() > FIELD_BYTES {
            return Err(EciesError::InvalidPrivateKey("scalar is wider than 32 bytes"));
        }

        let mut padded = Zeroizing::new([0u8; FIELD_BYTES]);
        padded[FIELD_BYTES - raw.len()..].copy_from_slice(raw);

        let secret = SecretKey::from_bytes(FieldBytes::from_slice(&padded[..]))
            .map_err(|_| EciesError::InvalidPrivateKey("scalar is zero or not below the curve order"))?;

        Self::from_secret(secret)
    }

    /// Decode a hex scalar; a `0x` prefix is accepted
    ///
    /// # Errors
    ///
    /// `Encoding` on malformed hex, otherwise as [`PrivateKey::from_bytes`].
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = Zeroizing::new(hex::decode(s.strip_prefix("0x").unwrap_or(s))?);
        Self::from_bytes(&bytes)
    }

    /// Load a hex private key from the environment variable `var`
    ///
    /// Only the fact that a key was loaded is logged, never the key itself.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = Zeroizing::new(
            env::var(var)
                .map_err(|_| EciesError::Config(format!("{} environment variable not set", var)))?,
        );

        if value.trim().is_empty() {
            return Err(EciesError::Config(format!("{} is empty", var)));
        }

        let key = Self::from_hex(&value)?;
        info!("✅ Private key loaded from {} (public key {})", var, key.public_key);

        Ok(key)
    }

    fn from_secret(secret: SecretKey) -> Result<Self> {
        let public_key = PublicKey::from_affine(Secp256k1::base_mult(&secret.to_nonzero_scalar()))?;
        Ok(Self { secret, public_key })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Big-endian scalar with leading zero bytes dropped
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        let full = self.scalar_bytes();
        let start = full.iter().position(|b| *b != 0).unwrap_or(full.len());
        Zeroizing::new(full[start..].to_vec())
    }

    /// Lowercase hex of [`PrivateKey::to_bytes`]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes().as_slice())
    }

    /// ECDH followed by SHA-256; see [`ecdh::agree`]
    pub fn ecdh(&self, peer: &PublicKey) -> Result<Zeroizing<[u8; 32]>> {
        ecdh::agree(self, peer)
    }

    /// Unhashed ECDH material; see [`ecdh::unsafe_agree`]
    pub fn unsafe_ecdh(&self, peer: &PublicKey) -> Result<SharedSecretMaterial> {
        ecdh::unsafe_agree(self, peer)
    }

    /// KEM-style key towards `peer`; see [`ecdh::encapsulate`]
    pub fn encapsulate(&self, peer: &PublicKey) -> Result<Zeroizing<[u8; 32]>> {
        ecdh::encapsulate(self, peer)
    }

    fn scalar_bytes(&self) -> Zeroizing<[u8; FIELD_BYTES]> {
        let mut bytes = Zeroizing::new([0u8; FIELD_BYTES]);
        bytes.copy_from_slice(&self.secret.to_bytes());
        bytes
    }

    pub(crate) fn scalar(&self) -> NonZeroScalar {
        self.secret.to_nonzero_scalar()
    }
}

impl ConstantTimeEq for PrivateKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.scalar_bytes()[..].ct_eq(&other.scalar_bytes()[..])
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl FromStr for PrivateKey {
    type Err = EciesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
