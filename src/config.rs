// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Envelope configuration
//!
//! `Config` is an immutable value passed to every encrypt/decrypt call. The
//! envelope carries no algorithm identifier, so both sides must agree on the
//! same `Config` out of band.

use crate::error::{EciesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Default AES-256-GCM nonce length, compatible with other ECIES implementations
pub const DEFAULT_AES_NONCE_LENGTH: usize = 16;

/// XChaCha20-Poly1305 nonce length, fixed by the primitive
pub const XCHACHA20_NONCE_LENGTH: usize = 24;

/// AES-256-GCM nonce lengths accepted by [`Config::new`]
pub const SUPPORTED_AES_NONCE_LENGTHS: [usize; 2] = [12, 16];

/// Authenticated cipher used for the symmetric part of the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymmetricAlgorithm {
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "xchacha20-poly1305", alias = "xchacha20")]
    XChaCha20Poly1305,
}

impl SymmetricAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            SymmetricAlgorithm::Aes256Gcm => "aes-256-gcm",
            SymmetricAlgorithm::XChaCha20Poly1305 => "xchacha20-poly1305",
        }
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetricAlgorithm {
    type Err = EciesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-256-gcm" => Ok(SymmetricAlgorithm::Aes256Gcm),
            "xchacha20-poly1305" | "xchacha20" => Ok(SymmetricAlgorithm::XChaCha20Poly1305),
            other => Err(EciesError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// How the ECDH shared-secret material becomes a symmetric key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyDerivation {
    /// Single SHA-256 over the material
    #[default]
    #[serde(rename = "sha256")]
    Sha256,
    /// HKDF-SHA256 with no salt and no info
    #[serde(rename = "hkdf-sha256")]
    HkdfSha256,
}

impl KeyDerivation {
    pub fn name(&self) -> &'static str {
        match self {
            KeyDerivation::Sha256 => "sha256",
            KeyDerivation::HkdfSha256 => "hkdf-sha256",
        }
    }
}

impl fmt::Display for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyDerivation {
    type Err = EciesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(KeyDerivation::Sha256),
            "hkdf-sha256" | "hkdf" => Ok(KeyDerivation::HkdfSha256),
            other => Err(EciesError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Immutable ECIES configuration
///
/// Fields are private so every instance has passed validation, whether it was
/// built in code or deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", into = "RawConfig")]
pub struct Config {
    symmetric_algorithm: SymmetricAlgorithm,
    nonce_length: usize,
    key_derivation: KeyDerivation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symmetric_algorithm: SymmetricAlgorithm::Aes256Gcm,
            nonce_length: DEFAULT_AES_NONCE_LENGTH,
            key_derivation: KeyDerivation::Sha256,
        }
    }
}

impl Config {
    /// Build a config, rejecting nonce lengths the algorithm cannot use
    pub fn new(symmetric_algorithm: SymmetricAlgorithm, nonce_length: usize) -> Result<Self> {
        let valid = match symmetric_algorithm {
            SymmetricAlgorithm::Aes256Gcm => SUPPORTED_AES_NONCE_LENGTHS.contains(&nonce_length),
            SymmetricAlgorithm::XChaCha20Poly1305 => nonce_length == XCHACHA20_NONCE_LENGTH,
        };
        if !valid {
            return Err(EciesError::UnsupportedNonceLength {
                algorithm: symmetric_algorithm.name(),
                length: nonce_length,
            });
        }

        Ok(Self {
            symmetric_algorithm,
            nonce_length,
            key_derivation: KeyDerivation::default(),
        })
    }

    pub fn aes_256_gcm(nonce_length: usize) -> Result<Self> {
        Self::new(SymmetricAlgorithm::Aes256Gcm, nonce_length)
    }

    pub fn xchacha20_poly1305() -> Self {
        Self {
            symmetric_algorithm: SymmetricAlgorithm::XChaCha20Poly1305,
            nonce_length: XCHACHA20_NONCE_LENGTH,
            key_derivation: KeyDerivation::default(),
        }
    }

    /// Copy of this config using a different key derivation
    pub fn with_key_derivation(self, key_derivation: KeyDerivation) -> Self {
        Self {
            key_derivation,
            ..self
        }
    }

    pub fn symmetric_algorithm(&self) -> SymmetricAlgorithm {
        self.symmetric_algorithm
    }

    pub fn nonce_length(&self) -> usize {
        self.nonce_length
    }

    pub fn key_derivation(&self) -> KeyDerivation {
        self.key_derivation
    }

    /// Parse a config from TOML text
    ///
    /// Reads the `[ecies]` table when present, otherwise the document root.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let toml_value: toml::Value = toml::from_str(content)?;

        let table = toml_value.get("ecies").cloned().unwrap_or(toml_value);
        let config: Config = table.try_into()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        info!(
            "⚙️  ECIES config loaded from {} ({}, nonce {} bytes, kdf {})",
            path, config.symmetric_algorithm, config.nonce_length, config.key_derivation
        );

        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// - `ECIES_SYMMETRIC_ALGORITHM`: `aes-256-gcm` or `xchacha20-poly1305`
    /// - `ECIES_NONCE_LENGTH`: AES-GCM nonce length (12 or 16)
    /// - `ECIES_KEY_DERIVATION`: `sha256` or `hkdf-sha256`
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        let algorithm = match std::env::var("ECIES_SYMMETRIC_ALGORITHM") {
            Ok(val) => val.parse()?,
            Err(_) => SymmetricAlgorithm::Aes256Gcm,
        };

        let nonce_length = match std::env::var("ECIES_NONCE_LENGTH") {
            Ok(val) => val.trim().parse().map_err(|e| {
                EciesError::Config(format!("ECIES_NONCE_LENGTH is not a number: {}", e))
            })?,
            Err(_) => match algorithm {
                SymmetricAlgorithm::Aes256Gcm => DEFAULT_AES_NONCE_LENGTH,
                SymmetricAlgorithm::XChaCha20Poly1305 => XCHACHA20_NONCE_LENGTH,
            },
        };

        let key_derivation = match std::env::var("ECIES_KEY_DERIVATION") {
            Ok(val) => val.parse()?,
            Err(_) => KeyDerivation::default(),
        };

        let config = Self::new(algorithm, nonce_length)?.with_key_derivation(key_derivation);
        info!(
            "⚙️  ECIES config loaded from environment ({}, nonce {} bytes, kdf {})",
            config.symmetric_algorithm, config.nonce_length, config.key_derivation
        );

        Ok(config)
    }
}

/// Serialized form of [`Config`]; `nonce_length` may be omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawConfig {
    symmetric_algorithm: SymmetricAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nonce_length: Option<usize>,
    #[serde(default)]
    key_derivation: KeyDerivation,
}

impl TryFrom<RawConfig> for Config {
    type Error = EciesError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let nonce_length = raw.nonce_length.unwrap_or(match raw.symmetric_algorithm {
            SymmetricAlgorithm::Aes256Gcm => DEFAULT_AES_NONCE_LENGTH,
            SymmetricAlgorithm::XChaCha20Poly1305 => XCHACHA20_NONCE_LENGTH,
        });
        Ok(Config::new(raw.symmetric_algorithm, nonce_length)?
            .with_key_derivation(raw.key_derivation))
    }
}

impl From<Config> for RawConfig {
    fn from(config: Config) -> Self {
        Self {
            symmetric_algorithm: config.symmetric_algorithm,
            nonce_length: Some(config.nonce_length),
            key_derivation: config.key_derivation,
        }
    }
}
