// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Fabstir ECIES library

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Envelope format revision; bumps whenever the byte layout changes
pub const ENVELOPE_FORMAT: u32 = 1;

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "secp256k1",
    "uncompressed-public-keys",
    "hybrid-public-keys",
    "aes-256-gcm",
    "xchacha20-poly1305",
    "sha256-kdf",
    "hkdf-sha256",
    "kem",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!(
        "Fabstir ECIES {} (envelope format v{})",
        VERSION_NUMBER, ENVELOPE_FORMAT
    )
}
