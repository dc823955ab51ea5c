// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! secp256k1 Public Keys
//!
//! Decoding is the invalid-curve-attack gate: every byte string accepted here
//! has canonical coordinates (`X, Y < P`) and satisfies `Y^2 = X^3 + 7`.
//!
//! **Accepted SEC1 tags**:
//! ```text
//! 0x04        uncompressed  [tag | X (32) | Y (32)]
//! 0x06 / 0x07 hybrid        same layout, tag also states Y parity (even / odd)
//! ```
//!
//! Compressed points (`0x02`/`0x03`) are rejected with `UnsupportedFormat`.
//! Encoding always produces the 65-byte uncompressed form.

use crate::curve::{is_canonical_field_element, FIELD_BYTES, UNCOMPRESSED_POINT_LENGTH};
use crate::error::{EciesError, Result};
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, FieldBytes};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;

const TAG_UNCOMPRESSED: u8 = 0x04;
const TAG_HYBRID_EVEN: u8 = 0x06;
const TAG_HYBRID_ODD: u8 = 0x07;

/// A validated point on secp256k1
#[derive(Clone, Copy)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Decode a SEC1 uncompressed or hybrid public key
    ///
    /// # Errors
    ///
    /// - `Encoding` if the input is empty or not 65 bytes for its tag
    /// - `UnsupportedFormat` for any tag other than `0x04`, `0x06`, `0x07`
    /// - `InvalidPoint` if a coordinate is `>= P`, the hybrid parity hint is
    ///   wrong, or the point is not on the curve
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let tag = *raw
            .first()
            .ok_or_else(|| EciesError::Encoding("public key is empty".to_string()))?;

        if !matches!(tag, TAG_UNCOMPRESSED | TAG_HYBRID_EVEN | TAG_HYBRID_ODD) {
            return Err(EciesError::UnsupportedFormat { tag });
        }

        if raw.len() != UNCOMPRESSED_POINT_LENGTH {
            return Err(EciesError::Encoding(format!(
                "public key must be {} bytes, got {}",
                UNCOMPRESSED_POINT_LENGTH,
                raw.len()
            )));
        }

        let mut x = [0u8; FIELD_BYTES];
        let mut y = [0u8; FIELD_BYTES];
        x.copy_from_slice(&raw[1..1 + FIELD_BYTES]);
        y.copy_from_slice(&raw[1 + FIELD_BYTES..]);

        if !is_canonical_field_element(&x) || !is_canonical_field_element(&y) {
            return Err(EciesError::InvalidPoint("coordinate is not below the field prime"));
        }

        if tag != TAG_UNCOMPRESSED {
            let y_is_odd = y[FIELD_BYTES - 1] & 1 == 1;
            if y_is_odd != (tag == TAG_HYBRID_ODD) {
                return Err(EciesError::InvalidPoint("hybrid tag does not match Y parity"));
            }
        }

        // k256 re-checks the field range and verifies the curve equation
        let encoded = EncodedPoint::from_affine_coordinates(
            FieldBytes::from_slice(&x),
            FieldBytes::from_slice(&y),
            false,
        );
        let inner = Option::<k256::PublicKey>::from(k256::PublicKey::from_encoded_point(&encoded))
            .ok_or(EciesError::InvalidPoint("point is not on the curve"))?;

        Ok(Self { inner })
    }

    /// Decode a hex public key; a `0x` prefix is accepted
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))?;
        Self::from_bytes(&bytes)
    }

    /// 65-byte uncompressed encoding `0x04 || X || Y`
    pub fn to_bytes(&self) -> [u8; UNCOMPRESSED_POINT_LENGTH] {
        let encoded = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_POINT_LENGTH];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Lowercase hex of [`PublicKey::to_bytes`], always starting with `04`
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Big-endian X coordinate
    pub fn x(&self) -> [u8; FIELD_BYTES] {
        let mut x = [0u8; FIELD_BYTES];
        x.copy_from_slice(&self.to_bytes()[1..1 + FIELD_BYTES]);
        x
    }

    /// Big-endian Y coordinate
    pub fn y(&self) -> [u8; FIELD_BYTES] {
        let mut y = [0u8; FIELD_BYTES];
        y.copy_from_slice(&self.to_bytes()[1 + FIELD_BYTES..]);
        y
    }

    /// 33-byte SEC1 compressed encoding, `0x02`/`0x03` by Y parity then X
    pub(crate) fn to_compressed_bytes(&self) -> [u8; 1 + FIELD_BYTES] {
        let encoded = self.inner.to_encoded_point(true);
        let mut out = [0u8; 1 + FIELD_BYTES];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    pub(crate) fn as_affine(&self) -> &AffinePoint {
        self.inner.as_affine()
    }

    pub(crate) fn from_affine(point: AffinePoint) -> Result<Self> {
        let inner = k256::PublicKey::from_affine(point)
            .map_err(|_| EciesError::InvalidPoint("point at infinity"))?;
        Ok(Self { inner })
    }
}

impl ConstantTimeEq for PublicKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.x()[..].ct_eq(&other.x()[..]) & self.y()[..].ct_eq(&other.y()[..])
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = EciesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
