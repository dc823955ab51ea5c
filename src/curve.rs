// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! secp256k1 curve provider
//!
//! The narrow set of curve capabilities the rest of the crate relies on: the
//! field prime plus the [`CurveProvider`] operations. [`Secp256k1`] delegates
//! all arithmetic to `k256`.

use k256::{AffinePoint, NonZeroScalar, ProjectivePoint};

/// Byte length of a field element and of a serialized scalar
pub const FIELD_BYTES: usize = 32;

/// Length of the uncompressed SEC1 point encoding (`0x04 || X || Y`)
pub const UNCOMPRESSED_POINT_LENGTH: usize = 1 + 2 * FIELD_BYTES;

/// Field prime `P = 2^256 - 2^32 - 977`, big-endian
pub const FIELD_PRIME: [u8; FIELD_BYTES] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

/// Whether a big-endian coordinate is a canonical field element (`< P`)
pub fn is_canonical_field_element(coordinate: &[u8; FIELD_BYTES]) -> bool {
    coordinate[..] < FIELD_PRIME[..]
}

/// Point arithmetic needed for key generation and key agreement
pub trait CurveProvider {
    /// Scalar in `[1, order - 1]`
    type Scalar;
    /// Affine curve point
    type Point;

    /// `d * G`
    fn base_mult(scalar: &Self::Scalar) -> Self::Point;

    /// `d * Q`
    fn scalar_mult(scalar: &Self::Scalar, point: &Self::Point) -> Self::Point;
}

/// secp256k1 backed by `k256`
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl CurveProvider for Secp256k1 {
    type Scalar = NonZeroScalar;
    type Point = AffinePoint;

    fn base_mult(scalar: &NonZeroScalar) -> AffinePoint {
        AffinePoint::from(ProjectivePoint::GENERATOR * scalar.as_ref())
    }

    fn scalar_mult(scalar: &NonZeroScalar, point: &AffinePoint) -> AffinePoint {
        AffinePoint::from(ProjectivePoint::from(*point) * scalar.as_ref())
    }
}
