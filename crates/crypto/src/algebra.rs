//! Algebra aliases and conversions.
//!
//! Baby Jubjub is defined over the BN254 scalar field, so curve coordinates
//! live in the same field the Poseidon hash and sponge operate on.

use ark_ec::{CurveGroup, PrimeGroup};
use ark_ff::{BigInteger, PrimeField};

/// Element of the hash/sponge field (BN254 `Fr`, Baby Jubjub base field).
pub type FieldElement = ark_bn254::Fr;

/// Exponent-space element of the prime-order Baby Jubjub subgroup.
pub type Scalar = ark_ed_on_bn254::Fr;

/// Point on Baby Jubjub.
pub type GroupElement = ark_ed_on_bn254::EdwardsProjective;

/// Affine form of [`GroupElement`].
pub type GroupAffine = ark_ed_on_bn254::EdwardsAffine;

/// The fixed subgroup generator G.
pub fn generator() -> GroupElement {
    GroupElement::generator()
}

/// `s·G`
pub fn scale_generator(scalar: &Scalar) -> GroupElement {
    generator() * scalar
}

/// Affine coordinates `[x, y]` of a point.
pub fn group_to_fields(point: &GroupElement) -> [FieldElement; 2] {
    let affine = point.into_affine();
    [affine.x, affine.y]
}

/// Reduce a field element's little-endian bit decomposition into a scalar.
pub fn scalar_from_bits(value: &FieldElement) -> Scalar {
    let bits = value.into_bigint().to_bits_le();
    let bytes: Vec<u8> = bits
        .chunks(8)
        .map(|byte| {
            byte.iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << i))
        })
        .collect();
    Scalar::from_le_bytes_mod_order(&bytes)
}

/// Embed a scalar into the hash field.
///
/// Lossless: the subgroup order is smaller than the BN254 modulus.
pub fn scalar_to_field(scalar: &Scalar) -> FieldElement {
    FieldElement::from_le_bytes_mod_order(&scalar.into_bigint().to_bytes_le())
}
