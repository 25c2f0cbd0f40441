//! Poseidon hash functions for key derivation, commitments and Merkle nodes.

use light_poseidon::{Poseidon, PoseidonHasher};

use crate::algebra::FieldElement;
use crate::error::{PreError, PreResult};

/// Widest circom parameter set is t = 13.
pub const MAX_HASH_INPUTS: usize = 12;

/// Hash a sequence of field elements to one field element.
pub fn poseidon_hash(inputs: &[FieldElement]) -> PreResult<FieldElement> {
    if inputs.is_empty() || inputs.len() > MAX_HASH_INPUTS {
        return Err(PreError::HashError(format!(
            "Poseidon arity must be within 1..={}, got {}",
            MAX_HASH_INPUTS,
            inputs.len()
        )));
    }
    let mut hasher = Poseidon::<FieldElement>::new_circom(inputs.len())
        .map_err(|err| PreError::HashError(err.to_string()))?;
    hasher
        .hash(inputs)
        .map_err(|err| PreError::HashError(err.to_string()))
}

/// Hash two field elements together
pub fn poseidon_hash_2(a: FieldElement, b: FieldElement) -> PreResult<FieldElement> {
    poseidon_hash(&[a, b])
}
