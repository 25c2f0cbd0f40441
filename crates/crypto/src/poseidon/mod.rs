//! Poseidon hash and duplex sponge over the BN254 scalar field.
//!
//! The fixed-arity hash is light-poseidon's circom-compatible instance. The
//! sponge reuses the same BN254 x^5 parameter set at width 3.

pub mod hash;
pub mod sponge;

pub use hash::{poseidon_hash, poseidon_hash_2, MAX_HASH_INPUTS};
pub use sponge::{PoseidonSponge, SPONGE_RATE, SPONGE_WIDTH};
