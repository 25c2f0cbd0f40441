//! Tag-scoped key derivation.
//!
//! `derive(tag, secret_fields) = scalar_from_bits(Poseidon(tag ++ secret_fields))`.
//! The owner recomputes the blinding scalar on every operation instead of
//! persisting it, so derivation must be deterministic. Recovering the secret
//! from `(tag, h)` reduces to inverting Poseidon.

use zeroize::Zeroize;

use crate::algebra::{
    scalar_from_bits, scalar_to_field, scale_generator, FieldElement, GroupElement, Scalar,
};
use crate::error::PreResult;
use crate::identity::Identity;
use crate::poseidon::poseidon_hash;

/// Derive the blinding scalar for `tag` and the owner's secret fields.
pub fn derive(tag: FieldElement, secret_fields: &[FieldElement]) -> PreResult<Scalar> {
    let mut inputs = Vec::with_capacity(1 + secret_fields.len());
    inputs.push(tag);
    inputs.extend_from_slice(secret_fields);
    let digest = poseidon_hash(&inputs);
    inputs.zeroize();
    Ok(scalar_from_bits(&digest?))
}

/// The `{tag, secret}` pair that both encrypts and decrypts.
///
/// This is not a keypair: nobody can encrypt *to* the holder without also
/// holding the secret. Protocol operations take a capability rather than a
/// bare [`Identity`] so the tag it was scoped to can be checked.
pub struct Capability {
    tag: FieldElement,
    secret: Scalar,
    public: GroupElement,
}

impl Capability {
    pub fn new(tag: FieldElement, identity: &Identity) -> Self {
        Self {
            tag,
            secret: *identity.secret(),
            public: identity.public(),
        }
    }

    pub fn tag(&self) -> FieldElement {
        self.tag
    }

    /// Public point of the identity behind this capability.
    pub fn public(&self) -> GroupElement {
        self.public
    }

    /// Blinding scalar `h`.
    pub fn blinding(&self) -> PreResult<Scalar> {
        derive(self.tag, &[scalar_to_field(&self.secret)])
    }

    /// Diffie-Hellman point `peer_public · secret`.
    pub fn shared_secret(&self, peer_public: &GroupElement) -> GroupElement {
        *peer_public * self.secret
    }

    /// Blinding point `h·G` masking the symmetric key.
    pub fn blinding_point(&self) -> PreResult<GroupElement> {
        Ok(scale_generator(&self.blinding()?))
    }
}

impl Drop for Capability {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capability")
            .field("tag", &self.tag)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
