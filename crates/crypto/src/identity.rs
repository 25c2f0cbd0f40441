//! Owner and delegate identities.
//!
//! Identities are provisioned outside the protocol; this module only holds
//! the `(secret, secret·G)` pair and wipes the secret on drop.

use ark_std::UniformRand;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::algebra::{scalar_to_field, scale_generator, FieldElement, GroupElement, Scalar};

/// A secret scalar and its public point `secret·G`.
pub struct Identity {
    secret: Scalar,
    public: GroupElement,
}

impl Identity {
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self::from_secret(Scalar::rand(rng))
    }

    pub fn from_secret(secret: Scalar) -> Self {
        let public = scale_generator(&secret);
        Self { secret, public }
    }

    pub fn public(&self) -> GroupElement {
        self.public
    }

    pub(crate) fn secret(&self) -> &Scalar {
        &self.secret
    }

    /// The secret as hash-field elements, fed to key derivation.
    pub fn secret_fields(&self) -> Vec<FieldElement> {
        vec![scalar_to_field(&self.secret)]
    }

    /// Diffie-Hellman point `peer_public · secret`.
    pub fn shared_secret(&self, peer_public: &GroupElement) -> GroupElement {
        *peer_public * self.secret
    }
}

impl Drop for Identity {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
