//! Proxy re-encryption key generation and delegate recovery.
//!
//! The owner rebuilds `K` and blinds it for a single delegate:
//!
//! - static: `K + ownerSecret·delegatePublic`, which the delegate unblinds
//!   with `delegateSecret·ownerPublic`;
//! - ephemeral: `K + r·delegatePublic` alongside `R = r·G`, unblinded with
//!   `delegateSecret·R`. A fresh `r` per call keeps separate delegations
//!   unlinkable.
//!
//! Whoever relays the re-encrypted key only sees a blinded point.

use ark_std::UniformRand;
use rand::{CryptoRng, RngCore};
use tracing::{info, warn};
use zeroize::Zeroize;

use crate::algebra::{scale_generator, GroupElement, Scalar};
use crate::commitment::{check_key, recover_owner_key, SymmetricKey};
use crate::error::{PreError, PreResult};
use crate::identity::Identity;
use crate::kdf::Capability;
use crate::state::{ProtocolState, ReEncryptedKey};

/// Re-encrypt the symmetric key for `delegate_public` using the static
/// owner/delegate Diffie-Hellman point.
pub fn generate_rekey(
    state: &ProtocolState,
    owner: &Capability,
    delegate_public: &GroupElement,
) -> PreResult<ProtocolState> {
    let key = recover_owner_key(state, owner)?;
    let shared = owner.shared_secret(delegate_public);

    let mut next = state.clone();
    next.re_encrypted_key = Some(ReEncryptedKey {
        point: key.point() + shared,
        ephemeral: None,
    });
    info!("generated static re-encryption key");
    Ok(next)
}

/// Re-encrypt the symmetric key for `delegate_public` under a fresh
/// ephemeral scalar.
pub fn generate_rekey_ephemeral<R: RngCore + CryptoRng>(
    state: &ProtocolState,
    owner: &Capability,
    delegate_public: &GroupElement,
    rng: &mut R,
) -> PreResult<ProtocolState> {
    let key = recover_owner_key(state, owner)?;
    let mut r = Scalar::rand(rng);
    let blind = *delegate_public * r;
    let ephemeral = scale_generator(&r);
    r.zeroize();

    let mut next = state.clone();
    next.re_encrypted_key = Some(ReEncryptedKey {
        point: key.point() + blind,
        ephemeral: Some(ephemeral),
    });
    info!("generated ephemeral re-encryption key");
    Ok(next)
}

/// Recover `K` as the delegate named in the state's re-encrypted key.
pub fn recover_delegate_key(
    state: &ProtocolState,
    delegate: &Identity,
    owner_public: &GroupElement,
) -> PreResult<SymmetricKey> {
    let re_key = state.re_encrypted_key.ok_or_else(|| {
        warn!("delegate recovery requested without a re-encrypted key");
        PreError::NoDelegation
    })?;
    let unblind = match re_key.ephemeral {
        Some(ephemeral) => delegate.shared_secret(&ephemeral),
        None => delegate.shared_secret(owner_public),
    };
    let key = SymmetricKey::from_point(re_key.point - unblind);
    check_key(state, &key)?;
    Ok(key)
}
