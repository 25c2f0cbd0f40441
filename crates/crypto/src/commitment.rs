//! Masked symmetric-key commitment and protocol setup.
//!
//! Setup samples a fresh symmetric key `K = s·G`, publishes only
//! `K + h·G` and `Poseidon(K.x, K.y)`, and discards `s`. Every later
//! operation must rebuild `K` and pass [`check_key`] before using it.

use ark_std::UniformRand;
use rand::{CryptoRng, RngCore};
use recryptlog_core::{ProtocolConfig, MAX_TREE_HEIGHT};
use tracing::{info, warn};
use zeroize::Zeroize;

use crate::algebra::{group_to_fields, scale_generator, FieldElement, GroupElement, Scalar};
use crate::error::{PreError, PreResult};
use crate::identity::Identity;
use crate::kdf::Capability;
use crate::merkle::empty_root;
use crate::poseidon::poseidon_hash;
use crate::state::{ProtocolState, STATE_VERSION};

/// The unmasked symmetric key, a curve point.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SymmetricKey(GroupElement);

impl SymmetricKey {
    pub fn from_point(point: GroupElement) -> Self {
        Self(point)
    }

    pub fn point(&self) -> GroupElement {
        self.0
    }

    /// Sponge key material `[K.x, K.y]`.
    pub fn key_fields(&self) -> [FieldElement; 2] {
        group_to_fields(&self.0)
    }

    /// Integrity commitment `Poseidon(K.x, K.y)`.
    pub fn commitment(&self) -> PreResult<FieldElement> {
        poseidon_hash(&self.key_fields())
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Assert the recovered key matches the commitment stored at setup.
pub fn check_key(state: &ProtocolState, key: &SymmetricKey) -> PreResult<()> {
    if key.commitment()? != state.sym_key_hash {
        warn!("recovered symmetric key failed the integrity check");
        return Err(PreError::KeyIntegrity);
    }
    Ok(())
}

/// Assert the capability is scoped to the tag fixed at setup.
pub fn check_tag(state: &ProtocolState, capability: &Capability) -> PreResult<()> {
    if capability.tag() != state.tag {
        warn!("capability tag differs from the tag fixed at setup");
        return Err(PreError::TagMismatch);
    }
    Ok(())
}

/// Rebuild `K = encryptedSymmetricKey − h·G` from the owner's capability.
pub fn recover_owner_key(state: &ProtocolState, owner: &Capability) -> PreResult<SymmetricKey> {
    check_tag(state, owner)?;
    let key = SymmetricKey(state.encrypted_symmetric_key - owner.blinding_point()?);
    check_key(state, &key)?;
    Ok(key)
}

/// Initialise a protocol instance for `owner` under `tag`.
///
/// `initial_root` must be the root of an empty tree of `tree_height`.
pub fn setup<R: RngCore + CryptoRng>(
    tree_height: usize,
    initial_root: FieldElement,
    owner: &Identity,
    tag: FieldElement,
    rng: &mut R,
) -> PreResult<ProtocolState> {
    if tree_height == 0 || tree_height > MAX_TREE_HEIGHT {
        return Err(PreError::Config(format!(
            "tree height must be within 1..={}, got {}",
            MAX_TREE_HEIGHT, tree_height
        )));
    }
    if initial_root != empty_root(tree_height)? {
        warn!(tree_height, "initial root is not the canonical empty root");
        return Err(PreError::Config(format!(
            "initial root is not the empty-tree root for height {}",
            tree_height
        )));
    }

    let mut secret = Scalar::rand(rng);
    let key = SymmetricKey(scale_generator(&secret));
    secret.zeroize();

    let blinding_point = Capability::new(tag, owner).blinding_point()?;

    let state = ProtocolState {
        version: STATE_VERSION,
        tag,
        tree_height,
        encrypted_symmetric_key: key.point() + blinding_point,
        sym_key_hash: key.commitment()?,
        tree_root: initial_root,
        next_index: 0,
        re_encrypted_key: None,
    };
    info!(tree_height, "protocol instance set up");
    Ok(state)
}

/// [`setup`] with height and tag taken from configuration.
pub fn setup_from_config<R: RngCore + CryptoRng>(
    config: &ProtocolConfig,
    initial_root: FieldElement,
    owner: &Identity,
    rng: &mut R,
) -> PreResult<ProtocolState> {
    config
        .validate()
        .map_err(|e| PreError::Config(e.to_string()))?;
    setup(
        config.tree_height,
        initial_root,
        owner,
        FieldElement::from(config.tag),
        rng,
    )
}
