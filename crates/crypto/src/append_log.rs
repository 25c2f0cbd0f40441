//! Authenticated append-only log of encrypted leaves.
//!
//! The state commits to the tree only through `tree_root` and `next_index`.
//! Each append encrypts one field element under `K`, checks the witness
//! proves the next free slot and opens the committed root with that slot
//! empty, and advances the root. A witness for any other slot, or with
//! siblings the committed tree does not hold, is rejected; at most one append
//! can advance a given `next_index`.

use ark_ff::Zero;
use tracing::{debug, info, warn};

use crate::algebra::{FieldElement, GroupElement};
use crate::cipher::SpongeCipher;
use crate::commitment::{recover_owner_key, SymmetricKey};
use crate::error::{PreError, PreResult};
use crate::identity::Identity;
use crate::kdf::Capability;
use crate::merkle::MerkleWitness;
use crate::rekey::recover_delegate_key;
use crate::state::ProtocolState;

/// Who is asking to decrypt.
#[derive(Debug)]
pub enum KeyHolder<'a> {
    /// The owner, through its tag-scoped capability.
    Owner(&'a Capability),
    /// The delegate named by the state's re-encrypted key.
    Delegate {
        identity: &'a Identity,
        owner_public: GroupElement,
    },
}

/// Result of a successful append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
    pub state: ProtocolState,
    /// Encrypted leaf to hand to the Merkle maintainer at `state.next_index - 1`.
    pub leaf: FieldElement,
    pub index: u64,
}

/// Encrypt `plaintext` and commit it at the next free index.
pub fn append(
    state: &ProtocolState,
    plaintext: FieldElement,
    witness: &MerkleWitness,
    owner: &Capability,
) -> PreResult<Appended> {
    let key = recover_owner_key(state, owner)?;
    let leaf = plaintext + SpongeCipher::new(&key).keystream_element()?;

    witness.check_height(state.tree_height)?;
    let capacity = state.capacity();
    if state.next_index >= capacity {
        warn!(capacity, "append rejected: log is full");
        return Err(PreError::LogFull { capacity });
    }
    let index = witness.index()?;
    if index != state.next_index {
        warn!(
            expected = state.next_index,
            actual = index,
            "append rejected: witness index out of sequence"
        );
        return Err(PreError::Sequence {
            expected: state.next_index,
            actual: index,
        });
    }

    // The slot at `next_index` is still empty in the committed tree.
    if witness.compute_root(FieldElement::zero())? != state.tree_root {
        warn!(index, "append rejected: witness does not match committed root");
        return Err(PreError::StaleWitness);
    }

    let mut next = state.clone();
    next.tree_root = witness.compute_root(leaf)?;
    next.next_index = state.next_index + 1;
    info!(index, next_index = next.next_index, "appended encrypted leaf");
    Ok(Appended {
        state: next,
        leaf,
        index,
    })
}

/// Recover the symmetric key as owner or delegate, integrity-checked.
pub fn recover_key(state: &ProtocolState, holder: KeyHolder<'_>) -> PreResult<SymmetricKey> {
    match holder {
        KeyHolder::Owner(capability) => recover_owner_key(state, capability),
        KeyHolder::Delegate {
            identity,
            owner_public,
        } => recover_delegate_key(state, identity, &owner_public),
    }
}

/// Decrypt one log leaf as owner or delegate.
pub fn decrypt_leaf(
    state: &ProtocolState,
    leaf: FieldElement,
    holder: KeyHolder<'_>,
) -> PreResult<FieldElement> {
    let key = recover_key(state, holder)?;
    let plaintext = leaf - SpongeCipher::new(&key).keystream_element()?;
    debug!("decrypted log leaf");
    Ok(plaintext)
}
