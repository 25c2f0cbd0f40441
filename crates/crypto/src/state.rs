//! Versioned protocol state and its persisted snapshot form.
//!
//! Operations take `&ProtocolState` and return a fresh state, so a rejected
//! transition leaves the caller's copy untouched.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};

use crate::algebra::{FieldElement, GroupAffine, GroupElement};
use crate::error::{PreError, PreResult};

/// Current layout version of [`ProtocolState`].
pub const STATE_VERSION: u16 = 1;

/// Delegation capability left in state for one delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReEncryptedKey {
    /// `K + shared` (static) or `K + r·delegatePublic` (ephemeral).
    pub point: GroupElement,
    /// `r·G` when the delegation used a fresh ephemeral scalar.
    pub ephemeral: Option<GroupElement>,
}

/// Everything the host persists for one protocol instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolState {
    pub version: u16,
    pub tag: FieldElement,
    pub tree_height: usize,
    /// `K + h·G`
    pub encrypted_symmetric_key: GroupElement,
    /// `Poseidon(K.x, K.y)`
    pub sym_key_hash: FieldElement,
    pub tree_root: FieldElement,
    pub next_index: u64,
    pub re_encrypted_key: Option<ReEncryptedKey>,
}

impl ProtocolState {
    /// Number of leaf slots, `2^(H-1)`.
    pub fn capacity(&self) -> u64 {
        crate::merkle::leaf_capacity(self.tree_height)
    }

    pub fn to_snapshot(&self) -> PreResult<StateSnapshot> {
        Ok(StateSnapshot {
            version: self.version,
            tag: encode(&self.tag)?,
            tree_height: self.tree_height,
            encrypted_symmetric_key: encode_point(&self.encrypted_symmetric_key)?,
            sym_key_hash: encode(&self.sym_key_hash)?,
            tree_root: encode(&self.tree_root)?,
            next_index: self.next_index,
            re_encrypted_key: self
                .re_encrypted_key
                .map(|rk| -> PreResult<ReEncryptedKeySnapshot> {
                    Ok(ReEncryptedKeySnapshot {
                        point: encode_point(&rk.point)?,
                        ephemeral: rk.ephemeral.as_ref().map(encode_point).transpose()?,
                    })
                })
                .transpose()?,
        })
    }

    pub fn to_json(&self) -> PreResult<String> {
        serde_json::to_string(&self.to_snapshot()?)
            .map_err(|e| PreError::Snapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> PreResult<Self> {
        let snapshot: StateSnapshot =
            serde_json::from_str(json).map_err(|e| PreError::Snapshot(e.to_string()))?;
        Self::try_from(snapshot)
    }
}

/// Serde form of [`ProtocolState`]: hex of arkworks compressed encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: u16,
    pub tag: String,
    pub tree_height: usize,
    pub encrypted_symmetric_key: String,
    pub sym_key_hash: String,
    pub tree_root: String,
    pub next_index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub re_encrypted_key: Option<ReEncryptedKeySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReEncryptedKeySnapshot {
    pub point: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<String>,
}

impl TryFrom<StateSnapshot> for ProtocolState {
    type Error = PreError;

    fn try_from(snapshot: StateSnapshot) -> PreResult<Self> {
        if snapshot.version != STATE_VERSION {
            return Err(PreError::Snapshot(format!(
                "unsupported state version {}",
                snapshot.version
            )));
        }
        if snapshot.tree_height == 0 || snapshot.tree_height > recryptlog_core::MAX_TREE_HEIGHT {
            return Err(PreError::Snapshot(format!(
                "tree height {} out of range",
                snapshot.tree_height
            )));
        }
        let re_encrypted_key = snapshot
            .re_encrypted_key
            .map(|rk| -> PreResult<ReEncryptedKey> {
                Ok(ReEncryptedKey {
                    point: decode_point(&rk.point)?,
                    ephemeral: rk.ephemeral.as_deref().map(decode_point).transpose()?,
                })
            })
            .transpose()?;
        Ok(Self {
            version: snapshot.version,
            tag: decode(&snapshot.tag)?,
            tree_height: snapshot.tree_height,
            encrypted_symmetric_key: decode_point(&snapshot.encrypted_symmetric_key)?,
            sym_key_hash: decode(&snapshot.sym_key_hash)?,
            tree_root: decode(&snapshot.tree_root)?,
            next_index: snapshot.next_index,
            re_encrypted_key,
        })
    }
}

fn encode<T: CanonicalSerialize>(value: &T) -> PreResult<String> {
    let mut bytes = Vec::new();
    value
        .serialize_compressed(&mut bytes)
        .map_err(|e| PreError::Snapshot(e.to_string()))?;
    Ok(hex::encode(bytes))
}

fn decode<T: CanonicalDeserialize>(encoded: &str) -> PreResult<T> {
    let bytes = hex::decode(encoded).map_err(|e| PreError::Snapshot(e.to_string()))?;
    T::deserialize_compressed(bytes.as_slice()).map_err(|e| PreError::Snapshot(e.to_string()))
}

fn encode_point(point: &GroupElement) -> PreResult<String> {
    encode(&GroupAffine::from(*point))
}

fn decode_point(encoded: &str) -> PreResult<GroupElement> {
    let affine: GroupAffine = decode(encoded)?;
    Ok(affine.into())
}
