//! Tag-scoped proxy re-encryption over a Poseidon sponge cipher, with a
//! Merkle-authenticated append-only log of encrypted entries.
//!
//! # Protocol
//!
//! - **Setup**: sample a symmetric key `K`, publish `K + h·G` where
//!   `h = derive(tag, ownerSecret)`, and commit to `Poseidon(K)`.
//! - **Append**: the owner rebuilds `K`, passes the integrity gate, encrypts
//!   one field element with the sponge keystream, and advances the tree root
//!   through a caller-supplied witness for exactly the next free index.
//! - **Re-key**: the owner blinds `K` for one delegate with a Diffie-Hellman
//!   point (static) or a fresh ephemeral scalar (hardened).
//! - **Decrypt**: owner or delegate rebuilds `K`, checks it against the
//!   commitment, and strips the keystream.
//!
//! State transitions are pure: every operation takes `&ProtocolState` and
//! returns a new state or a [`PreError`], never a partial update. The host
//! persists state, authorises callers and serialises concurrent submissions.
//!
//! # Algebra
//!
//! Baby Jubjub over BN254 (arkworks), so point coordinates are native
//! Poseidon inputs. Hashing uses light-poseidon's circom parameters.

pub mod algebra;
pub mod append_log;
pub mod cipher;
pub mod commitment;
pub mod error;
pub mod identity;
pub mod kdf;
pub mod merkle;
pub mod poseidon;
pub mod rekey;
pub mod state;

pub use algebra::{FieldElement, GroupElement, Scalar};
pub use append_log::{append, decrypt_leaf, recover_key, Appended, KeyHolder};
pub use cipher::SpongeCipher;
pub use commitment::{recover_owner_key, setup, setup_from_config, SymmetricKey};
pub use error::{PreError, PreResult};
pub use identity::Identity;
pub use kdf::{derive, Capability};
pub use merkle::{empty_root, MerkleTree, MerkleWitness, PathElement};
pub use poseidon::{poseidon_hash, PoseidonSponge};
pub use rekey::{generate_rekey, generate_rekey_ephemeral, recover_delegate_key};
pub use state::{ProtocolState, ReEncryptedKey, StateSnapshot, STATE_VERSION};
