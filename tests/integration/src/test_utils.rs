//! Test utilities: an in-process host holding state next to a Merkle maintainer

use rand::rngs::OsRng;
use recryptlog_core::ProtocolConfig;
use recryptlog_crypto::{
    append, empty_root, setup_from_config, Capability, FieldElement, Identity, MerkleTree,
    MerkleWitness, PreResult, ProtocolState,
};

/// Host stand-in: persists the state and applies transitions atomically.
pub struct TestHost {
    pub state: ProtocolState,
    pub tree: MerkleTree,
    pub leaves: Vec<FieldElement>,
}

impl TestHost {
    /// Set up a fresh instance for `owner` from `config`.
    pub fn new(config: &ProtocolConfig, owner: &Identity) -> Self {
        let tree = MerkleTree::new(config.tree_height).unwrap();
        let root = empty_root(config.tree_height).unwrap();
        assert_eq!(tree.root(), root);
        let state = setup_from_config(config, root, owner, &mut OsRng).unwrap();
        Self {
            state,
            tree,
            leaves: Vec::new(),
        }
    }

    /// Witness for the next free slot, as the maintainer would serve it.
    pub fn next_witness(&self) -> MerkleWitness {
        self.tree.witness(self.state.next_index).unwrap()
    }

    /// Apply an append; on failure state and tree stay as they were.
    pub fn submit_append(
        &mut self,
        plaintext: FieldElement,
        witness: &MerkleWitness,
        owner: &Capability,
    ) -> PreResult<u64> {
        let appended = append(&self.state, plaintext, witness, owner)?;
        self.tree.set_leaf(appended.index, appended.leaf)?;
        assert_eq!(self.tree.root(), appended.state.tree_root);
        self.state = appended.state;
        self.leaves.push(appended.leaf);
        Ok(appended.index)
    }

    /// Apply any state transition returned by a protocol operation.
    pub fn submit(&mut self, transition: PreResult<ProtocolState>) -> PreResult<()> {
        self.state = transition?;
        Ok(())
    }
}

/// Initialise tracing once for the test binary.
pub fn init_tracing() {
    recryptlog_core::logging::try_init_for_tests();
}

/// Small tree config used across tests.
pub fn test_config(tag: u64) -> ProtocolConfig {
    ProtocolConfig {
        tree_height: 8,
        tag,
        ..ProtocolConfig::default()
    }
}
