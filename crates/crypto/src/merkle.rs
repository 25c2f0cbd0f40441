//! Poseidon Merkle witnesses for the append log.
//!
//! The protocol core never stores leaves: it only checks a caller-supplied
//! [`MerkleWitness`] and recomputes the root over a new leaf. [`MerkleTree`]
//! is a sparse in-memory tree for hosts and tests that need to act as the
//! external maintainer.
//!
//! A tree of height H has H levels including the root, so it holds
//! 2^(H-1) leaves and every witness carries H-1 siblings.

use std::collections::HashMap;

use ark_ff::Zero;

use crate::algebra::FieldElement;
use crate::error::{PreError, PreResult};
use crate::poseidon::poseidon_hash_2;

/// Leaf slots in a tree of `height`.
pub fn leaf_capacity(height: usize) -> u64 {
    match height {
        0 => 0,
        h if h - 1 >= 64 => u64::MAX,
        h => 1u64 << (h - 1),
    }
}

/// Hash of an all-empty subtree at each level, leaves first.
fn zero_hashes(height: usize) -> PreResult<Vec<FieldElement>> {
    let mut zeros = Vec::with_capacity(height);
    let mut current = FieldElement::zero();
    zeros.push(current);
    for _ in 1..height {
        current = poseidon_hash_2(current, current)?;
        zeros.push(current);
    }
    Ok(zeros)
}

/// Root of a tree of `height` whose leaves are all zero.
pub fn empty_root(height: usize) -> PreResult<FieldElement> {
    if height == 0 {
        return Err(PreError::Config("tree height must be at least 1".to_string()));
    }
    let zeros = zero_hashes(height)?;
    Ok(zeros[height - 1])
}

/// One level of an authentication path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathElement {
    pub sibling: FieldElement,
    /// Whether the node on the path is the left child at this level.
    pub is_left: bool,
}

/// Authentication path from one leaf to the root, bottom-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleWitness {
    pub path: Vec<PathElement>,
}

impl MerkleWitness {
    pub fn new(path: Vec<PathElement>) -> Self {
        Self { path }
    }

    /// Height of the tree this witness was cut from.
    pub fn height(&self) -> usize {
        self.path.len() + 1
    }

    /// Leaf index proven by this path.
    ///
    /// A right turn above level 63 cannot be addressed by a `u64` index.
    pub fn index(&self) -> PreResult<u64> {
        self.path
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.is_left)
            .try_fold(0u64, |acc, (level, _)| {
                u32::try_from(level)
                    .ok()
                    .and_then(|shift| 1u64.checked_shl(shift))
                    .map(|bit| acc | bit)
                    .ok_or(PreError::MalformedWitness {
                        expected: recryptlog_core::MAX_TREE_HEIGHT - 1,
                        actual: self.path.len(),
                    })
            })
    }

    /// Root of the tree with `leaf` placed at [`index`](Self::index).
    pub fn compute_root(&self, leaf: FieldElement) -> PreResult<FieldElement> {
        self.path.iter().try_fold(leaf, |current, element| {
            if element.is_left {
                poseidon_hash_2(current, element.sibling)
            } else {
                poseidon_hash_2(element.sibling, current)
            }
        })
    }

    pub(crate) fn check_height(&self, height: usize) -> PreResult<()> {
        if self.height() != height {
            return Err(PreError::MalformedWitness {
                expected: height.saturating_sub(1),
                actual: self.path.len(),
            });
        }
        Ok(())
    }
}

/// Sparse Poseidon Merkle tree holding only non-empty nodes.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    height: usize,
    zeros: Vec<FieldElement>,
    nodes: HashMap<(usize, u64), FieldElement>,
}

impl MerkleTree {
    pub fn new(height: usize) -> PreResult<Self> {
        if height == 0 || height > recryptlog_core::MAX_TREE_HEIGHT {
            return Err(PreError::Config(format!(
                "tree height must be within 1..={}, got {}",
                recryptlog_core::MAX_TREE_HEIGHT,
                height
            )));
        }
        Ok(Self {
            height,
            zeros: zero_hashes(height)?,
            nodes: HashMap::new(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn capacity(&self) -> u64 {
        leaf_capacity(self.height)
    }

    fn node(&self, level: usize, index: u64) -> FieldElement {
        self.nodes
            .get(&(level, index))
            .copied()
            .unwrap_or(self.zeros[level])
    }

    fn check_index(&self, index: u64) -> PreResult<()> {
        if index >= self.capacity() {
            return Err(PreError::LogFull {
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    pub fn root(&self) -> FieldElement {
        self.node(self.height - 1, 0)
    }

    pub fn get_leaf(&self, index: u64) -> PreResult<FieldElement> {
        self.check_index(index)?;
        Ok(self.node(0, index))
    }

    pub fn set_leaf(&mut self, index: u64, leaf: FieldElement) -> PreResult<()> {
        self.check_index(index)?;
        self.nodes.insert((0, index), leaf);
        let mut current = index;
        for level in 1..self.height {
            current >>= 1;
            let left = self.node(level - 1, current * 2);
            let right = self.node(level - 1, current * 2 + 1);
            self.nodes.insert((level, current), poseidon_hash_2(left, right)?);
        }
        Ok(())
    }

    pub fn witness(&self, index: u64) -> PreResult<MerkleWitness> {
        self.check_index(index)?;
        let mut path = Vec::with_capacity(self.height - 1);
        let mut current = index;
        for level in 0..self.height - 1 {
            let is_left = current % 2 == 0;
            let sibling_index = if is_left { current + 1 } else { current - 1 };
            path.push(PathElement {
                sibling: self.node(level, sibling_index),
                is_left,
            });
            current >>= 1;
        }
        Ok(MerkleWitness::new(path))
    }
}
