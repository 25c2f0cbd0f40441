//! End-to-end tests for the re-encryption protocol and append log
//!
//! This suite drives the protocol the way a host would:
//! - Setup against an externally maintained empty tree
//! - Appends with witnesses served by a sparse Merkle maintainer
//! - Owner and delegate decryption of committed leaves
//! - Stale, raced and unauthorised submissions leaving state untouched
//! - State persistence through JSON snapshots

pub mod test_utils;


#[cfg(test)]
mod delegation_tests;
