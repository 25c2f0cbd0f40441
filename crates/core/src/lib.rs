//! Core functionality shared across the RecryptLog workspace.
//!
//! This crate provides protocol configuration, structured logging
//! initialisation, and the core error type used by the crypto crate.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{LogFormat, ProtocolConfig, DEFAULT_TREE_HEIGHT, MAX_TREE_HEIGHT};
pub use error::{CoreError, Result};
