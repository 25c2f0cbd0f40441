//! Configuration management for RecryptLog.

use serde::{Deserialize, Serialize};
#[cfg(feature = "toml")]
use std::path::Path;

use crate::error::CoreError;

/// Height of the append log's Merkle tree unless configured otherwise.
pub const DEFAULT_TREE_HEIGHT: usize = 20;

/// Largest supported tree height; leaf indices must fit in a `u64`.
pub const MAX_TREE_HEIGHT: usize = 64;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Parameters fixed when a protocol instance is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Merkle tree height H (the tree holds 2^(H-1) leaves).
    pub tree_height: usize,
    /// Domain-separation tag scoping every key derivation.
    pub tag: u64,
    pub log_format: LogFormat,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            tree_height: DEFAULT_TREE_HEIGHT,
            tag: 1,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ProtocolConfig {
    #[cfg(feature = "toml")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject heights the Merkle witness cannot address.
    pub fn validate(&self) -> crate::Result<()> {
        if self.tree_height == 0 || self.tree_height > MAX_TREE_HEIGHT {
            return Err(CoreError::InvalidConfig(format!(
                "tree_height must be within 1..={}, got {}",
                MAX_TREE_HEIGHT, self.tree_height
            )));
        }
        Ok(())
    }
}
