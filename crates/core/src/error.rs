//! Core error types

use thiserror::Error;

/// Core error type for RecryptLog
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
