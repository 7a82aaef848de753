//! Error types for forkchain
//!
//! Ledger inconsistency is deliberately absent here: a broken chain is a
//! validation verdict (see [`crate::blockchain::BlockFault`]), not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Branch '{0}' has no blocks")]
    EmptyBranch(String),
    #[error("Branch not found: {0}")]
    BranchNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;
