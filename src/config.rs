//! Configuration management for forkchain

use crate::blockchain::DEFAULT_BRANCH;
use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File looked up in the working directory by [`load_config`].
pub const DEFAULT_CONFIG_FILE: &str = "forkchain.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    #[serde(default = "default_genesis_branch")]
    pub genesis_branch: String,
    #[serde(default = "default_delimiter")]
    pub transaction_delimiter: String,
    /// Strip surrounding whitespace from each entered transaction.
    #[serde(default)]
    pub trim_transactions: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            genesis_branch: default_genesis_branch(),
            transaction_delimiter: default_delimiter(),
            trim_transactions: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    /// Hex characters of each hash shown in the branch table; 0 shows all.
    #[serde(default)]
    pub hash_preview: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            hash_preview: 0,
        }
    }
}

fn default_genesis_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_color() -> bool {
    true
}

/// Load `forkchain.toml` from the working directory, or defaults when it is
/// absent.
pub fn load_config() -> Result<Config> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config_from(path)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = fs::read_to_string(path.as_ref())?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.ledger.transaction_delimiter.is_empty() {
            return Err(LedgerError::Config(
                "ledger.transaction_delimiter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ledger.genesis_branch, "master");
        assert_eq!(config.ledger.transaction_delimiter, ",");
        assert!(!config.ledger.trim_transactions);
        assert!(config.display.color);
        assert_eq!(config.display.hash_preview, 0);
    }

    #[test]
    fn test_partial_tables() {
        let config = parse_config(
            r#"
            [ledger]
            genesis_branch = "main"
            trim_transactions = true

            [display]
            hash_preview = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.ledger.genesis_branch, "main");
        assert_eq!(config.ledger.transaction_delimiter, ",");
        assert!(config.ledger.trim_transactions);
        assert!(config.display.color);
        assert_eq!(config.display.hash_preview, 12);
    }

    #[test]
    fn test_rejects_empty_values() {
        let err = parse_config("[ledger]\ntransaction_delimiter = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("transaction_delimiter"));
        assert!(matches!(err, LedgerError::Config(_)));

        // Branch names are taken verbatim, blank included.
        let config = parse_config("[ledger]\ngenesis_branch = \" \"\n").unwrap();
        assert_eq!(config.ledger.genesis_branch, " ");
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(parse_config("[ledger"), Err(LedgerError::Toml(_))));
    }
}
