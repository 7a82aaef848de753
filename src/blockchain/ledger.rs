use super::block::{Block, Transaction};
use super::validation::{check_block_against, verify_blocks, ChainReport};
use crate::error::{LedgerError, Result};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const DEFAULT_BRANCH: &str = "master";

/// A set of named branches with one active branch.
///
/// Each branch is an independent `Vec<Block>` starting at a genesis block.
/// Forking clones the active branch, so branches never share blocks.
///
/// `add_block` does not validate what it appends. Corruption is only found
/// by [`Ledger::validate_block`] / [`Ledger::is_valid_chain`].
#[derive(Debug, Clone)]
pub struct Ledger {
    branches: BTreeMap<String, Vec<Block>>,
    current_branch: String,
    index: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create a ledger whose genesis branch is named `master`.
    pub fn new() -> Self {
        Self::from_genesis(DEFAULT_BRANCH.to_string())
    }

    /// Create a ledger with a custom genesis branch name, taken as given.
    pub fn with_genesis_branch(name: &str) -> Self {
        Self::from_genesis(name.to_string())
    }

    fn from_genesis(name: String) -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(name.clone(), vec![Self::create_genesis()]);
        Ledger {
            branches,
            current_branch: name,
            index: 0,
        }
    }

    pub fn create_genesis() -> Block {
        Block::genesis(now())
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    /// Blocks of the active branch in chain order.
    pub fn blocks(&self) -> &[Block] {
        self.branches
            .get(&self.current_branch)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable access to the active branch, bypassing every invariant.
    /// Meant for tooling and tests that simulate tampering.
    pub fn blocks_mut(&mut self) -> Result<&mut Vec<Block>> {
        self.branches
            .get_mut(&self.current_branch)
            .ok_or_else(|| LedgerError::BranchNotFound(self.current_branch.clone()))
    }

    pub fn branch(&self, name: &str) -> Option<&[Block]> {
        self.branches.get(name).map(Vec::as_slice)
    }

    /// Branch names in sorted order.
    pub fn branch_names(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Number of blocks on the active branch, genesis included.
    pub fn len(&self) -> usize {
        self.blocks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }

    /// Index of the most recently appended block across all branches.
    /// Not reset by switching branches.
    pub fn last_appended_index(&self) -> u64 {
        self.index
    }

    pub fn latest_block(&self) -> Result<&Block> {
        self.blocks()
            .last()
            .ok_or_else(|| LedgerError::EmptyBranch(self.current_branch.clone()))
    }

    /// Append a block carrying `transactions` to the active branch and return it.
    pub fn add_block(&mut self, transactions: Vec<Transaction>) -> Result<&Block> {
        self.add_block_at(transactions, now())
    }

    /// Same as [`Ledger::add_block`] with an explicit timestamp.
    pub fn add_block_at(&mut self, transactions: Vec<Transaction>, timestamp: i64) -> Result<&Block> {
        let previous = self.latest_block()?;
        let new_index = previous.index + 1;
        let block = Block::new(new_index, previous.hash.clone(), timestamp, transactions);

        debug!(
            branch = %self.current_branch,
            index = new_index,
            transactions = block.transactions.len(),
            "appending block"
        );

        self.blocks_mut()?.push(block);
        self.index = new_index;
        self.latest_block()
    }

    /// Make `name` the active branch, forking a copy of the active branch
    /// first when `name` does not exist yet. Names are compared exactly, so
    /// `" feature"` and `""` are branches of their own.
    pub fn switch_branch(&mut self, name: &str) {
        let name = name.to_string();
        if !self.branches.contains_key(&name) {
            let forked = self.blocks().to_vec();
            info!(
                from = %self.current_branch,
                to = %name,
                height = forked.len(),
                "forking branch"
            );
            self.branches.insert(name.clone(), forked);
        } else {
            debug!(to = %name, "switching to existing branch");
        }
        self.current_branch = name;
    }

    /// True when `block` is a valid successor of the active branch's latest
    /// block.
    pub fn validate_block(&self, block: &Block) -> bool {
        let Ok(latest) = self.latest_block() else {
            return false;
        };
        match check_block_against(latest, block) {
            Ok(()) => true,
            Err(fault) => {
                warn!(index = block.index, %fault, "block rejected");
                false
            }
        }
    }

    /// Validate the active branch pairwise from the genesis block onward.
    pub fn verify_chain(&self) -> ChainReport {
        let report = verify_blocks(&self.current_branch, self.blocks());
        if let Some((position, fault)) = &report.first_fault {
            warn!(branch = %self.current_branch, position, %fault, "chain validation failed");
        }
        report
    }

    pub fn is_valid_chain(&self) -> bool {
        self.verify_chain().is_valid()
    }

    /// Active branch as pretty-printed JSON, for display.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.blocks())?)
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
