use crate::crypto::{digest_str, HexDigest};
use crate::merkle::merkle_root;
use serde::{Deserialize, Serialize};

/// `previous_hash` of every genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Text standing in for an absent Merkle root inside the block-hash input.
/// Changing it changes every genesis hash.
pub const ABSENT_MERKLE_ROOT: &str = "None";

pub type Transaction = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub previous_hash: HexDigest,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
    pub merkle_root: Option<HexDigest>,
    pub hash: HexDigest,
}

impl Block {
    pub fn new(
        index: u64,
        previous_hash: impl Into<HexDigest>,
        timestamp: i64,
        transactions: Vec<Transaction>,
    ) -> Self {
        let previous_hash = previous_hash.into();
        let merkle_root = merkle_root(&transactions);
        let hash = compute_block_hash(index, &previous_hash, timestamp, merkle_root.as_deref());

        Block {
            index,
            previous_hash,
            timestamp,
            transactions,
            merkle_root,
            hash,
        }
    }

    /// Block at index 0 with the sentinel predecessor and no transactions.
    pub fn genesis(timestamp: i64) -> Self {
        Block::new(0, GENESIS_PREVIOUS_HASH, timestamp, Vec::new())
    }

    /// Self-hash recomputed from the stored fields. The stored `hash` is not
    /// consulted, so a tampered block yields a different value.
    pub fn calculate_hash(&self) -> HexDigest {
        compute_block_hash(
            self.index,
            &self.previous_hash,
            self.timestamp,
            self.merkle_root.as_deref(),
        )
    }

    /// Merkle root recomputed from the stored transactions.
    pub fn calculate_merkle_root(&self) -> Option<HexDigest> {
        merkle_root(&self.transactions)
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    /// Merkle root as rendered in the hash input and on screen.
    pub fn merkle_root_text(&self) -> &str {
        self.merkle_root.as_deref().unwrap_or(ABSENT_MERKLE_ROOT)
    }
}

/// `digest(index ++ previous_hash ++ timestamp ++ merkle_root)` over the
/// decimal / literal text of each field.
pub fn compute_block_hash(
    index: u64,
    previous_hash: &str,
    timestamp: i64,
    merkle_root: Option<&str>,
) -> HexDigest {
    let data = format!(
        "{}{}{}{}",
        index,
        previous_hash,
        timestamp,
        merkle_root.unwrap_or(ABSENT_MERKLE_ROOT)
    );
    digest_str(&data)
}
