use super::block::Block;
use crate::crypto::HexDigest;
use serde::Serialize;
use std::fmt;

/// The first check a block failed against its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockFault {
    IndexDiscontinuity { expected: u64, found: u64 },
    PreviousHashMismatch { expected: HexDigest, found: HexDigest },
    HashMismatch { computed: HexDigest, stored: HexDigest },
    MerkleRootMismatch { computed: Option<HexDigest>, stored: Option<HexDigest> },
}

impl fmt::Display for BlockFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockFault::IndexDiscontinuity { expected, found } => {
                write!(f, "index discontinuity: expected {}, found {}", expected, found)
            }
            BlockFault::PreviousHashMismatch { expected, found } => {
                write!(f, "previous hash mismatch: expected {}, found {}", expected, found)
            }
            BlockFault::HashMismatch { computed, stored } => {
                write!(f, "hash mismatch: computed {}, stored {}", computed, stored)
            }
            BlockFault::MerkleRootMismatch { computed, stored } => write!(
                f,
                "merkle root mismatch: computed {}, stored {}",
                computed.as_deref().unwrap_or("None"),
                stored.as_deref().unwrap_or("None")
            ),
        }
    }
}

/// Checks `block` as the successor of `previous`, stopping at the first
/// failure in this order: index continuity, previous-hash linkage, self-hash,
/// Merkle root.
pub fn check_block_against(previous: &Block, block: &Block) -> Result<(), BlockFault> {
    let expected_index = previous.index + 1;
    if block.index != expected_index {
        return Err(BlockFault::IndexDiscontinuity {
            expected: expected_index,
            found: block.index,
        });
    }

    if block.previous_hash != previous.hash {
        return Err(BlockFault::PreviousHashMismatch {
            expected: previous.hash.clone(),
            found: block.previous_hash.clone(),
        });
    }

    let computed = block.calculate_hash();
    if computed != block.hash {
        return Err(BlockFault::HashMismatch {
            computed,
            stored: block.hash.clone(),
        });
    }

    let computed_root = block.calculate_merkle_root();
    if computed_root != block.merkle_root {
        return Err(BlockFault::MerkleRootMismatch {
            computed: computed_root,
            stored: block.merkle_root.clone(),
        });
    }

    Ok(())
}

/// Outcome of validating a whole branch pairwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub branch: String,
    pub blocks_checked: usize,
    /// Position in the branch of the first bad block, with its fault.
    pub first_fault: Option<(usize, BlockFault)>,
}

impl ChainReport {
    pub fn is_valid(&self) -> bool {
        self.first_fault.is_none()
    }
}

/// Validates every block from position 1 onward against the block before it.
/// The genesis block is the base case and is never checked itself.
pub fn verify_blocks(branch: &str, blocks: &[Block]) -> ChainReport {
    let mut blocks_checked = 0;
    for (position, pair) in blocks.windows(2).enumerate() {
        blocks_checked += 1;
        if let Err(fault) = check_block_against(&pair[0], &pair[1]) {
            return ChainReport {
                branch: branch.to_string(),
                blocks_checked,
                first_fault: Some((position + 1, fault)),
            };
        }
    }
    ChainReport {
        branch: branch.to_string(),
        blocks_checked,
        first_fault: None,
    }
}
