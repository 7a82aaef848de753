//! Merkle commitment over an ordered list of transactions.
//!
//! The tree is built by recursive midpoint bisection: a list of `n >= 2`
//! items splits at `n / 2`, the left half taking `[0, mid)` and the right
//! half `[mid, n)`. Adjacent leaves are not paired level by level, so for odd
//! lengths the shape differs from the Bitcoin-style construction.
//!
//! Interior nodes hash the concatenation of the two child roots in their hex
//! text form, left then right. Only the root is kept.

use crate::crypto::{digest_concat, digest_str, HexDigest};

/// Root of the Merkle tree over `transactions`, or `None` when the list is
/// empty.
pub fn merkle_root<S: AsRef<str>>(transactions: &[S]) -> Option<HexDigest> {
    match transactions.len() {
        0 => None,
        _ => Some(subtree_root(transactions)),
    }
}

/// Leaf digest of a single transaction.
pub fn leaf_hash(transaction: &str) -> HexDigest {
    digest_str(transaction)
}

/// Digest of an interior node from its children's hex roots.
pub fn node_hash(left: &str, right: &str) -> HexDigest {
    digest_concat(&[left.as_bytes(), right.as_bytes()])
}

// Callers guarantee a non-empty slice; both halves of a split are non-empty
// because mid >= 1 and mid < n whenever n >= 2.
fn subtree_root<S: AsRef<str>>(transactions: &[S]) -> HexDigest {
    if let [single] = transactions {
        return leaf_hash(single.as_ref());
    }
    let mid = transactions.len() / 2;
    let (left, right) = transactions.split_at(mid);
    node_hash(&subtree_root(left), &subtree_root(right))
}
