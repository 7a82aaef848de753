//! forkchain - an educational hash-linked ledger with Merkle commitments and
//! branching
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Ledger
//! - [`crypto`] - SHA-256 hex digests shared by every hash in the ledger
//! - [`merkle`] - Merkle root over an ordered transaction list
//! - [`blockchain`] - Blocks, named branches, forking and chain validation
//!
//! ## Driver
//! - [`cli`] - Interactive menu session over a ledger
//!
//! ## Configuration & Utilities
//! - [`config`] - TOML configuration
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Core Ledger
// ============================================================================
pub mod blockchain;
pub mod crypto;
pub mod merkle;

// ============================================================================
// Driver
// ============================================================================
pub mod cli;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
