use super::block::{Block, Transaction};
use super::ledger::Ledger;
use super::validation::ChainReport;
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// A [`Ledger`] behind a single lock, for callers that share it between
/// threads.
///
/// Every operation takes the lock for its whole duration, so an append,
/// a branch switch and a validation of the active branch never interleave.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Appends and returns a copy of the new block.
    pub fn add_block(&self, transactions: Vec<Transaction>) -> Result<Block> {
        let mut ledger = self.inner.lock();
        ledger.add_block(transactions).cloned()
    }

    pub fn switch_branch(&self, name: &str) {
        self.inner.lock().switch_branch(name)
    }

    pub fn is_valid_chain(&self) -> bool {
        self.inner.lock().is_valid_chain()
    }

    pub fn verify_chain(&self) -> ChainReport {
        self.inner.lock().verify_chain()
    }

    pub fn current_branch(&self) -> String {
        self.inner.lock().current_branch().to_string()
    }

    /// Copy of the active branch taken under the lock.
    pub fn snapshot(&self) -> Vec<Block> {
        self.inner.lock().blocks().to_vec()
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
