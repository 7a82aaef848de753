// Thin re-export module: blocks, the branching ledger, validation and the
// locked wrapper live in their own files under `blockchain/`.

pub mod block;
pub mod ledger;
pub mod shared;
pub mod validation;

pub use block::*;
pub use ledger::*;
pub use shared::*;
pub use validation::*;
