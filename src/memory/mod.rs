/*!
 * Memory Module
 * Admission-gating capacity accounting
 */

pub mod ledger;
pub mod types;

pub use ledger::MemoryLedger;
pub use types::MemoryStats;
