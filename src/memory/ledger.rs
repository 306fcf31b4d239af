/*!
 * Memory Ledger
 * Total vs. available capacity accounting that gates process admission
 */

use super::types::MemoryStats;
use crate::core::types::MemoryMb;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Admission-gating memory accounting.
///
/// Reservations are all-or-nothing: a request larger than the available
/// capacity leaves the ledger untouched and the requesting process waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryLedger {
    total: MemoryMb,
    available: MemoryMb,
}

impl MemoryLedger {
    /// Create a ledger with the full capacity available
    pub fn new(total: MemoryMb) -> Self {
        Self {
            total,
            available: total,
        }
    }

    pub fn total(&self) -> MemoryMb {
        self.total
    }

    pub fn available(&self) -> MemoryMb {
        self.available
    }

    pub fn used(&self) -> MemoryMb {
        self.total - self.available
    }

    /// Whether a reservation of `amount` would currently succeed
    pub fn fits(&self, amount: MemoryMb) -> bool {
        amount <= self.available
    }

    /// Reserve `amount` if it fits; returns false and leaves the ledger
    /// unchanged otherwise
    pub fn try_reserve(&mut self, amount: MemoryMb) -> bool {
        if !self.fits(amount) {
            debug!(
                "reservation of {}MB refused, {}MB available",
                amount, self.available
            );
            return false;
        }
        self.available -= amount;
        true
    }

    /// Return `amount` to the pool, saturating at the total capacity
    pub fn release(&mut self, amount: MemoryMb) {
        self.available = (self.available + amount).min(self.total);
    }

    /// Replace the total capacity, carrying the delta into the available
    /// pool. A shrink below the committed amount is refused so `available`
    /// never goes negative.
    pub fn resize(&mut self, new_total: MemoryMb) -> bool {
        let used = self.used();
        if new_total < used {
            warn!(
                "resize to {}MB refused, {}MB already committed",
                new_total, used
            );
            return false;
        }
        self.total = new_total;
        self.available = new_total - used;
        true
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            total: self.total,
            used: self.used(),
            available: self.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_and_release() {
        let mut ledger = MemoryLedger::new(1024);
        assert!(ledger.try_reserve(1000));
        assert_eq!(ledger.available(), 24);
        assert!(!ledger.try_reserve(25));
        assert_eq!(ledger.available(), 24);

        ledger.release(1000);
        assert_eq!(ledger.available(), 1024);
    }

    #[test]
    fn test_release_saturates_at_total() {
        let mut ledger = MemoryLedger::new(512);
        ledger.release(100);
        assert_eq!(ledger.available(), 512);
    }

    #[test]
    fn test_resize_refuses_shrink_below_committed() {
        let mut ledger = MemoryLedger::new(1024);
        assert!(ledger.try_reserve(800));

        assert!(!ledger.resize(512));
        assert_eq!(ledger.total(), 1024);

        // Shrinking down to exactly the committed amount is allowed
        assert!(ledger.resize(800));
        assert_eq!(ledger.available(), 0);

        assert!(ledger.resize(2048));
        assert_eq!(ledger.available(), 1248);
        assert_eq!(ledger.used(), 800);
    }

    #[test]
    fn test_stats() {
        let mut ledger = MemoryLedger::new(1024);
        ledger.try_reserve(256);
        let stats = ledger.stats();
        assert_eq!(stats.total, 1024);
        assert_eq!(stats.used, 256);
        assert_eq!(stats.available, 768);
        assert_eq!(stats.usage_percentage(), 25.0);
    }
}
