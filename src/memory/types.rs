/*!
 * Memory Types
 * Reporting types for the memory ledger
 */

use crate::core::types::MemoryMb;
use serde::{Deserialize, Serialize};

/// Capacity report consumed by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryStats {
    pub total: MemoryMb,
    pub used: MemoryMb,
    pub available: MemoryMb,
}

impl MemoryStats {
    pub fn usage_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f64 / self.total as f64 * 100.0
        }
    }
}
