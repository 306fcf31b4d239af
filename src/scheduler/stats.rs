/*!
 * Trace Statistics
 * Summary counters derived from a finished trace
 */

use super::types::{SimEvent, Snapshot};
use serde::{Deserialize, Serialize};

/// Aggregate view of one simulation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TraceStats {
    /// Tick of the final snapshot
    pub ticks: u64,
    pub dispatches: u64,
    pub preemptions: u64,
    pub completions: u64,
    /// Admission attempts refused for lack of memory
    pub blocked_admissions: u64,
    pub aborted: bool,
}

impl TraceStats {
    /// Tally the event log of every snapshot in the trace
    pub fn from_trace(trace: &[Snapshot]) -> Self {
        let mut stats = Self {
            ticks: trace.last().map_or(0, |s| s.time),
            ..Self::default()
        };
        for snapshot in trace {
            for event in &snapshot.events {
                match event {
                    SimEvent::Dispatched { .. } => stats.dispatches += 1,
                    SimEvent::QuantumExpired { .. } => stats.preemptions += 1,
                    SimEvent::Finished { .. } => stats.completions += 1,
                    SimEvent::BlockedByMemory { .. } => stats.blocked_admissions += 1,
                    SimEvent::Aborted => stats.aborted = true,
                    _ => {}
                }
            }
        }
        stats
    }
}
