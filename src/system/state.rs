/*!
 * Operating-System State
 * Aggregate of process table, run queue, CPU slot, memory ledger, and quantum
 */

use crate::core::limits::{DEFAULT_TIME_QUANTUM, DEFAULT_TOTAL_MEMORY};
use crate::core::types::{MemoryMb, Pid, Tick};
use crate::memory::MemoryLedger;
use crate::process::Process;
use serde::{Deserialize, Serialize};

/// The committed, interactively mutated system state.
///
/// The process table is creation-ordered; that order is the tie-break the
/// simulation engine applies to simultaneous arrivals. The run queue and
/// CPU slot reference processes by pid, so the table is the single copy of
/// every process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SystemState {
    pub memory: MemoryLedger,
    pub processes: Vec<Process>,
    pub run_queue: Vec<Pid>,
    pub current_process: Option<Pid>,
    pub time_quantum: Tick,
    /// Sequential pid allocator; consumed only when admission succeeds
    next_pid: Pid,
}

impl SystemState {
    pub fn new(total_memory: MemoryMb) -> Self {
        Self {
            memory: MemoryLedger::new(total_memory),
            processes: Vec::new(),
            run_queue: Vec::new(),
            current_process: None,
            time_quantum: DEFAULT_TIME_QUANTUM,
            next_pid: 1,
        }
    }

    /// Look up a process in the table by pid
    pub fn find(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Allocate the next sequential pid
    pub(crate) fn allocate_pid(&mut self) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;
        pid
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_MEMORY)
    }
}
