/*!
 * Trace Types
 * Immutable per-tick snapshots and the transition events they record
 */

use crate::core::types::{MemoryMb, Pid, Tick};
use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One transition observed during a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    /// Simulation begins
    Started,
    /// A process was handed the CPU
    Dispatched { pid: Pid, name: String },
    /// A waiting process reached its arrival tick and was admitted
    Arrived { pid: Pid, name: String },
    /// A waiting process reached its arrival tick but did not fit in memory
    BlockedByMemory {
        pid: Pid,
        name: String,
        required: MemoryMb,
        available: MemoryMb,
    },
    /// A blocked process fit into memory freed earlier in the same tick
    AdmittedAfterRelease { pid: Pid, name: String },
    /// The running process consumed its last execution tick
    Finished { pid: Pid, name: String },
    /// Memory returned to the pool by a completed process
    MemoryReleased {
        amount: MemoryMb,
        available: MemoryMb,
    },
    /// The running process exhausted its quantum and was requeued
    QuantumExpired { pid: Pid, name: String, quantum: Tick },
    /// No waiting, ready, or running process remains
    Completed,
    /// Safety cap reached with live processes remaining
    Aborted,
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::Started => write!(f, "Starting simulation"),
            SimEvent::Dispatched { pid, name } => {
                write!(f, "Process {name} (PID {pid}) starts executing")
            }
            SimEvent::Arrived { pid, name } => {
                write!(f, "Process {name} (PID {pid}) reached its arrival time and is ready")
            }
            SimEvent::BlockedByMemory {
                pid,
                name,
                required,
                available,
            } => write!(
                f,
                "Process {name} (PID {pid}) reached its arrival time but needs {required}MB with only {available}MB available"
            ),
            SimEvent::AdmittedAfterRelease { pid, name } => {
                write!(f, "Process {name} (PID {pid}) now fits in memory and is ready")
            }
            SimEvent::Finished { pid, name } => {
                write!(f, "Process {name} (PID {pid}) finished executing")
            }
            SimEvent::MemoryReleased { amount, available } => {
                write!(f, "Released {amount}MB of memory, {available}MB available")
            }
            SimEvent::QuantumExpired { pid, name, quantum } => write!(
                f,
                "Process {name} (PID {pid}) used its quantum of {quantum} and returns to the queue"
            ),
            SimEvent::Completed => write!(f, "Simulation complete, all processes finished"),
            SimEvent::Aborted => write!(f, "Simulation aborted, tick limit reached"),
        }
    }
}

/// Full copy of the system at one tick.
///
/// Snapshots own their data; mutating live simulation state never changes
/// a snapshot that was already produced. The trace index doubles as the
/// tick number, so consumers can scrub and reconstruct execution timelines
/// from consecutive `running` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Snapshot {
    pub time: Tick,
    pub available_memory: MemoryMb,
    pub total_memory: MemoryMb,
    /// The process holding the CPU after this tick's dispatch, or the
    /// process that completed this tick when nothing could be dispatched
    pub running: Option<Process>,
    /// Full process table, creation order
    pub processes: Vec<Process>,
    /// Admitted processes awaiting the CPU, queue order
    pub ready_queue: Vec<Process>,
    /// Unadmitted processes, table order
    pub waiting_queue: Vec<Process>,
    /// Completed processes, completion order; grows monotonically
    pub finished: Vec<Process>,
    /// Every transition that occurred during this tick
    pub events: Vec<SimEvent>,
}

impl Snapshot {
    /// Whether this snapshot recorded the safety-cap abort
    pub fn aborted(&self) -> bool {
        self.events.iter().any(|e| matches!(e, SimEvent::Aborted))
    }

    /// Whether this snapshot recorded normal completion
    pub fn completed(&self) -> bool {
        self.events.iter().any(|e| matches!(e, SimEvent::Completed))
    }
}
