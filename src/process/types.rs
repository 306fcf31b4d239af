/*!
 * Process Types
 * The schedulable unit and its lifecycle states
 */

use crate::core::types::{MemoryMb, Pid, Tick};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Process name cannot be empty")]
    EmptyName,

    #[error("Execution time must be a positive number of ticks")]
    ZeroExecutionTime,

    #[error("Memory requirement must be a positive number of megabytes")]
    ZeroMemoryRequired,
}

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Not yet admitted: arrival tick not reached, or not enough memory
    Waiting,
    /// Admitted and queued for the CPU
    Ready,
    /// Currently holding the CPU
    Running,
    /// Ran to completion or was killed
    Finished,
}

/// One schedulable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
    /// Memory debited from the ledger while the process is admitted (MB)
    pub memory_required: MemoryMb,
    /// Total CPU ticks the process needs
    pub execution_time: Tick,
    /// CPU ticks consumed so far; never exceeds `execution_time`
    pub current_execution: Tick,
    /// Tick at which the process becomes eligible for admission (0 = immediately)
    pub timeout: Tick,
    /// Informational creation timestamp (unix milliseconds); not read by the scheduler
    pub creation_time: i64,
}

impl Process {
    /// Create a process in the `Waiting` state with no execution consumed
    pub fn new(
        pid: Pid,
        name: impl Into<String>,
        execution_time: Tick,
        memory_required: MemoryMb,
        timeout: Tick,
    ) -> Self {
        Self {
            pid,
            name: name.into(),
            state: ProcessState::Waiting,
            memory_required,
            execution_time,
            current_execution: 0,
            timeout,
            creation_time: unix_millis_now(),
        }
    }

    /// Whether the process has consumed all required execution
    pub fn is_complete(&self) -> bool {
        self.current_execution >= self.execution_time
    }
}

fn unix_millis_now() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_is_waiting() {
        let process = Process::new(7, "editor", 5, 100, 0);
        assert_eq!(process.pid, 7);
        assert_eq!(process.state, ProcessState::Waiting);
        assert_eq!(process.current_execution, 0);
        assert!(!process.is_complete());
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&ProcessState::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
    }
}
