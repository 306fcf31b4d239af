/*!
 * System Commands
 * The closed set of state mutations accepted by the reducer
 */

use crate::core::types::{MemoryMb, Pid, Tick};
use serde::{Deserialize, Serialize};

/// Partial process edit; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<Tick>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_required: Option<MemoryMb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Tick>,
}

impl ProcessUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_execution_time(mut self, ticks: Tick) -> Self {
        self.execution_time = Some(ticks);
        self
    }

    pub fn with_memory_required(mut self, mb: MemoryMb) -> Self {
        self.memory_required = Some(mb);
        self
    }

    pub fn with_timeout(mut self, tick: Tick) -> Self {
        self.timeout = Some(tick);
        self
    }
}

/// Commands dispatched through the reducer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Admit a new process if its memory requirement fits
    Create {
        name: String,
        execution_time: Tick,
        memory_required: MemoryMb,
        timeout: Tick,
    },
    /// Mark a process finished and reclaim its memory; it stays visible in
    /// the table as terminated
    Kill { pid: Pid },
    /// Delete a process from the system entirely
    Remove { pid: Pid },
    /// Merge the supplied fields into a process
    Edit { pid: Pid, update: ProcessUpdate },
    /// Replace the round-robin time quantum
    SetQuantum { quantum: Tick },
    /// Replace the total memory capacity
    ResizeMemory { total: MemoryMb },
}
