/*!
 * Interactive Session
 * Owns the committed system state and regenerates the execution trace
 * whenever the committed process set or quantum changes
 */

use super::command::{Command, ProcessUpdate};
use super::reducer;
use super::state::SystemState;
use crate::core::limits::DEFAULT_TOTAL_MEMORY;
use crate::core::types::{MemoryMb, Pid, Tick};
use crate::memory::MemoryStats;
use crate::process::{validation, ProcessResult};
use crate::scheduler::{simulate, Snapshot};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Committed state plus the lazily rebuilt trace
struct Inner {
    state: SystemState,
    trace: Option<Arc<[Snapshot]>>,
}

/// Interactive facade over the reducer and the simulation engine.
///
/// Commands go through the pure reducer; the trace cache is invalidated on
/// every dispatched command and rebuilt on demand from the committed
/// processes and quantum. Between commands, repeated `trace()` calls share
/// one immutable trace.
pub struct Session {
    inner: RwLock<Inner>,
}

impl Session {
    pub fn new(total_memory: MemoryMb) -> Self {
        info!("session opened with {}MB of memory", total_memory);
        Self {
            inner: RwLock::new(Inner {
                state: SystemState::new(total_memory),
                trace: None,
            }),
        }
    }

    /// Apply a command to the committed state
    pub fn dispatch(&self, command: Command) {
        let mut inner = self.inner.write();
        inner.state = reducer::apply(&inner.state, &command);
        inner.trace = None;
    }

    /// Validated convenience wrapper around [`Command::Create`].
    ///
    /// Rejects malformed parameters; whether the process fits in memory is
    /// still decided silently by the admission gate.
    pub fn create_process(
        &self,
        name: &str,
        execution_time: Tick,
        memory_required: MemoryMb,
        timeout: Tick,
    ) -> ProcessResult<()> {
        validation::validate_create(name, execution_time, memory_required)?;
        self.dispatch(Command::Create {
            name: name.to_string(),
            execution_time,
            memory_required,
            timeout,
        });
        Ok(())
    }

    pub fn kill_process(&self, pid: Pid) {
        self.dispatch(Command::Kill { pid });
    }

    pub fn remove_process(&self, pid: Pid) {
        self.dispatch(Command::Remove { pid });
    }

    pub fn edit_process(&self, pid: Pid, update: ProcessUpdate) {
        self.dispatch(Command::Edit { pid, update });
    }

    pub fn set_quantum(&self, quantum: Tick) {
        self.dispatch(Command::SetQuantum { quantum });
    }

    pub fn resize_memory(&self, total: MemoryMb) {
        self.dispatch(Command::ResizeMemory { total });
    }

    /// Copy of the committed state
    pub fn state(&self) -> SystemState {
        self.inner.read().state.clone()
    }

    /// Capacity display for the presentation layer
    pub fn memory_stats(&self) -> MemoryStats {
        self.inner.read().state.memory.stats()
    }

    /// The full execution trace for the committed processes and quantum
    pub fn trace(&self) -> Arc<[Snapshot]> {
        {
            let inner = self.inner.read();
            if let Some(trace) = &inner.trace {
                return Arc::clone(trace);
            }
        }
        let mut inner = self.inner.write();
        if let Some(trace) = &inner.trace {
            return Arc::clone(trace);
        }
        let trace: Arc<[Snapshot]> = simulate(
            &inner.state.processes,
            inner.state.memory.total(),
            inner.state.time_quantum,
        )
        .into();
        inner.trace = Some(Arc::clone(&trace));
        trace
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_MEMORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessError;

    #[test]
    fn test_create_validates_parameters() {
        let session = Session::new(1024);
        assert_eq!(
            session.create_process("", 5, 100, 0),
            Err(ProcessError::EmptyName)
        );
        assert!(session.state().processes.is_empty());

        assert!(session.create_process("editor", 5, 100, 0).is_ok());
        assert_eq!(session.state().processes.len(), 1);
    }

    #[test]
    fn test_trace_cache_invalidated_by_commands() {
        let session = Session::new(1024);
        session.create_process("a", 2, 100, 0).unwrap();

        let first = session.trace();
        let second = session.trace();
        assert!(Arc::ptr_eq(&first, &second));

        session.set_quantum(3);
        let third = session.trace();
        assert!(!Arc::ptr_eq(&first, &third));
    }
}
