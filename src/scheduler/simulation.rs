/*!
 * Round-Robin Simulation
 * Discrete-time execution of a process set under a fixed quantum with
 * memory-gated admission
 */

use super::types::{SimEvent, Snapshot};
use crate::core::limits::MAX_SIMULATION_TICKS;
use crate::core::types::{MemoryMb, Tick};
use crate::memory::MemoryLedger;
use crate::process::{Process, ProcessState};
use log::{debug, info};
use std::collections::VecDeque;

/// Simulate round-robin execution of `processes`, returning one snapshot
/// per tick starting at tick 0.
///
/// Inputs are cloned; the caller's processes are never mutated, and the
/// trace is identical for identical arguments. The run ends when no
/// process remains waiting, ready, or running, or at the
/// [`MAX_SIMULATION_TICKS`] safety cap, in which case the final snapshot
/// carries [`SimEvent::Aborted`].
pub fn simulate(
    processes: &[Process],
    total_memory: MemoryMb,
    time_quantum: Tick,
) -> Vec<Snapshot> {
    if processes.is_empty() {
        return Vec::new();
    }
    debug!(
        "simulating {} processes, {}MB pool, quantum {}",
        processes.len(),
        total_memory,
        time_quantum
    );

    let mut run = Run::new(processes, total_memory, time_quantum);
    run.init();
    let mut complete = run.is_idle();
    if complete {
        run.events.push(SimEvent::Completed);
    }
    let mut trace = vec![run.snapshot(None)];

    while !complete {
        run.time += 1;
        run.events.clear();

        run.admit_arrivals(false);
        let finished_now = run.execute();
        run.dispatch();

        complete = run.is_idle();
        if complete {
            run.events.push(SimEvent::Completed);
        } else if run.time >= MAX_SIMULATION_TICKS {
            run.events.push(SimEvent::Aborted);
        }

        trace.push(run.snapshot(finished_now));

        if run.time >= MAX_SIMULATION_TICKS {
            break;
        }
    }

    info!(
        "simulation produced {} snapshots, {} processes finished",
        trace.len(),
        run.finished.len()
    );
    trace
}

/// Live state of one simulation run.
///
/// Queues hold indices into `table`, which preserves input order and is
/// never reordered; input order is the tie-break for simultaneous
/// arrivals.
struct Run {
    time: Tick,
    memory: MemoryLedger,
    /// Working copy of every input process
    table: Vec<Process>,
    /// Admitted processes awaiting the CPU
    ready: VecDeque<usize>,
    /// Completed processes, completion order
    finished: Vec<usize>,
    /// Process currently holding the CPU
    current: Option<usize>,
    /// Execution ticks the current process has held the CPU since dispatch
    quantum_used: Tick,
    quantum: Tick,
    /// Transitions observed during the tick being resolved
    events: Vec<SimEvent>,
}

impl Run {
    fn new(processes: &[Process], total_memory: MemoryMb, quantum: Tick) -> Self {
        Self {
            time: 0,
            memory: MemoryLedger::new(total_memory),
            table: processes.to_vec(),
            ready: VecDeque::new(),
            finished: Vec::new(),
            current: None,
            quantum_used: 0,
            quantum,
            events: Vec::new(),
        }
    }

    /// Tick 0: derive initial queue placement and hand the CPU to the head
    /// of the ready queue. No execution is consumed; this is an initial
    /// observation only.
    fn init(&mut self) {
        self.events.push(SimEvent::Started);
        for idx in 0..self.table.len() {
            if self.table[idx].state == ProcessState::Finished {
                // Killed before this run; stays terminated, never requeued
                self.finished.push(idx);
                continue;
            }
            let immediate = self.table[idx].timeout == 0;
            if immediate && self.memory.try_reserve(self.table[idx].memory_required) {
                self.table[idx].state = ProcessState::Ready;
                self.ready.push_back(idx);
            } else {
                self.table[idx].state = ProcessState::Waiting;
            }
        }
        self.dispatch();
    }

    /// Admit every waiting process whose arrival tick has passed and whose
    /// memory requirement fits, in table order. `after_release` marks the
    /// re-check that runs when a completed process frees memory mid-tick;
    /// it does not re-report still-blocked processes.
    fn admit_arrivals(&mut self, after_release: bool) {
        for idx in 0..self.table.len() {
            if self.table[idx].state != ProcessState::Waiting || self.table[idx].timeout > self.time
            {
                continue;
            }
            let pid = self.table[idx].pid;
            let required = self.table[idx].memory_required;
            if self.memory.try_reserve(required) {
                self.table[idx].state = ProcessState::Ready;
                self.ready.push_back(idx);
                let name = self.table[idx].name.clone();
                self.events.push(if after_release {
                    SimEvent::AdmittedAfterRelease { pid, name }
                } else {
                    SimEvent::Arrived { pid, name }
                });
            } else if !after_release {
                self.events.push(SimEvent::BlockedByMemory {
                    pid,
                    name: self.table[idx].name.clone(),
                    required,
                    available: self.memory.available(),
                });
            }
        }
    }

    /// Run the current process for one tick. Returns its table index if it
    /// completed this tick.
    fn execute(&mut self) -> Option<usize> {
        let idx = self.current?;
        self.quantum_used += 1;
        if self.table[idx].current_execution < self.table[idx].execution_time {
            self.table[idx].current_execution += 1;
        }

        let pid = self.table[idx].pid;
        let name = self.table[idx].name.clone();

        if self.table[idx].is_complete() {
            self.table[idx].state = ProcessState::Finished;
            let reclaimed = self.table[idx].memory_required;
            self.current = None;
            self.quantum_used = 0;
            self.finished.push(idx);
            self.memory.release(reclaimed);
            debug!("tick {}: process {} finished", self.time, pid);
            self.events.push(SimEvent::Finished { pid, name });
            self.events.push(SimEvent::MemoryReleased {
                amount: reclaimed,
                available: self.memory.available(),
            });
            // Freed memory may admit blocked arrivals before the CPU is
            // handed off
            self.admit_arrivals(true);
            return Some(idx);
        }

        if self.quantum_used >= self.quantum {
            self.table[idx].state = ProcessState::Ready;
            // Arrivals admitted this tick are already queued ahead
            self.ready.push_back(idx);
            self.current = None;
            self.quantum_used = 0;
            debug!("tick {}: process {} preempted", self.time, pid);
            self.events.push(SimEvent::QuantumExpired {
                pid,
                name,
                quantum: self.quantum,
            });
        }
        None
    }

    /// Hand the CPU to the head of the ready queue if it is free. A fresh
    /// dispatch resets the quantum counter so the process gets its full
    /// quantum starting next tick.
    fn dispatch(&mut self) {
        if self.current.is_some() {
            return;
        }
        if let Some(idx) = self.ready.pop_front() {
            self.table[idx].state = ProcessState::Running;
            self.current = Some(idx);
            self.quantum_used = 0;
            self.events.push(SimEvent::Dispatched {
                pid: self.table[idx].pid,
                name: self.table[idx].name.clone(),
            });
        }
    }

    /// Whether no waiting, ready, or running process remains
    fn is_idle(&self) -> bool {
        self.current.is_none()
            && self.ready.is_empty()
            && !self
                .table
                .iter()
                .any(|p| p.state == ProcessState::Waiting)
    }

    /// Deep-copy the full system state for this tick. `finished_now` keeps
    /// the trace's `running` field pointing at a process that completed
    /// with nothing left to dispatch behind it.
    fn snapshot(&self, finished_now: Option<usize>) -> Snapshot {
        Snapshot {
            time: self.time,
            available_memory: self.memory.available(),
            total_memory: self.memory.total(),
            running: self
                .current
                .or(finished_now)
                .map(|idx| self.table[idx].clone()),
            processes: self.table.clone(),
            ready_queue: self.ready.iter().map(|&idx| self.table[idx].clone()).collect(),
            waiting_queue: self
                .table
                .iter()
                .filter(|p| p.state == ProcessState::Waiting)
                .cloned()
                .collect(),
            finished: self
                .finished
                .iter()
                .map(|&idx| self.table[idx].clone())
                .collect(),
            events: self.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_trace() {
        assert!(simulate(&[], 1024, 1).is_empty());
    }

    #[test]
    fn test_tick_zero_consumes_no_execution() {
        let processes = vec![Process::new(1, "a", 3, 100, 0)];
        let trace = simulate(&processes, 1024, 2);

        let first = &trace[0];
        assert_eq!(first.time, 0);
        let running = first.running.as_ref().unwrap();
        assert_eq!(running.current_execution, 0);
        assert_eq!(running.state, ProcessState::Running);
    }

    #[test]
    fn test_caller_processes_untouched() {
        let processes = vec![Process::new(1, "a", 3, 100, 0)];
        let before = processes.clone();
        simulate(&processes, 1024, 2);
        assert_eq!(processes, before);
    }

    #[test]
    fn test_prefinished_input_never_runs() {
        let mut killed = Process::new(1, "dead", 5, 100, 0);
        killed.state = ProcessState::Finished;
        let live = Process::new(2, "live", 1, 100, 0);

        let trace = simulate(&[killed, live], 1024, 1);

        assert_eq!(trace[0].finished.len(), 1);
        assert_eq!(trace[0].finished[0].pid, 1);
        for snapshot in &trace {
            assert!(snapshot.ready_queue.iter().all(|p| p.pid != 1));
            assert_ne!(snapshot.running.as_ref().map(|p| p.pid), Some(1));
        }
        // The live process still runs to completion
        assert!(trace.last().unwrap().completed());
        assert_eq!(trace.last().unwrap().finished.len(), 2);
    }
}
