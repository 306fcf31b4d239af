/*!
 * State Reducer
 * Pure transition function from state and command to a successor state
 */

use super::command::{Command, ProcessUpdate};
use super::state::SystemState;
use crate::core::types::{MemoryMb, Pid, Tick};
use crate::process::{Process, ProcessState};
use log::{debug, info};

/// Apply a command to the state, returning the successor state.
///
/// The input is never mutated. Commands that cannot take effect (admission
/// refused, unknown pid, rejected resize) return the state unchanged.
pub fn apply(state: &SystemState, command: &Command) -> SystemState {
    match command {
        Command::Create {
            name,
            execution_time,
            memory_required,
            timeout,
        } => create(state, name, *execution_time, *memory_required, *timeout),
        Command::Kill { pid } => kill(state, *pid),
        Command::Remove { pid } => remove(state, *pid),
        Command::Edit { pid, update } => edit(state, *pid, update),
        Command::SetQuantum { quantum } => set_quantum(state, *quantum),
        Command::ResizeMemory { total } => resize_memory(state, *total),
    }
}

fn create(
    state: &SystemState,
    name: &str,
    execution_time: Tick,
    memory_required: MemoryMb,
    timeout: Tick,
) -> SystemState {
    let mut next = state.clone();
    if !next.memory.try_reserve(memory_required) {
        debug!(
            "create '{}' refused, {}MB requested with {}MB available",
            name,
            memory_required,
            next.memory.available()
        );
        return next;
    }
    let pid = next.allocate_pid();
    info!(
        "process {} '{}' admitted, {}MB for {} ticks, arrives at tick {}",
        pid, name, memory_required, execution_time, timeout
    );
    next.run_queue.push(pid);
    next.processes
        .push(Process::new(pid, name, execution_time, memory_required, timeout));
    next
}

fn kill(state: &SystemState, pid: Pid) -> SystemState {
    let mut next = state.clone();
    let Some(idx) = next.processes.iter().position(|p| p.pid == pid) else {
        return next;
    };
    if next.processes[idx].state == ProcessState::Finished {
        // Memory already reclaimed; nothing left to do
        return next;
    }
    next.processes[idx].state = ProcessState::Finished;
    let reclaimed = next.processes[idx].memory_required;
    next.memory.release(reclaimed);
    next.run_queue.retain(|&p| p != pid);
    info!("process {} killed, {}MB reclaimed", pid, reclaimed);
    next
}

fn remove(state: &SystemState, pid: Pid) -> SystemState {
    let mut next = state.clone();
    let Some(idx) = next.processes.iter().position(|p| p.pid == pid) else {
        return next;
    };
    let process = next.processes.remove(idx);
    if process.state != ProcessState::Finished {
        next.memory.release(process.memory_required);
    }
    next.run_queue.retain(|&p| p != pid);
    if next.current_process == Some(pid) {
        next.current_process = None;
    }
    info!("process {} removed from the system", pid);
    next
}

fn edit(state: &SystemState, pid: Pid, update: &ProcessUpdate) -> SystemState {
    let mut next = state.clone();
    let Some(idx) = next.processes.iter().position(|p| p.pid == pid) else {
        return next;
    };
    let finished = next.processes[idx].state == ProcessState::Finished;
    let old_memory = next.processes[idx].memory_required;

    // A growing footprint must fit in the pool before anything is merged
    if let Some(new_memory) = update.memory_required {
        if !finished && new_memory > old_memory && !next.memory.fits(new_memory - old_memory) {
            debug!(
                "edit of process {} refused, {}MB delta exceeds available pool",
                pid,
                new_memory - old_memory
            );
            return next;
        }
    }

    let process = &mut next.processes[idx];
    if let Some(name) = &update.name {
        process.name = name.clone();
    }
    if let Some(ticks) = update.execution_time {
        process.execution_time = ticks;
    }
    if let Some(mb) = update.memory_required {
        process.memory_required = mb;
    }
    if let Some(tick) = update.timeout {
        process.timeout = tick;
    }

    let new_memory = next.processes[idx].memory_required;
    if !finished && new_memory != old_memory {
        if new_memory > old_memory {
            next.memory.try_reserve(new_memory - old_memory);
        } else {
            next.memory.release(old_memory - new_memory);
        }
    }
    info!("process {} edited", pid);
    next
}

fn set_quantum(state: &SystemState, quantum: Tick) -> SystemState {
    let mut next = state.clone();
    if quantum == 0 {
        debug!("quantum 0 refused, quantum must be positive");
        return next;
    }
    next.time_quantum = quantum;
    next
}

fn resize_memory(state: &SystemState, total: MemoryMb) -> SystemState {
    let mut next = state.clone();
    next.memory.resize(total);
    next
}
