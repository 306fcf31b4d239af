/*!
 * System Limits and Constants
 *
 * Centralized location for simulation-wide limits and defaults.
 */

use super::types::{MemoryMb, Tick};

/// Hard safety cap on simulated ticks.
/// A run that still holds live processes at this point ends with an abort
/// event in its final snapshot instead of looping forever (a process
/// larger than total memory can never be admitted).
pub const MAX_SIMULATION_TICKS: Tick = 1000;

/// Default memory pool (MB)
pub const DEFAULT_TOTAL_MEMORY: MemoryMb = 1024;

/// Default round-robin time quantum (ticks)
pub const DEFAULT_TIME_QUANTUM: Tick = 1;
