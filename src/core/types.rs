/*!
 * Core Types
 * Common types used across the simulation core
 */

/// Process ID type
pub type Pid = u32;

/// Discrete simulation time unit; one iteration of the scheduling loop
pub type Tick = u64;

/// Memory amount in megabytes
pub type MemoryMb = u64;
