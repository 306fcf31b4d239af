/*!
 * Scheduler Engine
 * Round-robin simulation producing a deterministic snapshot trace
 */

pub mod simulation;
pub mod stats;
pub mod types;

pub use simulation::simulate;
pub use stats::TraceStats;
pub use types::{SimEvent, Snapshot};
