/*!
 * Invariant Tests
 * Property-based coverage of the trace guarantees
 */

use proptest::prelude::*;
use sim_os_kernel::process::{Process, ProcessState};
use sim_os_kernel::scheduler::simulate;

/// (execution_time, memory_required, timeout) triples for processes that
/// all individually fit in the smallest memory pool the properties use
fn admissible_specs() -> impl Strategy<Value = Vec<(u64, u64, u64)>> {
    prop::collection::vec((1u64..=8, 1u64..=250, 0u64..=6), 1..8)
}

fn build(specs: &[(u64, u64, u64)]) -> Vec<Process> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(execution_time, memory_required, timeout))| {
            Process::new(
                i as u32 + 1,
                format!("p{}", i + 1),
                execution_time,
                memory_required,
                timeout,
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_admitted_memory_never_exceeds_total(
        specs in admissible_specs(),
        total in 256u64..=1024,
        quantum in 1u64..=4,
    ) {
        let trace = simulate(&build(&specs), total, quantum);
        for snapshot in &trace {
            let admitted: u64 = snapshot
                .processes
                .iter()
                .filter(|p| matches!(p.state, ProcessState::Ready | ProcessState::Running))
                .map(|p| p.memory_required)
                .sum();
            prop_assert!(admitted <= total);
            prop_assert_eq!(snapshot.available_memory, total - admitted);
        }
    }

    #[test]
    fn prop_finished_count_is_monotone(
        specs in admissible_specs(),
        total in 256u64..=1024,
        quantum in 1u64..=4,
    ) {
        let trace = simulate(&build(&specs), total, quantum);
        for pair in trace.windows(2) {
            prop_assert!(pair[0].finished.len() <= pair[1].finished.len());
        }
    }

    #[test]
    fn prop_execution_never_exceeds_requirement(
        specs in admissible_specs(),
        total in 256u64..=1024,
        quantum in 1u64..=4,
    ) {
        let trace = simulate(&build(&specs), total, quantum);
        for snapshot in &trace {
            for process in &snapshot.processes {
                prop_assert!(process.current_execution <= process.execution_time);
            }
        }
    }

    #[test]
    fn prop_queue_membership_matches_states(
        specs in admissible_specs(),
        total in 256u64..=1024,
        quantum in 1u64..=4,
    ) {
        let trace = simulate(&build(&specs), total, quantum);
        for snapshot in &trace {
            prop_assert!(snapshot
                .ready_queue
                .iter()
                .all(|p| p.state == ProcessState::Ready));
            prop_assert!(snapshot
                .waiting_queue
                .iter()
                .all(|p| p.state == ProcessState::Waiting));
            prop_assert!(snapshot
                .finished
                .iter()
                .all(|p| p.state == ProcessState::Finished));
        }
    }

    /// Every process fits the pool on its own, so the run always drains:
    /// blocked arrivals are re-admitted as memory frees and the trace ends
    /// in normal completion with every process finished
    #[test]
    fn prop_admissible_processes_all_finish(
        specs in admissible_specs(),
        total in 256u64..=1024,
        quantum in 1u64..=4,
    ) {
        let processes = build(&specs);
        let trace = simulate(&processes, total, quantum);
        let last = trace.last().unwrap();
        prop_assert!(last.completed());
        prop_assert!(!last.aborted());
        prop_assert_eq!(last.finished.len(), processes.len());
        prop_assert_eq!(last.available_memory, total);
    }

    #[test]
    fn prop_simulation_is_deterministic(
        specs in admissible_specs(),
        total in 256u64..=1024,
        quantum in 1u64..=4,
    ) {
        let processes = build(&specs);
        prop_assert_eq!(
            simulate(&processes, total, quantum),
            simulate(&processes, total, quantum)
        );
    }
}
