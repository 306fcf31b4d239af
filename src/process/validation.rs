/*!
 * Process Parameter Validation
 * Checks create requests before they reach the command layer
 */

use super::types::{ProcessError, ProcessResult};
use crate::core::types::{MemoryMb, Tick};

/// Validate the user-supplied fields of a create request.
///
/// Capacity is not checked here; whether the process actually fits in
/// memory is the admission gate's concern and refusal there is silent.
pub fn validate_create(
    name: &str,
    execution_time: Tick,
    memory_required: MemoryMb,
) -> ProcessResult<()> {
    if name.trim().is_empty() {
        return Err(ProcessError::EmptyName);
    }
    if execution_time == 0 {
        return Err(ProcessError::ZeroExecutionTime);
    }
    if memory_required == 0 {
        return Err(ProcessError::ZeroMemoryRequired);
    }
    Ok(())
}
