use stackmark_types::{ErrorRecord, RoutineError, RoutineName};

/// Creates the error for a failure detected in `routine`.
///
/// Always active: recording is part of the error path, not of diagnostics.
pub fn record_error(routine: RoutineName, message: impl Into<String>) -> RoutineError {
    emit(ErrorRecord::new(routine, message))
}

#[cfg(feature = "diagnostics")]
pub(crate) fn record_error_at(
    routine: RoutineName,
    message: impl Into<String>,
    line: u32,
) -> RoutineError {
    emit(ErrorRecord::at_line(routine, message, line))
}

fn emit(record: ErrorRecord) -> RoutineError {
    tracing::debug!(
        target: "stackmark",
        routine = record.routine(),
        reason = record.message(),
        "error recorded"
    );
    RoutineError::new(record)
}
