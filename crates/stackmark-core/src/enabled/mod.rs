use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::time::{Duration, Instant};

use stackmark_types::{ErrorRecord, RoutineError, RoutineName, RoutineStats, Subsystem, TraceFrame};

use crate::config::DiagnosticsConfig;
use crate::gate::is_built_with;
use crate::record::record_error_at;


// ── Trace context ────────────────────────────────────────
//
// One per execution context (thread, rank). `RefCell` keeps it `!Sync`, so
// a context can be handed to another thread but never shared between two.

#[derive(Debug, Default)]
struct Counters {
    calls: u64,
    failures: u64,
    inclusive: Duration,
}

#[derive(Debug, Default)]
pub struct TraceContext {
    stack: RefCell<Vec<TraceFrame>>,
    config: DiagnosticsConfig,
    counters: RefCell<HashMap<RoutineName, Counters>>,
}

impl TraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context configured from `STACKMARK_ECHO` / `STACKMARK_TIMING`.
    pub fn from_env() -> Self {
        Self::with_config(DiagnosticsConfig::from_env())
    }

    pub fn with_config(config: DiagnosticsConfig) -> Self {
        Self {
            stack: RefCell::default(),
            config,
            counters: RefCell::default(),
        }
    }

    /// Pushes a frame for `routine`. The frame is popped when the returned
    /// guard is released, whichever way the routine returns.
    pub fn enter(&self, routine: RoutineName, line: u32) -> Frame<'_> {
        let entered = TraceFrame::new(routine, line);
        let depth = {
            let mut stack = self.stack.borrow_mut();
            stack.push(entered);
            stack.len()
        };
        if self.config.echo.selects(routine) {
            tracing::info!(target: "stackmark", routine, depth, frame = %entered, "enters");
        }
        Frame {
            cx: self,
            routine,
            started: self.config.timing.then(Instant::now),
            failed: Cell::new(false),
        }
    }

    fn leave(&self, routine: RoutineName, started: Option<Instant>, failed: bool) {
        let depth = {
            let mut stack = self.stack.borrow_mut();
            let depth = stack.len();
            stack.pop();
            depth
        };
        if self.config.echo.selects(routine) {
            if failed {
                tracing::info!(target: "stackmark", routine, depth, "error exit");
            } else {
                tracing::info!(target: "stackmark", routine, depth, "exits");
            }
        }
        if let Some(started) = started {
            let mut counters = self.counters.borrow_mut();
            let entry = counters.entry(routine).or_default();
            entry.calls += 1;
            if failed {
                entry.failures += 1;
            }
            entry.inclusive += started.elapsed();
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Innermost active frame.
    pub fn current(&self) -> Option<TraceFrame> {
        self.stack.borrow().last().copied()
    }

    /// Active frames, outermost first.
    pub fn frames(&self) -> Vec<TraceFrame> {
        self.stack.borrow().clone()
    }

    /// Per-routine counters, sorted by routine name. Empty unless timing is
    /// configured.
    pub fn stats(&self) -> Vec<RoutineStats> {
        let counters = self.counters.borrow();
        let mut stats: Vec<RoutineStats> = counters
            .iter()
            .map(|(routine, c)| RoutineStats {
                routine: (*routine).to_owned(),
                calls: c.calls,
                failures: c.failures,
                inclusive_ns: u64::try_from(c.inclusive.as_nanos()).unwrap_or(u64::MAX),
            })
            .collect();
        stats.sort_by(|a, b| a.routine.cmp(&b.routine));
        stats
    }
}

// ── Frame guard ──────────────────────────────────────────

/// An active routine. Released exactly once: by [`Frame::exit`], by
/// [`Frame::fail`], or by drop on any other return path.
#[must_use = "dropping the frame exits the routine"]
pub struct Frame<'cx> {
    cx: &'cx TraceContext,
    routine: RoutineName,
    started: Option<Instant>,
    failed: Cell<bool>,
}

impl Frame<'_> {
    pub fn routine(&self) -> RoutineName {
        self.routine
    }

    /// Normal exit.
    pub fn exit(self) {}

    /// Records a failure detected in this routine and exits it.
    #[track_caller]
    pub fn fail(self, message: impl Into<String>) -> RoutineError {
        self.record(message, Location::caller().line())
    }

    /// Wraps a callee's result. A failure only leaves this routine, and
    /// joins its trail, when the [`Unwinding`] is converted with `?`;
    /// matching on it or discarding it handles the failure in place.
    pub fn check<T>(&self, result: Result<T, RoutineError>) -> Result<T, Unwinding<'_>> {
        result.map_err(|err| Unwinding {
            err,
            routine: self.routine,
            failed: &self.failed,
        })
    }

    /// Fails with the subsystem's fixed message unless it is built in.
    #[track_caller]
    pub fn require(&self, subsystem: Subsystem) -> Result<(), RoutineError> {
        if is_built_with(subsystem) {
            return Ok(());
        }
        Err(self.record(subsystem.missing_message(), Location::caller().line()))
    }

    /// Replaces a callee's failure with one recorded for this routine.
    #[track_caller]
    pub fn translate(&self, err: RoutineError, message: impl Into<String>) -> RoutineError {
        self.failed.set(true);
        err.translate(ErrorRecord::at_line(
            self.routine,
            message,
            Location::caller().line(),
        ))
    }

    fn record(&self, message: impl Into<String>, line: u32) -> RoutineError {
        self.failed.set(true);
        record_error_at(self.routine, message, line)
    }
}

// ── Unwinding ────────────────────────────────────────────

/// A callee's failure seen by a frame that has not yet decided what to do
/// with it.
pub struct Unwinding<'f> {
    err: RoutineError,
    routine: RoutineName,
    failed: &'f Cell<bool>,
}

impl Unwinding<'_> {
    pub fn error(&self) -> &RoutineError {
        &self.err
    }

    /// Takes the error as handled: the frame keeps a normal exit and the
    /// trail is left untouched.
    pub fn into_inner(self) -> RoutineError {
        self.err
    }
}

impl fmt::Debug for Unwinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unwinding")
            .field("routine", &self.routine)
            .field("err", &self.err)
            .finish()
    }
}

impl From<Unwinding<'_>> for RoutineError {
    fn from(unwinding: Unwinding<'_>) -> Self {
        unwinding.failed.set(true);
        let mut err = unwinding.err;
        err.push_unwound(unwinding.routine);
        err
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        self.cx.leave(self.routine, self.started, self.failed.get());
    }
}
