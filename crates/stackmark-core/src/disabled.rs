use std::ffi::OsStr;
use std::marker::PhantomData;
use std::sync::Once;

use stackmark_types::{ErrorRecord, RoutineError, RoutineName, RoutineStats, Subsystem, TraceFrame};

use crate::config::{DiagnosticsConfig, ECHO_ENV};
use crate::gate::assert_feature;
use crate::record::record_error;

static ECHO_DISABLED_WARNING_ONCE: Once = Once::new();

#[used]
#[cfg_attr(target_os = "macos", unsafe(link_section = "__DATA,__mod_init_func"))]
#[cfg_attr(
    any(target_os = "linux", target_os = "android", target_os = "freebsd"),
    unsafe(link_section = ".init_array")
)]
static INIT_ECHO_WARNING: extern "C" fn() = {
    extern "C" fn init() {
        emit_echo_disabled_warning_once();
    }
    init
};

fn echo_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|value| !value.to_string_lossy().trim().is_empty())
}

fn emit_echo_disabled_warning_once() {
    if !echo_requested(std::env::var_os(ECHO_ENV).as_deref()) {
        return;
    }

    ECHO_DISABLED_WARNING_ONCE.call_once(|| {
        eprintln!(
            "\n\x1b[1;31m\
======================================================================\n\
 STACKMARK WARNING: STACKMARK_ECHO is set, but stackmark diagnostics is disabled.\n\
 Routine entry/exit will NOT be echoed in this build.\n\
 Enable the `diagnostics` cargo feature of `stackmark` to trace routines.\n\
======================================================================\x1b[0m\n"
        );
    });
}

/// Zero-sized stand-in for the per-context trace stack.
#[derive(Debug, Default)]
pub struct TraceContext;

impl TraceContext {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }

    #[inline(always)]
    pub fn from_env() -> Self {
        Self
    }

    #[inline(always)]
    pub fn with_config(_config: DiagnosticsConfig) -> Self {
        Self
    }

    #[inline(always)]
    pub fn enter(&self, routine: RoutineName, _line: u32) -> Frame<'_> {
        Frame {
            routine,
            _cx: PhantomData,
        }
    }

    #[inline(always)]
    pub fn depth(&self) -> usize {
        0
    }

    #[inline(always)]
    pub fn current(&self) -> Option<TraceFrame> {
        None
    }

    #[inline(always)]
    pub fn frames(&self) -> Vec<TraceFrame> {
        Vec::new()
    }

    #[inline(always)]
    pub fn stats(&self) -> Vec<RoutineStats> {
        Vec::new()
    }
}

/// Pass-through routine guard. Only keeps the name for error records.
#[must_use = "dropping the frame exits the routine"]
pub struct Frame<'cx> {
    routine: RoutineName,
    _cx: PhantomData<&'cx TraceContext>,
}

impl Frame<'_> {
    #[inline(always)]
    pub fn routine(&self) -> RoutineName {
        self.routine
    }

    #[inline(always)]
    pub fn exit(self) {}

    #[inline(always)]
    pub fn fail(self, message: impl Into<String>) -> RoutineError {
        record_error(self.routine, message)
    }

    #[inline(always)]
    pub fn check<T>(&self, result: Result<T, RoutineError>) -> Result<T, Unwinding<'_>> {
        result.map_err(|err| Unwinding {
            err,
            _frame: PhantomData,
        })
    }

    #[inline(always)]
    pub fn require(&self, subsystem: Subsystem) -> Result<(), RoutineError> {
        assert_feature(subsystem, self.routine)
    }

    #[inline(always)]
    pub fn translate(&self, err: RoutineError, message: impl Into<String>) -> RoutineError {
        err.translate(ErrorRecord::new(self.routine, message))
    }
}

/// A callee's failure, passed through unchanged when converted with `?`.
#[derive(Debug)]
pub struct Unwinding<'f> {
    err: RoutineError,
    _frame: PhantomData<&'f ()>,
}

impl Unwinding<'_> {
    #[inline(always)]
    pub fn error(&self) -> &RoutineError {
        &self.err
    }

    #[inline(always)]
    pub fn into_inner(self) -> RoutineError {
        self.err
    }
}

impl From<Unwinding<'_>> for RoutineError {
    #[inline(always)]
    fn from(unwinding: Unwinding<'_>) -> Self {
        unwinding.err
    }
}
