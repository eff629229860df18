use facet::Facet;
use std::fmt::{self, Write as _};

use crate::RoutineName;

/// The error payload created once, at the point a failure is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    routine: RoutineName,
    message: String,
    line: Option<u32>,
}

impl ErrorRecord {
    pub fn new(routine: RoutineName, message: impl Into<String>) -> Self {
        Self {
            routine,
            message: message.into(),
            line: None,
        }
    }

    /// Builds a record that also remembers the source line of the failure.
    pub fn at_line(routine: RoutineName, message: impl Into<String>, line: u32) -> Self {
        Self {
            routine,
            message: message.into(),
            line: Some(line),
        }
    }

    /// Routine that detected the failure.
    pub fn routine(&self) -> RoutineName {
        self.routine
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Only present when the record was created by a diagnostics build.
    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} ({}:{line})", self.message, self.routine),
            None => write!(f, "{} ({})", self.message, self.routine),
        }
    }
}

/// A failure travelling back up the call chain.
///
/// Holds exactly one [`ErrorRecord`]. Routines that re-propagate the failure
/// append themselves to `unwound`, which only happens in diagnostics builds;
/// the record itself is never modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.record, .unwound))]
pub struct RoutineError {
    record: ErrorRecord,
    unwound: Vec<RoutineName>,
    #[source]
    cause: Option<Box<RoutineError>>,
}

fn render(record: &ErrorRecord, unwound: &[RoutineName]) -> String {
    let mut out = String::from(record.message());
    let _ = match record.line() {
        Some(line) => write!(out, "\n  Error: {}:{line}", record.routine()),
        None => write!(out, "\n  Error: {}", record.routine()),
    };
    for routine in unwound {
        let _ = write!(out, "\n  Error: {routine}");
    }
    out
}

impl RoutineError {
    pub fn new(record: ErrorRecord) -> Self {
        Self {
            record,
            unwound: Vec::new(),
            cause: None,
        }
    }

    pub fn record(&self) -> &ErrorRecord {
        &self.record
    }

    pub fn message(&self) -> &str {
        self.record.message()
    }

    /// Routine that created the record.
    pub fn routine(&self) -> RoutineName {
        self.record.routine()
    }

    pub fn line(&self) -> Option<u32> {
        self.record.line()
    }

    /// Routines the failure was re-propagated through, innermost first.
    pub fn unwound(&self) -> &[RoutineName] {
        &self.unwound
    }

    /// The originating routine followed by every routine it unwound through.
    pub fn trail(&self) -> impl Iterator<Item = RoutineName> + '_ {
        std::iter::once(self.record.routine()).chain(self.unwound.iter().copied())
    }

    /// The error this one was translated from, if any.
    pub fn cause(&self) -> Option<&RoutineError> {
        self.cause.as_deref()
    }

    /// Replaces the failure with a new record, keeping `self` as the cause.
    pub fn translate(self, record: ErrorRecord) -> RoutineError {
        RoutineError {
            record,
            unwound: Vec::new(),
            cause: Some(Box::new(self)),
        }
    }

    #[doc(hidden)]
    pub fn push_unwound(&mut self, routine: RoutineName) {
        self.unwound.push(routine);
    }

    /// Flattens the error into a serialisable report.
    pub fn report(&self) -> ErrorReport {
        let mut causes = Vec::new();
        let mut next = self.cause();
        while let Some(cause) = next {
            causes.push(cause.record().to_string());
            next = cause.cause();
        }
        ErrorReport {
            message: self.message().to_owned(),
            routine: self.routine().to_owned(),
            line: self.line(),
            trail: self.trail().map(str::to_owned).collect(),
            causes,
        }
    }
}

impl From<ErrorRecord> for RoutineError {
    fn from(record: ErrorRecord) -> Self {
        Self::new(record)
    }
}

/// Top-level rendering of a [`RoutineError`].
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub routine: String,
    pub line: Option<u32>,
    /// Originating routine first, outermost last.
    pub trail: Vec<String>,
    /// Records this error was translated from, most recent first.
    pub causes: Vec<String>,
}
