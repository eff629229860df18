use std::fmt;

/// Name of an instrumented routine, supplied by the caller at each call site.
pub type RoutineName = &'static str;

/// One entry of a context's call trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceFrame {
    pub routine: RoutineName,
    /// Source line the routine was entered from.
    pub line: u32,
}

impl TraceFrame {
    pub const fn new(routine: RoutineName, line: u32) -> Self {
        Self { routine, line }
    }
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.routine, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_displays_as_routine_and_entry_line() {
        let frame = TraceFrame::new("assemble_stiffness", 212);
        assert_eq!(frame.to_string(), "assemble_stiffness:212");
    }
}
