//! Plain data types shared by every stackmark crate.
//!
//! Nothing in here depends on cargo features: the switch-dependent behavior
//! lives in `stackmark-core`, which builds these values.

mod checks;
mod error;
mod routine;
mod stats;
mod subsystem;

pub use checks::{CheckLevel, CheckSwitches};
pub use error::{ErrorRecord, ErrorReport, RoutineError};
pub use routine::{RoutineName, TraceFrame};
pub use stats::RoutineStats;
pub use subsystem::Subsystem;
