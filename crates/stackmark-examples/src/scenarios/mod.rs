pub mod missing_subsystem;
pub mod per_rank_contexts;
pub mod singular_assembly;

use stackmark::{RoutineError, RoutineStats};

pub struct Outcome {
    pub result: Result<String, RoutineError>,
    pub stats: Vec<RoutineStats>,
}
