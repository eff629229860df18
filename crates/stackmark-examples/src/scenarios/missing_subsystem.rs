//! A distributed solve set up in a build that may lack MPI or PETSc.

use stackmark::{
    DiagnosticsConfig, RoutineError, Subsystem, TraceContext, assert_with, enters, exits,
};

use super::Outcome;

fn partition_mesh(cx: &TraceContext, elements: usize) -> Result<Vec<usize>, RoutineError> {
    let frame = enters!(cx, "partition_mesh");
    assert_with!(frame, Mpi);
    let parts = (0..elements).map(|element| element % 2).collect();
    exits!(frame);
    Ok(parts)
}

fn create_solver(cx: &TraceContext) -> Result<&'static str, RoutineError> {
    let frame = enters!(cx, "create_solver");
    frame.require(Subsystem::Petsc)?;
    exits!(frame);
    Ok("gmres")
}

fn setup_distributed_solve(cx: &TraceContext) -> Result<String, RoutineError> {
    let frame = enters!(cx, "setup_distributed_solve");
    let parts = frame.check(partition_mesh(cx, 8))?;
    let solver = create_solver(cx)
        .map_err(|err| frame.translate(err, "could not set up distributed solve"))?;
    exits!(frame);
    Ok(format!("{solver} over {} partitions", parts.len()))
}

pub fn run(config: &DiagnosticsConfig) -> Outcome {
    let cx = TraceContext::with_config(config.clone());
    let result = setup_distributed_solve(&cx);
    Outcome {
        result,
        stats: cx.stats(),
    }
}
