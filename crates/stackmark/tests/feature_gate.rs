use stackmark::{
    BUILT_WITH_MPI, RoutineError, Subsystem, TraceContext, assert_feature, assert_with,
    assert_with_mpi, enters, exits, is_built_with,
};

fn exchange_halo(cx: &TraceContext, sent: &mut Vec<u32>) -> Result<usize, RoutineError> {
    let frame = enters!(cx, "exchange_halo");
    assert_with!(frame, Mpi);
    sent.push(7);
    exits!(frame);
    Ok(sent.len())
}

#[test]
fn missing_mpi_stops_routine_with_fixed_message() {
    let cx = TraceContext::new();
    let mut sent = Vec::new();
    let result = exchange_halo(&cx, &mut sent);
    assert_eq!(cx.depth(), 0);

    if BUILT_WITH_MPI {
        assert_eq!(result, Ok(1));
        assert_eq!(sent, [7]);
    } else {
        let err = result.expect_err("mpi is not built in");
        assert_eq!(
            err.message(),
            "Must compile with MPI support to use MPI functionality."
        );
        assert_eq!(err.routine(), "exchange_halo");
        assert!(sent.is_empty(), "no code after the assertion may run");
    }
}

#[test]
fn frameless_assertion_is_noop_iff_built() {
    assert_eq!(assert_with_mpi("partition_mesh").is_ok(), BUILT_WITH_MPI);
    for subsystem in Subsystem::ALL {
        match assert_feature(subsystem, "partition_mesh") {
            Ok(()) => assert!(is_built_with(subsystem), "{subsystem}"),
            Err(err) => {
                assert!(!is_built_with(subsystem), "{subsystem}");
                let label = subsystem.label();
                assert_eq!(
                    err.message(),
                    format!("Must compile with {label} support to use {label} functionality.")
                );
            }
        }
    }
}

#[test]
fn gate_failure_propagates_like_any_error() {
    fn setup_solver(cx: &TraceContext) -> Result<(), RoutineError> {
        let frame = enters!(cx, "setup_solver");
        frame.require(Subsystem::Petsc)?;
        exits!(frame);
        Ok(())
    }

    fn solve(cx: &TraceContext) -> Result<(), RoutineError> {
        let frame = enters!(cx, "solve");
        frame.check(setup_solver(cx))?;
        exits!(frame);
        Ok(())
    }

    let cx = TraceContext::new();
    match solve(&cx) {
        Ok(()) => assert!(is_built_with(Subsystem::Petsc)),
        Err(err) => {
            assert_eq!(err.routine(), "setup_solver");
            assert_eq!(err.message(), Subsystem::Petsc.missing_message());
            let outermost = if stackmark::DIAGNOSTICS {
                "solve"
            } else {
                "setup_solver"
            };
            assert_eq!(err.trail().last(), Some(outermost));
        }
    }
    assert_eq!(cx.depth(), 0);
}
