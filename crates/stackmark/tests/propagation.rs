use proptest::prelude::*;
use stackmark::{DIAGNOSTICS, RoutineError, TraceContext, enters, exits, flag_error};

fn factor_block(cx: &TraceContext, pivot: f64) -> Result<f64, RoutineError> {
    let frame = enters!(cx, "factor_block");
    if pivot == 0.0 {
        flag_error!(frame, "zero pivot encountered");
    }
    exits!(frame);
    Ok(1.0 / pivot)
}

fn factor_matrix(cx: &TraceContext, pivots: &[f64]) -> Result<f64, RoutineError> {
    let frame = enters!(cx, "factor_matrix");
    let mut product = 1.0;
    for &pivot in pivots {
        product *= frame.check(factor_block(cx, pivot))?;
    }
    exits!(frame);
    Ok(product)
}

#[test]
fn callee_error_names_callee_and_caller_frame_is_popped() {
    let cx = TraceContext::new();
    let _driver = enters!(cx, "driver");
    let baseline = cx.depth();

    let err = factor_matrix(&cx, &[2.0, 0.0, 4.0]).expect_err("zero pivot fails");
    assert_eq!(cx.depth(), baseline);
    assert_eq!(err.routine(), "factor_block");
    assert_eq!(err.message(), "zero pivot encountered");

    if DIAGNOSTICS {
        assert_eq!(baseline, 1);
        assert_eq!(err.unwound(), ["factor_matrix"]);
        assert!(err.line().is_some());
        assert!(err.to_string().ends_with("\n  Error: factor_matrix"));
    } else {
        assert_eq!(baseline, 0);
        assert!(err.unwound().is_empty());
        assert_eq!(err.line(), None);
        assert_eq!(
            err.to_string(),
            "zero pivot encountered\n  Error: factor_block"
        );
    }
}

#[test]
fn success_keeps_depth() {
    let cx = TraceContext::new();
    assert_eq!(factor_matrix(&cx, &[2.0, 4.0]), Ok(0.125));
    assert_eq!(cx.depth(), 0);
}

#[test]
fn caller_may_handle_the_failure_and_continue() {
    fn robust_factor(cx: &TraceContext) -> Result<f64, RoutineError> {
        let frame = enters!(cx, "robust_factor");
        let product = match factor_matrix(cx, &[0.0]) {
            Ok(product) => product,
            Err(err) => {
                assert_eq!(err.routine(), "factor_block");
                frame.check(factor_matrix(cx, &[1.0]))?
            }
        };
        exits!(frame);
        Ok(product)
    }

    let cx = TraceContext::new();
    assert_eq!(robust_factor(&cx), Ok(1.0));
    assert_eq!(cx.depth(), 0);
}

// ── Outcome invariance ───────────────────────────────────
//
// A chain of routines where each level propagates, translates or swallows
// the failure of the level below. The outcome must match a model computed
// without any instrumentation.

const ROUTINES: [&str; 4] = ["level_a", "level_b", "level_c", "level_d"];

#[derive(Debug, Clone, Copy)]
enum Step {
    Propagate,
    Translate,
    Handle,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Propagate),
        Just(Step::Translate),
        Just(Step::Handle)
    ]
}

fn run(cx: &TraceContext, steps: &[Step], fail: bool, level: usize) -> Result<u32, RoutineError> {
    let frame = cx.enter(ROUTINES[level % ROUTINES.len()], level as u32);
    if level == steps.len() {
        if fail {
            flag_error!(frame, "leaf failed at depth {level}");
        }
        exits!(frame);
        return Ok(1);
    }
    let below = run(cx, steps, fail, level + 1);
    match steps[level] {
        Step::Propagate => Ok(frame.check(below)? + 1),
        Step::Translate => match below {
            Ok(count) => Ok(count + 1),
            Err(err) => Err(frame.translate(err, format!("translated at depth {level}"))),
        },
        Step::Handle => Ok(below.unwrap_or(0) + 1),
    }
}

fn model(steps: &[Step], fail: bool, level: usize) -> Result<u32, String> {
    if level == steps.len() {
        return if fail {
            Err(format!("leaf failed at depth {level}"))
        } else {
            Ok(1)
        };
    }
    let below = model(steps, fail, level + 1);
    match steps[level] {
        Step::Propagate => below.map(|count| count + 1),
        Step::Translate => below
            .map(|count| count + 1)
            .map_err(|_| format!("translated at depth {level}")),
        Step::Handle => Ok(below.unwrap_or(0) + 1),
    }
}

proptest! {
    #[test]
    fn outcome_matches_uninstrumented_model(
        steps in proptest::collection::vec(step(), 0..12),
        fail in any::<bool>(),
        preexisting in 0usize..3,
    ) {
        let cx = TraceContext::new();
        let outer: Vec<_> = (0..preexisting).map(|i| cx.enter("outer", i as u32)).collect();
        let baseline = cx.depth();

        let outcome = run(&cx, &steps, fail, 0);
        prop_assert_eq!(cx.depth(), baseline);
        prop_assert_eq!(
            outcome.as_ref().map(|count| *count).map_err(|err| err.message().to_owned()),
            model(&steps, fail, 0)
        );
        if let Err(err) = &outcome {
            prop_assert_eq!(err.line().is_some(), DIAGNOSTICS);
            if !DIAGNOSTICS {
                prop_assert!(err.unwound().is_empty());
            }
        }

        drop(outer);
        prop_assert_eq!(cx.depth(), 0);
    }
}

#[test]
fn handled_failure_does_not_join_the_trail() {
    fn tolerant_factor(cx: &TraceContext) -> Result<f64, RoutineError> {
        let frame = enters!(cx, "tolerant_factor");
        let product = match frame.check(factor_matrix(cx, &[0.0])) {
            Ok(product) => product,
            Err(unwinding) => {
                let err = unwinding.into_inner();
                assert_eq!(err.routine(), "factor_block");
                assert!(!err.unwound().contains(&"tolerant_factor"));
                1.0
            }
        };
        exits!(frame);
        Ok(product)
    }

    let cx = TraceContext::new();
    assert_eq!(tolerant_factor(&cx), Ok(1.0));
    assert_eq!(cx.depth(), 0);
}
