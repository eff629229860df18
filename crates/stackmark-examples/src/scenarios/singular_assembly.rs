//! 1D bar assembly where one element has zero length.

use stackmark::{DiagnosticsConfig, RoutineError, TraceContext, enters, exits, flag_error, precheck};

use super::Outcome;

const YOUNGS_MODULUS: f64 = 200.0e9;
const AREA: f64 = 1.0e-4;
const ELEMENT_LENGTHS: [f64; 4] = [1.0, 0.5, 0.0, 2.0];

fn element_stiffness(cx: &TraceContext, element: usize, length: f64) -> Result<f64, RoutineError> {
    let frame = enters!(cx, "element_stiffness");
    precheck! {
        if length <= 0.0 {
            flag_error!(frame, "element {element} has non-positive length {length}");
        }
    }
    exits!(frame);
    Ok(YOUNGS_MODULUS * AREA / length)
}

/// Diagonal of the global stiffness matrix of a chain of bar elements.
fn assemble_diagonal(cx: &TraceContext, lengths: &[f64]) -> Result<Vec<f64>, RoutineError> {
    let frame = enters!(cx, "assemble_diagonal");
    let mut diagonal = vec![0.0; lengths.len() + 1];
    for (element, &length) in lengths.iter().enumerate() {
        let k = frame.check(element_stiffness(cx, element, length))?;
        diagonal[element] += k;
        diagonal[element + 1] += k;
    }
    exits!(frame);
    Ok(diagonal)
}

fn solve_bar(cx: &TraceContext, lengths: &[f64]) -> Result<f64, RoutineError> {
    let frame = enters!(cx, "solve_bar");
    let diagonal = frame.check(assemble_diagonal(cx, lengths))?;
    exits!(frame);
    Ok(diagonal.iter().copied().fold(f64::MIN, f64::max))
}

pub fn run(config: &DiagnosticsConfig) -> Outcome {
    let cx = TraceContext::with_config(config.clone());
    let result = solve_bar(&cx, &ELEMENT_LENGTHS).map(|max| format!("max diagonal {max:e}"));
    Outcome {
        result,
        stats: cx.stats(),
    }
}
