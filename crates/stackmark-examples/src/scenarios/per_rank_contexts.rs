//! Several ranks, each owning its own trace context on its own thread.

use std::thread;

use stackmark::{DiagnosticsConfig, RoutineError, TraceContext, enters, exits, flag_error};
use tracing::info;

use super::Outcome;

fn local_residual(cx: &TraceContext, rank: u32) -> Result<f64, RoutineError> {
    let frame = enters!(cx, "local_residual");
    let depth = cx.depth();
    if rank == 3 {
        flag_error!(frame, "rank {rank} diverged");
    }
    exits!(frame);
    Ok(f64::from(rank) * 1.0e-3 + depth as f64 * 1.0e-6)
}

fn rank_main(cx: &TraceContext, rank: u32) -> Result<f64, RoutineError> {
    let frame = enters!(cx, "rank_main");
    let residual = frame.check(local_residual(cx, rank))?;
    exits!(frame);
    Ok(residual)
}

pub fn run(config: &DiagnosticsConfig, ranks: u32) -> Result<Outcome, String> {
    let handles: Vec<_> = (0..ranks)
        .map(|rank| {
            let config = config.clone();
            thread::Builder::new()
                .name(format!("rank-{rank}"))
                .spawn(move || {
                    let cx = TraceContext::with_config(config);
                    let result = rank_main(&cx, rank);
                    info!(rank, depth = cx.depth(), ok = result.is_ok(), "rank finished");
                    (result, cx.stats())
                })
                .map_err(|e| format!("failed to spawn rank {rank}: {e}"))
        })
        .collect::<Result<_, _>>()?;

    let mut stats = Vec::new();
    let mut total = 0.0;
    let mut first_error = None;
    for (rank, handle) in handles.into_iter().enumerate() {
        let (result, rank_stats) = handle
            .join()
            .map_err(|_| format!("rank {rank} panicked"))?;
        stats.extend(rank_stats);
        match result {
            Ok(residual) => total += residual,
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    let result = match first_error {
        Some(err) => Err(err),
        None => Ok(format!("{ranks} ranks, total residual {total:e}")),
    };
    Ok(Outcome { result, stats })
}
