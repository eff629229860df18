//! Statically toggleable instrumentation for the routines of a numerical
//! library.
//!
//! Every instrumented routine gets three services:
//!
//! - **tracing**: a [`Frame`] is pushed on entry and popped on every exit path,
//! - **error exits**: failures are [`RoutineError`] values returned through
//!   `Result`, with one exit point per routine,
//! - **subsystem gates**: assertions that fail fast when an optional
//!   subsystem was not built in.
//!
//! # Using this crate
//!
//! Create one [`TraceContext`] per execution context (thread or rank) and pass
//! it down to instrumented routines:
//!
//! ```rust
//! use stackmark::{RoutineError, TraceContext, assert_with, enters, exits, flag_error};
//!
//! fn element_volume(cx: &TraceContext, jacobian: f64) -> Result<f64, RoutineError> {
//!     let frame = enters!(cx, "element_volume");
//!     if jacobian <= 0.0 {
//!         flag_error!(frame, "non-positive jacobian {jacobian}");
//!     }
//!     exits!(frame);
//!     Ok(jacobian / 6.0)
//! }
//!
//! fn mesh_volume(cx: &TraceContext, jacobians: &[f64]) -> Result<f64, RoutineError> {
//!     let frame = enters!(cx, "mesh_volume");
//!     let mut volume = 0.0;
//!     for &jacobian in jacobians {
//!         volume += frame.check(element_volume(cx, jacobian))?;
//!     }
//!     exits!(frame);
//!     Ok(volume)
//! }
//!
//! fn distributed_volume(cx: &TraceContext) -> Result<f64, RoutineError> {
//!     let frame = enters!(cx, "distributed_volume");
//!     assert_with!(frame, Mpi);
//!     let local = frame.check(mesh_volume(cx, &[6.0, 12.0]))?;
//!     exits!(frame);
//!     Ok(local)
//! }
//!
//! let cx = TraceContext::new();
//! assert_eq!(mesh_volume(&cx, &[6.0, 12.0]), Ok(3.0));
//! let err = mesh_volume(&cx, &[6.0, -1.0]).unwrap_err();
//! assert_eq!(err.routine(), "element_volume");
//! assert_eq!(distributed_volume(&cx).is_ok(), stackmark::BUILT_WITH_MPI);
//! assert_eq!(cx.depth(), 0);
//! ```
//!
//! `frame.check(result)?` marks the caller as failed and adds it to the
//! error's trail. To recover instead, match on the [`Unwinding`] and take
//! the error with [`Unwinding::into_inner`]; the caller then exits normally.
//!
//! # Cargo features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | *(default, none)* | Contexts and frames are zero-sized pass-throughs; errors carry only the originating routine. |
//! | `diagnostics` | Per-context trace stack, error line numbers, propagation trail, echo and timing. |
//! | `no-checks` | Disables pre- and post-condition checks. |
//! | `no-prechecks` / `no-postchecks` | Disables one check category. |
//! | `mpi` | Distributed-memory communication is available. |
//! | `cellml` | External model coupling is available. |
//! | `fieldml` | Mesh and field interchange is available. |
//! | `petsc` | The linear-algebra backend is available. |
//!
//! With `diagnostics`, `STACKMARK_ECHO` (`all`, or a comma-separated list of
//! routines) echoes entry and exit as `tracing` events, and
//! `STACKMARK_TIMING=1` collects [`RoutineStats`]. Without it, setting
//! `STACKMARK_ECHO` emits a warning and does nothing.
//!
//! Selecting the demo crate turns `diagnostics` on for the whole build, so
//! `cargo xtask test-matrix` runs the library tests once per feature set.

pub use stackmark_core::*;
