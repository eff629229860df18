//! Switch-dependent stackmark runtime.
//!
//! Top-level split:
//! - `enabled`: per-context trace stack, line numbers and propagation trail
//! - `disabled`: zero-sized pass-through API with the same surface
//!
//! Feature gates and check levels are plain `const` values, so every call
//! site that reads them folds to either nothing or an unconditional error.

pub use stackmark_types::*;

mod checks;
mod config;
mod gate;
mod macros;
mod record;

#[cfg(not(feature = "diagnostics"))]
mod disabled;
#[cfg(feature = "diagnostics")]
mod enabled;

#[cfg(not(feature = "diagnostics"))]
pub use disabled::*;
#[cfg(feature = "diagnostics")]
pub use enabled::*;

pub use checks::{ANY_CHECKS, CHECK_SWITCHES, CHECKS, POSTCHECKS, PRECHECKS};
pub use config::{DiagnosticsConfig, ECHO_ENV, Echo, TIMING_ENV};
pub use gate::{
    BUILT_WITH_CELLML, BUILT_WITH_FIELDML, BUILT_WITH_MPI, BUILT_WITH_PETSC, assert_feature,
    assert_with_cellml, assert_with_fieldml, assert_with_mpi, assert_with_petsc, is_built_with,
};
pub use record::record_error;

/// True when built with the `diagnostics` feature.
pub const DIAGNOSTICS: bool = cfg!(feature = "diagnostics");
