//! One assertion per optional subsystem.
//!
//! Each `BUILT_WITH_*` flag is a constant, so an assertion for a subsystem
//! that is built in compiles to `Ok(())` and one for a missing subsystem
//! compiles to an unconditional error.

use stackmark_types::{RoutineError, RoutineName, Subsystem};

use crate::record::record_error;

macro_rules! define_feature_gate {
    (
        $(#[$meta:meta])*
        $flag:ident = $built:expr,
        $assert_fn:ident,
        $subsystem:ident
    ) => {
        $(#[$meta])*
        pub const $flag: bool = $built;

        #[doc = concat!("Fails unless `", stringify!($flag), "` is set.")]
        #[inline(always)]
        pub fn $assert_fn(routine: RoutineName) -> Result<(), RoutineError> {
            if $flag {
                Ok(())
            } else {
                Err(missing(Subsystem::$subsystem, routine))
            }
        }
    };
}

define_feature_gate!(
    /// Distributed-memory communication is built in (`mpi` feature).
    BUILT_WITH_MPI = cfg!(feature = "mpi"),
    assert_with_mpi,
    Mpi
);

define_feature_gate!(
    /// External model coupling is built in (`cellml` feature).
    BUILT_WITH_CELLML = cfg!(feature = "cellml"),
    assert_with_cellml,
    CellMl
);

define_feature_gate!(
    /// Mesh and field interchange is built in (`fieldml` feature).
    BUILT_WITH_FIELDML = cfg!(feature = "fieldml"),
    assert_with_fieldml,
    FieldMl
);

define_feature_gate!(
    /// The linear-algebra backend is built in (`petsc` feature).
    BUILT_WITH_PETSC = cfg!(feature = "petsc"),
    assert_with_petsc,
    Petsc
);

pub const fn is_built_with(subsystem: Subsystem) -> bool {
    match subsystem {
        Subsystem::Mpi => BUILT_WITH_MPI,
        Subsystem::CellMl => BUILT_WITH_CELLML,
        Subsystem::FieldMl => BUILT_WITH_FIELDML,
        Subsystem::Petsc => BUILT_WITH_PETSC,
    }
}

/// Generic form of the `assert_with_*` functions.
#[inline(always)]
pub fn assert_feature(subsystem: Subsystem, routine: RoutineName) -> Result<(), RoutineError> {
    match subsystem {
        Subsystem::Mpi => assert_with_mpi(routine),
        Subsystem::CellMl => assert_with_cellml(routine),
        Subsystem::FieldMl => assert_with_fieldml(routine),
        Subsystem::Petsc => assert_with_petsc(routine),
    }
}

#[cold]
#[inline(never)]
fn missing(subsystem: Subsystem, routine: RoutineName) -> RoutineError {
    tracing::debug!(
        target: "stackmark",
        routine,
        subsystem = subsystem.label(),
        feature = subsystem.feature(),
        "subsystem not built in"
    );
    record_error(routine, subsystem.missing_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_matches_build_flag() {
        for subsystem in Subsystem::ALL {
            let result = assert_feature(subsystem, "gate_test");
            if is_built_with(subsystem) {
                assert_eq!(result, Ok(()));
            } else {
                let err = result.expect_err("missing subsystem must fail");
                assert_eq!(err.routine(), "gate_test");
                assert_eq!(err.message(), subsystem.missing_message());
            }
        }
    }

    #[test]
    fn every_subsystem_has_a_cargo_feature() {
        let manifest = include_str!("../Cargo.toml");
        for subsystem in Subsystem::ALL {
            let declaration = format!("\n{} = []", subsystem.feature());
            assert!(
                manifest.contains(&declaration),
                "no `{}` feature for {subsystem}",
                subsystem.feature()
            );
        }
    }

    #[test]
    fn named_assertions_agree_with_generic_one() {
        let named: [(Subsystem, fn(RoutineName) -> Result<(), RoutineError>); 4] = [
            (Subsystem::Mpi, assert_with_mpi),
            (Subsystem::CellMl, assert_with_cellml),
            (Subsystem::FieldMl, assert_with_fieldml),
            (Subsystem::Petsc, assert_with_petsc),
        ];
        for (subsystem, assert_fn) in named {
            assert_eq!(
                assert_fn("gate_test"),
                assert_feature(subsystem, "gate_test"),
                "{subsystem}"
            );
        }
    }
}
