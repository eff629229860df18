use facet::Facet;
use std::fmt;

/// Optional subsystems a routine may require.
///
/// The set is closed: adding one means adding a variant, a cargo feature in
/// `stackmark-core` and the matching assertion.
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Subsystem {
    /// Distributed-memory communication.
    Mpi,
    /// External model coupling.
    CellMl,
    /// Mesh and field interchange.
    FieldMl,
    /// Linear-algebra backend.
    Petsc,
}

impl Subsystem {
    pub const ALL: [Subsystem; 4] = [
        Subsystem::Mpi,
        Subsystem::CellMl,
        Subsystem::FieldMl,
        Subsystem::Petsc,
    ];

    /// Human-readable name used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Subsystem::Mpi => "MPI",
            Subsystem::CellMl => "CellML",
            Subsystem::FieldMl => "FieldML",
            Subsystem::Petsc => "PETSc",
        }
    }

    /// Cargo feature of `stackmark` that builds the subsystem in.
    pub const fn feature(self) -> &'static str {
        match self {
            Subsystem::Mpi => "mpi",
            Subsystem::CellMl => "cellml",
            Subsystem::FieldMl => "fieldml",
            Subsystem::Petsc => "petsc",
        }
    }

    /// The fixed message reported when the subsystem is missing from the build.
    pub fn missing_message(self) -> String {
        let label = self.label();
        format!("Must compile with {label} support to use {label} functionality.")
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
