use facet::Facet;

/// The three independent build switches controlling validation code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CheckSwitches {
    /// Disables every check category.
    pub no_checks: bool,
    pub no_prechecks: bool,
    pub no_postchecks: bool,
}

/// Effective check levels derived from [`CheckSwitches`].
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckLevel {
    pub prechecks: bool,
    pub postchecks: bool,
    /// `prechecks || postchecks`.
    pub any: bool,
}

impl CheckSwitches {
    pub const fn resolve(self) -> CheckLevel {
        let no_prechecks = self.no_prechecks || self.no_checks;
        let no_postchecks = self.no_postchecks || self.no_checks;
        let prechecks = !no_prechecks;
        let postchecks = !no_postchecks;
        CheckLevel {
            prechecks,
            postchecks,
            any: prechecks || postchecks,
        }
    }
}
