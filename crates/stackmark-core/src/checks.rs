use stackmark_types::{CheckLevel, CheckSwitches};

pub const CHECK_SWITCHES: CheckSwitches = CheckSwitches {
    no_checks: cfg!(feature = "no-checks"),
    no_prechecks: cfg!(feature = "no-prechecks"),
    no_postchecks: cfg!(feature = "no-postchecks"),
};

/// Check levels of this build.
pub const CHECKS: CheckLevel = CHECK_SWITCHES.resolve();

pub const PRECHECKS: bool = CHECKS.prechecks;
pub const POSTCHECKS: bool = CHECKS.postchecks;
pub const ANY_CHECKS: bool = CHECKS.any;
