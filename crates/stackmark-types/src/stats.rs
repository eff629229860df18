use facet::Facet;

/// Per-routine counters collected by a timing-enabled trace context.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
pub struct RoutineStats {
    pub routine: String,
    /// Number of times the routine was entered.
    pub calls: u64,
    /// Number of those calls that left through an error exit.
    pub failures: u64,
    /// Wall time spent inside the routine, callees included.
    pub inclusive_ns: u64,
}
