//! Solver statistics and the statistic line format.
//!
//! Statistics are emitted through the [`log`] facade as `{prefix} {name}={value}` lines so that
//! downstream tooling can scrape them independently of the surrounding log output.

use std::fmt::Display;

/// Counters maintained by the search; readable at any time through
/// [`Solver::statistics`](crate::Solver::statistics).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of branching decisions made.
    pub num_decisions: u64,
    /// Number of contradictions encountered (empty domains during propagation or branching).
    pub num_conflicts: u64,
    /// Number of propagator invocations.
    pub num_propagations: u64,
    /// Number of complete feasible assignments encountered.
    pub num_solutions: u64,
    /// The deepest decision level reached.
    pub peak_depth: u64,
}

impl SolverStatistics {
    pub fn log(&self, prefix: &str) {
        log_statistic(prefix, "numDecisions", self.num_decisions);
        log_statistic(prefix, "numConflicts", self.num_conflicts);
        log_statistic(prefix, "numPropagations", self.num_propagations);
        log_statistic(prefix, "numSolutions", self.num_solutions);
        log_statistic(prefix, "peakDepth", self.peak_depth);
    }
}

/// Logs a single statistic in the `{prefix} {name}={value}` line format.
pub fn log_statistic(prefix: &str, name: impl Display, value: impl Display) {
    log::info!("{prefix} {name}={value}");
}
