//! The result types returned by the solve entry points.

pub use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::satisfy`].
#[derive(Debug)]
#[allow(
    clippy::large_enum_variant,
    reason = "solutions dominate the size but are the common case"
)]
pub enum SatisfactionResult {
    /// A solution was found.
    Satisfiable(Solution),
    /// There is no solution to the problem.
    Unsatisfiable,
    /// It is not known whether a solution exists; a [`TerminationCondition`] triggered first.
    Unknown,
}

/// The result of a call to [`Solver::optimise`], [`Solver::minimise`] or [`Solver::maximise`].
#[derive(Debug)]
pub enum OptimisationResult {
    /// The given solution is optimal and proven so.
    Optimal(Solution),
    /// A solution was found, but the search stopped before optimality was proven. `bound` is
    /// the best proven bound on the objective at that point.
    Satisfiable { best: Solution, bound: i64 },
    /// There is no solution to the problem.
    Unsatisfiable,
    /// No solution was found before a [`TerminationCondition`] triggered; `bound` carries the
    /// proven bound when the root relaxation completed in time.
    Unknown { bound: Option<i64> },
}

/// The status of a [`SolveOutcome`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// The reported solution is optimal and proven so.
    Optimal,
    /// A solution was found; optimality was not proven (or there was no objective).
    Feasible,
    /// The problem admits no solution.
    Infeasible,
    /// The budget ran out before anything could be concluded.
    Unknown,
}

/// A direction-agnostic summary of a solve: the status, the best solution (when one exists) and
/// the best proven bound on the objective (when one is known). This is the shape in which
/// results cross the message boundary and in which partitioned solves are aggregated.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub solution: Option<Solution>,
    pub bound: Option<i64>,
}

impl From<OptimisationResult> for SolveOutcome {
    fn from(result: OptimisationResult) -> SolveOutcome {
        match result {
            OptimisationResult::Optimal(solution) => SolveOutcome {
                status: SolveStatus::Optimal,
                bound: solution.objective_value(),
                solution: Some(solution),
            },
            OptimisationResult::Satisfiable { best, bound } => SolveOutcome {
                status: SolveStatus::Feasible,
                solution: Some(best),
                bound: Some(bound),
            },
            OptimisationResult::Unsatisfiable => SolveOutcome {
                status: SolveStatus::Infeasible,
                solution: None,
                bound: None,
            },
            OptimisationResult::Unknown { bound } => SolveOutcome {
                status: SolveStatus::Unknown,
                solution: None,
                bound,
            },
        }
    }
}

impl From<SatisfactionResult> for SolveOutcome {
    fn from(result: SatisfactionResult) -> SolveOutcome {
        match result {
            SatisfactionResult::Satisfiable(solution) => SolveOutcome {
                status: SolveStatus::Feasible,
                solution: Some(solution),
                bound: None,
            },
            SatisfactionResult::Unsatisfiable => SolveOutcome {
                status: SolveStatus::Infeasible,
                solution: None,
                bound: None,
            },
            SatisfactionResult::Unknown => SolveOutcome {
                status: SolveStatus::Unknown,
                solution: None,
                bound: None,
            },
        }
    }
}
