use thiserror::Error;

/// Errors raised while adding constraints to the solver.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// The constraint contradicts the root-level domains; any solve on this solver will report
    /// unsatisfiability.
    #[error("adding the constraint failed because it is infeasible at the root")]
    InfeasibleAtRoot,
}
