mod constraint_operation_error;
mod solution;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use solution::Solution;
pub(crate) use trail::Trail;

/// The result of invoking a propagator: either the domains are consistent with the constraint, or
/// a domain was emptied (directly or transitively) and the search has to backtrack.
pub(crate) type PropagationStatus = Result<(), EmptyDomain>;

/// Marker raised when a narrowing operation empties a domain. Always caught inside the engine and
/// converted into a backtrack; it never crosses the library boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EmptyDomain;
