use super::Constraint;
use crate::engine::variables::DomainId;
use crate::propagators::CumulativePropagator;
use crate::propagators::CumulativeTask;
use crate::propagators::DisjunctivePropagator;
use crate::propagators::DisjunctiveTask;
use crate::propagators::PrecedencePropagator;

/// Creates the precedence constraint `before + gap <= after` over two start-time variables.
pub fn precedence(before: DomainId, after: DomainId, gap: i32) -> impl Constraint {
    PrecedencePropagator::new(before, after, gap)
}

/// Creates the cumulative constraint: at no point in time may the summed resource usage of the
/// running tasks exceed `capacity`.
pub fn cumulative(tasks: impl Into<Vec<CumulativeTask>>, capacity: i32) -> impl Constraint {
    CumulativePropagator::new(tasks.into().into_boxed_slice(), capacity)
}

/// Creates the disjunctive (no-overlap) constraint: no two of the given tasks may run at the
/// same time.
pub fn disjunctive(tasks: impl Into<Vec<DisjunctiveTask>>) -> impl Constraint {
    DisjunctivePropagator::new(tasks.into().into_boxed_slice())
}
