//! Propagator implementations for the built-in constraint kinds.

mod all_different;
mod clause;
mod cumulative;
mod disjunctive;
mod linear_less_or_equal;
mod precedence;

pub(crate) use all_different::AllDifferentPropagator;
pub(crate) use clause::ClausePropagator;
pub use clause::Literal;
pub(crate) use cumulative::CumulativePropagator;
pub use cumulative::CumulativeTask;
pub(crate) use disjunctive::DisjunctivePropagator;
pub use disjunctive::DisjunctiveTask;
pub(crate) use linear_less_or_equal::LinearLessOrEqualPropagator;
pub(crate) use precedence::PrecedencePropagator;
