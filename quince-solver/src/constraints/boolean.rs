use super::Constraint;
use crate::propagators::ClausePropagator;
use crate::propagators::Literal;

/// Creates the clause constraint: at least one of the literals holds. The variables have to be
/// 0/1 variables.
pub fn clause(literals: impl Into<Vec<Literal>>) -> impl Constraint {
    ClausePropagator::new(literals.into().into_boxed_slice())
}
