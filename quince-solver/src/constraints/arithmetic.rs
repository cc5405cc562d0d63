use super::Constraint;
use crate::engine::variables::DomainId;
use crate::propagators::AllDifferentPropagator;
use crate::propagators::LinearLessOrEqualPropagator;

/// Creates the constraint `sum(weight_i * x_i) <= rhs` from `(weight, variable)` terms.
pub fn less_than_or_equals(
    terms: impl Into<Vec<(i64, DomainId)>>,
    rhs: i64,
) -> impl Constraint {
    LinearLessOrEqualPropagator::new(terms.into().into_boxed_slice(), rhs)
}

/// Creates the constraint `sum(weight_i * x_i) = rhs`, decomposed into the two inequalities
/// `<= rhs` and `>= rhs`.
pub fn equals(terms: impl Into<Vec<(i64, DomainId)>>, rhs: i64) -> impl Constraint {
    let terms = terms.into();
    let negated = terms
        .iter()
        .map(|&(weight, domain_id)| (-weight, domain_id))
        .collect::<Vec<_>>();

    vec![
        LinearLessOrEqualPropagator::new(terms.into_boxed_slice(), rhs),
        LinearLessOrEqualPropagator::new(negated.into_boxed_slice(), -rhs),
    ]
}

/// Creates the constraint that all the given variables take distinct values.
pub fn all_different(variables: impl Into<Vec<DomainId>>) -> impl Constraint {
    AllDifferentPropagator::new(variables.into().into_boxed_slice())
}
