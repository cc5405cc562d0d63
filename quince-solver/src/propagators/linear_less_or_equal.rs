use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::engine::domain_events::DomainEvents;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;

/// Propagator for the constraint `sum(weight_i * x_i) <= c`.
///
/// Enforces bound consistency: each variable's bound is tightened using the minimal
/// contributions of all other terms. All arithmetic is performed in `i64` so sums of `i32`
/// domains cannot overflow.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagator {
    terms: Box<[(i64, DomainId)]>,
    c: i64,
}

impl LinearLessOrEqualPropagator {
    pub(crate) fn new(terms: Box<[(i64, DomainId)]>, c: i64) -> Self {
        LinearLessOrEqualPropagator { terms, c }
    }

    /// The smallest value `weight * x` can take under the current bounds.
    fn min_contribution(context: &impl ReadDomains, weight: i64, domain_id: DomainId) -> i64 {
        if weight >= 0 {
            weight * context.lower_bound(domain_id) as i64
        } else {
            weight * context.upper_bound(domain_id) as i64
        }
    }
}

impl Propagator for LinearLessOrEqualPropagator {
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise(&mut self, context: &mut InitialisationContext) {
        for &(_, domain_id) in self.terms.iter() {
            context.register(domain_id, DomainEvents::BOUNDS);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let lower_bound_left_hand_side: i64 = self
            .terms
            .iter()
            .map(|&(weight, domain_id)| Self::min_contribution(&context, weight, domain_id))
            .sum();

        if lower_bound_left_hand_side > self.c {
            return Err(EmptyDomain);
        }

        for &(weight, domain_id) in self.terms.iter() {
            if weight == 0 {
                continue;
            }

            let slack = self.c
                - (lower_bound_left_hand_side
                    - Self::min_contribution(&context, weight, domain_id));

            // `div_euclid` rounds towards negative infinity for positive divisors and towards
            // positive infinity for negative ones, which is exactly the floor/ceil pair needed
            // when dividing the slack by the weight.
            let bound = slack.div_euclid(weight).clamp(i32::MIN as i64, i32::MAX as i64) as i32;

            if weight > 0 {
                context.set_upper_bound(domain_id, bound)?;
            } else {
                context.set_lower_bound(domain_id, bound)?;
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        let left_hand_side: i64 = self
            .terms
            .iter()
            .map(|&(weight, domain_id)| {
                weight * context.assigned_value(domain_id).unwrap_or_default() as i64
            })
            .sum();

        left_hand_side <= self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn bounds_are_propagated() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 5);
        let y = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(LinearLessOrEqualPropagator::new(
                [(1, x), (1, y)].into(),
                7,
            ))
            .expect("no empty domains");

        solver.assert_bounds(x, 1, 5);
        solver.assert_bounds(y, 0, 6);
    }

    #[test]
    fn negative_weights_tighten_lower_bounds() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);

        // -2x <= -6, i.e. x >= 3.
        let _ = solver
            .new_propagator(LinearLessOrEqualPropagator::new([(-2, x)].into(), -6))
            .expect("no empty domains");

        solver.assert_bounds(x, 3, 10);
    }

    #[test]
    fn overloaded_sum_is_a_conflict() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(4, 10);
        let y = solver.new_variable(4, 10);

        let result = solver.new_propagator(LinearLessOrEqualPropagator::new(
            [(1, x), (1, y)].into(),
            7,
        ));

        assert!(result.is_err());
    }

    #[test]
    fn propagation_is_idempotent_at_the_fixpoint() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 5);
        let y = solver.new_variable(0, 10);

        let propagator = solver
            .new_propagator(LinearLessOrEqualPropagator::new(
                [(2, x), (1, y)].into(),
                8,
            ))
            .expect("no empty domains");

        let bounds = (
            solver.lower_bound(x),
            solver.upper_bound(x),
            solver.lower_bound(y),
            solver.upper_bound(y),
        );

        solver.propagate(propagator).expect("no empty domains");

        assert_eq!(
            bounds,
            (
                solver.lower_bound(x),
                solver.upper_bound(x),
                solver.lower_bound(y),
                solver.upper_bound(y),
            )
        );
    }

    #[test]
    fn satisfaction_is_checked_on_assigned_variables() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(2, 2);
        let y = solver.new_variable(5, 5);

        let propagator = solver
            .new_propagator(LinearLessOrEqualPropagator::new(
                [(1, x), (1, y)].into(),
                7,
            ))
            .expect("no empty domains");

        assert!(solver.is_satisfied(propagator));
    }
}
