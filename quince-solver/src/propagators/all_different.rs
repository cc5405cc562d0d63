use itertools::Itertools;

use crate::basic_types::PropagationStatus;
use crate::engine::domain_events::DomainEvents;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;

/// Propagator for the `all_different` constraint: no two variables in the group take the same
/// value.
///
/// Performs value-based conflict pruning: once a variable is fixed, its value is removed from
/// every other domain in the group. Stronger (Hall-interval based) filtering is a possible
/// strengthening, not a requirement; the pruning here is sound and pays for itself on the
/// models this engine targets.
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentPropagator {
    variables: Box<[DomainId]>,
}

impl AllDifferentPropagator {
    pub(crate) fn new(variables: Box<[DomainId]>) -> Self {
        AllDifferentPropagator { variables }
    }
}

impl Propagator for AllDifferentPropagator {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn priority(&self) -> u32 {
        1
    }

    fn initialise(&mut self, context: &mut InitialisationContext) {
        for &domain_id in self.variables.iter() {
            context.register(domain_id, DomainEvents::ASSIGN);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        for index in 0..self.variables.len() {
            let domain_id = self.variables[index];
            let Some(value) = context.assigned_value(domain_id) else {
                continue;
            };

            for &other in self.variables.iter() {
                if other != domain_id {
                    context.remove_value(other, value)?;
                }
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        self.variables
            .iter()
            .tuple_combinations()
            .all(|(&first, &second)| {
                context.assigned_value(first) != context.assigned_value(second)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn fixed_values_are_removed_from_the_other_domains() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(3, 3);
        let y = solver.new_variable(1, 5);

        let _ = solver
            .new_propagator(AllDifferentPropagator::new([x, y].into()))
            .expect("no empty domains");

        assert!(!solver.contains(y, 3));
        assert!(solver.contains(y, 2));
    }

    #[test]
    fn chained_assignments_propagate_through_the_group() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 1);
        let y = solver.new_variable(1, 2);
        let z = solver.new_variable(1, 3);

        let _ = solver
            .new_propagator(AllDifferentPropagator::new([x, y, z].into()))
            .expect("no empty domains");

        // x = 1 forces y = 2, which in turn forces z = 3.
        solver.assert_bounds(y, 2, 2);
        solver.assert_bounds(z, 3, 3);
    }

    #[test]
    fn two_variables_fixed_to_the_same_value_conflict() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(4, 4);
        let y = solver.new_variable(4, 4);

        let result = solver.new_propagator(AllDifferentPropagator::new([x, y].into()));

        assert!(result.is_err());
    }

    #[test]
    fn distinct_assignments_satisfy_the_constraint() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(1, 1);
        let y = solver.new_variable(2, 2);

        let propagator = solver
            .new_propagator(AllDifferentPropagator::new([x, y].into()))
            .expect("no empty domains");

        assert!(solver.is_satisfied(propagator));
    }
}
