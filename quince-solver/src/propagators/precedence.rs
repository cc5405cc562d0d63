use crate::basic_types::PropagationStatus;
use crate::engine::domain_events::DomainEvents;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;

/// Propagator for the precedence constraint `before + gap <= after` over two start-time
/// variables: `after` cannot start until `gap` time units past the start of `before`.
#[derive(Clone, Debug)]
pub(crate) struct PrecedencePropagator {
    before: DomainId,
    after: DomainId,
    gap: i32,
}

impl PrecedencePropagator {
    pub(crate) fn new(before: DomainId, after: DomainId, gap: i32) -> Self {
        PrecedencePropagator { before, after, gap }
    }
}

impl Propagator for PrecedencePropagator {
    fn name(&self) -> &str {
        "Precedence"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise(&mut self, context: &mut InitialisationContext) {
        context.register(self.before, DomainEvents::BOUNDS);
        context.register(self.after, DomainEvents::BOUNDS);
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let earliest_after = context.lower_bound(self.before).saturating_add(self.gap);
        context.set_lower_bound(self.after, earliest_after)?;

        let latest_before = context.upper_bound(self.after).saturating_sub(self.gap);
        context.set_upper_bound(self.before, latest_before)
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        let before = context.assigned_value(self.before).unwrap_or_default();
        let after = context.assigned_value(self.after).unwrap_or_default();
        before + self.gap <= after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn both_bounds_are_tightened() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 10);
        let b = solver.new_variable(0, 8);

        let _ = solver
            .new_propagator(PrecedencePropagator::new(a, b, 3))
            .expect("no empty domains");

        solver.assert_bounds(a, 2, 5);
        solver.assert_bounds(b, 5, 8);
    }

    #[test]
    fn impossible_ordering_is_a_conflict() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(7, 10);
        let b = solver.new_variable(0, 5);

        let result = solver.new_propagator(PrecedencePropagator::new(a, b, 1));

        assert!(result.is_err());
    }

    #[test]
    fn a_zero_gap_allows_simultaneous_starts() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(4, 4);
        let b = solver.new_variable(4, 4);

        let propagator = solver
            .new_propagator(PrecedencePropagator::new(a, b, 0))
            .expect("no empty domains");

        assert!(solver.is_satisfied(propagator));
    }
}
