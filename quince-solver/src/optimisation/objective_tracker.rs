use std::sync::Arc;

use log::debug;

use super::Objective;
use super::OptimisationDirection;
use crate::basic_types::Solution;
use crate::engine::Assignments;
use crate::parallel::SharedIncumbent;
use crate::quince_assert_simple;

/// Maintains the incumbent (best complete feasible assignment found so far) and the best proven
/// bound during a branch-and-bound search.
///
/// Internally the tracker always minimises: a maximisation objective is negated up front and the
/// sign is restored whenever values leave the tracker. When a [`SharedIncumbent`] is attached,
/// the best value known across all workers participates in pruning decisions and local
/// improvements are offered to the shared state.
#[derive(Debug)]
pub(crate) struct ObjectiveTracker {
    direction: OptimisationDirection,
    objective: Objective,
    incumbent: Option<Solution>,
    incumbent_value: Option<i64>,
    proven_bound: Option<i64>,
    root_bound_recorded: bool,
    target_gap: Option<f64>,
    shared: Option<Arc<SharedIncumbent>>,
}

impl ObjectiveTracker {
    pub(crate) fn new(
        direction: OptimisationDirection,
        objective: Objective,
        target_gap: Option<f64>,
        shared: Option<Arc<SharedIncumbent>>,
    ) -> ObjectiveTracker {
        let objective = match direction {
            OptimisationDirection::Minimise => objective,
            OptimisationDirection::Maximise => objective.negated(),
        };

        ObjectiveTracker {
            direction,
            objective,
            incumbent: None,
            incumbent_value: None,
            proven_bound: None,
            root_bound_recorded: false,
            target_gap,
            shared,
        }
    }

    pub(crate) fn root_bound_recorded(&self) -> bool {
        self.root_bound_recorded
    }

    /// Record the objective relaxation of the root fixpoint as the proven bound.
    pub(crate) fn record_root_bound(&mut self, assignments: &Assignments) {
        quince_assert_simple!(
            !self.root_bound_recorded,
            "the root bound is recorded exactly once"
        );
        self.proven_bound = Some(self.objective.lower_potential(assignments));
        self.root_bound_recorded = true;
    }

    /// Whether the current node can still lead to an assignment strictly better than the best
    /// known incumbent (local or shared). Nodes for which this is `false` are pruned.
    pub(crate) fn can_improve(&self, assignments: &Assignments) -> bool {
        match self.best_known_value() {
            Some(best) => self.objective.lower_potential(assignments) < best,
            None => true,
        }
    }

    fn best_known_value(&self) -> Option<i64> {
        let shared_best = self
            .shared
            .as_ref()
            .and_then(|shared| shared.best_value());

        match (self.incumbent_value, shared_best) {
            (Some(local), Some(shared)) => Some(local.min(shared)),
            (Some(local), None) => Some(local),
            (None, shared) => shared,
        }
    }

    /// Record the current (fully assigned) domains as the new incumbent. Returns whether the
    /// local incumbent improved.
    pub(crate) fn record_incumbent(&mut self, assignments: &Assignments) -> bool {
        let value = self.objective.evaluate(assignments);
        quince_assert_simple!(
            self.incumbent_value.map_or(true, |current| value < current),
            "bound pruning only lets strictly improving solutions through"
        );

        let solution =
            Solution::from_assignments(assignments, Some(self.external_value(value)));
        debug!(
            "new incumbent with objective value {}",
            self.external_value(value)
        );

        if let Some(shared) = &self.shared {
            let _ = shared.offer(value, &solution);
        }

        self.incumbent_value = Some(value);
        self.incumbent = Some(solution);
        true
    }

    pub(crate) fn incumbent(&self) -> Option<&Solution> {
        self.incumbent.as_ref()
    }

    pub(crate) fn into_incumbent(self) -> Option<Solution> {
        self.incumbent
    }

    /// Raise the proven bound to the incumbent value; called when the search tree has been
    /// exhausted, at which point the incumbent is optimal.
    pub(crate) fn close_exhausted(&mut self) {
        if self.incumbent_value.is_some() {
            self.proven_bound = self.incumbent_value;
        }
    }

    /// Whether the incumbent objective provably equals the best reachable objective.
    pub(crate) fn is_optimal(&self) -> bool {
        match (self.incumbent_value, self.proven_bound) {
            (Some(incumbent), Some(bound)) => incumbent == bound,
            _ => false,
        }
    }

    /// The relative gap between the incumbent and the proven bound, if both are known.
    pub(crate) fn gap(&self) -> Option<f64> {
        let incumbent = self.incumbent_value?;
        let bound = self.proven_bound?;
        let reference = (incumbent.abs().max(1)) as f64;
        Some((incumbent - bound).abs() as f64 / reference)
    }

    /// Whether the search can stop early: the incumbent is proven optimal, or it is within the
    /// requested gap of the proven bound.
    pub(crate) fn bound_reached(&self) -> bool {
        if self.is_optimal() {
            return true;
        }
        match (self.target_gap, self.gap()) {
            (Some(target), Some(gap)) => gap <= target,
            _ => false,
        }
    }

    /// The proven bound in the direction the caller asked for.
    pub(crate) fn proven_bound(&self) -> Option<i64> {
        self.proven_bound.map(|bound| self.external_value(bound))
    }

    fn external_value(&self, internal: i64) -> i64 {
        match self.direction {
            OptimisationDirection::Minimise => internal,
            OptimisationDirection::Maximise => -internal,
        }
    }
}
