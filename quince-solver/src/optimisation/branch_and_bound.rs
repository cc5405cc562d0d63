use std::sync::Arc;

use super::Objective;
use super::ObjectiveTracker;
use super::OptimisationDirection;
use crate::parallel::SharedIncumbent;

/// The branch-and-bound optimisation procedure handed to [`Solver::optimise`].
///
/// The search explores the tree depth-first; every complete feasible assignment that strictly
/// improves on the incumbent replaces it, and any subtree whose objective relaxation cannot beat
/// the incumbent is pruned. When the tree is exhausted the incumbent is optimal; when a budget
/// fires first the incumbent (if any) is reported together with the proven bound.
///
/// [`Solver::optimise`]: crate::Solver::optimise
#[derive(Clone, Debug)]
pub struct BranchAndBound {
    direction: OptimisationDirection,
    objective: Objective,
    target_gap: Option<f64>,
    shared: Option<Arc<SharedIncumbent>>,
}

impl BranchAndBound {
    pub fn new(direction: OptimisationDirection, objective: Objective) -> BranchAndBound {
        BranchAndBound {
            direction,
            objective,
            target_gap: None,
            shared: None,
        }
    }

    /// Allow the search to stop once the incumbent is within the given relative gap of the
    /// proven bound. The result is then reported as satisficing, not optimal, unless the gap
    /// closed completely.
    pub fn with_target_gap(mut self, target_gap: f64) -> BranchAndBound {
        self.target_gap = Some(target_gap);
        self
    }

    /// Share the incumbent with other workers solving partitions of the same problem.
    pub(crate) fn with_shared_incumbent(mut self, shared: Arc<SharedIncumbent>) -> BranchAndBound {
        self.shared = Some(shared);
        self
    }

    pub(crate) fn into_tracker(self) -> ObjectiveTracker {
        ObjectiveTracker::new(self.direction, self.objective, self.target_gap, self.shared)
    }
}
