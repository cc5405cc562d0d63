use crate::basic_types::ConstraintOperationError;
use crate::basic_types::PropagationStatus;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::engine::assignments::Checkpoint;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationEngine;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorStore;
use crate::engine::propagation::WatchList;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;
use crate::optimisation::ObjectiveTracker;
use crate::quince_assert_extreme;
use crate::quince_assert_simple;
use crate::statistics::SolverStatistics;

/// The search controller: a depth-first branch-and-bound state machine over the domain store.
///
/// The search is expressed as an iterative loop over an explicit stack of decisions rather than
/// through recursion, which keeps deep trees from exhausting the call stack and gives the
/// termination condition a well-defined sampling point at every node boundary.
///
/// Every node goes through the same cycle: propagate to a fixpoint; on contradiction backtrack;
/// when the objective tracker proves the node cannot beat the incumbent, prune; when all
/// variables are assigned, record the solution; otherwise branch. Branching pushes a checkpoint
/// and narrows the chosen variable to the chosen value; backtracking restores that checkpoint
/// and excludes the tried value at the parent level, so both sides of every decision are
/// eventually explored.
#[derive(Default)]
pub(crate) struct ConstraintSatisfactionSolver {
    assignments: Assignments,
    propagators: PropagatorStore,
    watch_list: WatchList,
    propagation_engine: PropagationEngine,
    decisions: Vec<DecisionFrame>,
    statistics: SolverStatistics,
    infeasible_at_root: bool,
}

#[derive(Clone, Copy, Debug)]
struct DecisionFrame {
    checkpoint: Checkpoint,
    decision: Decision,
}

/// How a call to [`ConstraintSatisfactionSolver::solve`] came to an end.
#[derive(Debug)]
pub(crate) enum SolveConclusion {
    /// Satisfaction mode only: the first complete feasible assignment.
    Solution(Solution),
    /// The tree was explored completely. In optimisation mode the tracker's incumbent is now
    /// optimal (or the problem is infeasible if there is none); in satisfaction mode the problem
    /// is infeasible.
    Exhausted,
    /// The termination condition fired at a node boundary.
    Stopped,
    /// Optimisation mode only: the incumbent reached the proven bound or the requested gap.
    BoundReached,
}

impl std::fmt::Debug for ConstraintSatisfactionSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSatisfactionSolver")
            .field("num_domains", &self.assignments.num_domains())
            .field("num_propagators", &self.propagators.len())
            .field("infeasible_at_root", &self.infeasible_at_root)
            .finish_non_exhaustive()
    }
}

impl ConstraintSatisfactionSolver {
    /// Create a new decision variable with the domain `[lower_bound, upper_bound]`.
    pub(crate) fn new_domain(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        quince_assert_simple!(
            self.decisions.is_empty(),
            "domains are created at the root"
        );
        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        self.watch_list.grow();
        domain_id
    }

    pub(crate) fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// Root-level access to the domain store, used while seeding sparse domains.
    pub(crate) fn assignments_mut(&mut self) -> &mut Assignments {
        quince_assert_simple!(
            self.decisions.is_empty(),
            "the domain store is only seeded at the root"
        );
        &mut self.assignments
    }

    pub(crate) fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Post a propagator and propagate it at the root. When the root fixpoint empties a domain
    /// the solver is marked infeasible and every subsequent solve reports unsatisfiability.
    pub(crate) fn add_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<PropagatorId, ConstraintOperationError> {
        if self.infeasible_at_root {
            return Err(ConstraintOperationError::InfeasibleAtRoot);
        }
        quince_assert_simple!(
            self.decisions.is_empty(),
            "propagators are posted at the root"
        );

        let propagator_id = self.propagators.alloc(Box::new(propagator));
        self.propagation_engine.grow();

        {
            let mut context = InitialisationContext::new(
                &self.assignments,
                &mut self.watch_list,
                propagator_id,
            );
            self.propagators[propagator_id].initialise(&mut context);
        }

        self.propagation_engine
            .enqueue(propagator_id, self.propagators[propagator_id].priority());

        match self.propagate() {
            Ok(()) => Ok(propagator_id),
            Err(_) => {
                self.infeasible_at_root = true;
                Err(ConstraintOperationError::InfeasibleAtRoot)
            }
        }
    }

    /// Run the search. With a tracker the solver performs branch-and-bound and keeps going
    /// until the tree is exhausted or a stop condition fires; without one it stops at the first
    /// solution. The solver is always returned to the root afterwards, so it can be solved
    /// again (e.g. with a different budget).
    pub(crate) fn solve(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        mut tracker: Option<&mut ObjectiveTracker>,
    ) -> SolveConclusion {
        if self.infeasible_at_root {
            return SolveConclusion::Exhausted;
        }
        quince_assert_simple!(self.decisions.is_empty(), "a solve starts at the root");

        self.propagation_engine.enqueue_all(&self.propagators);

        // The session checkpoint catches every narrowing of the search, including the
        // complement exclusions recorded below the decision frames, so the solver can be solved
        // again afterwards.
        let session = self.assignments.new_checkpoint();
        let conclusion = self.search(brancher, termination, &mut tracker);
        self.restore_to_root(session);
        conclusion
    }

    fn search(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        tracker: &mut Option<&mut ObjectiveTracker>,
    ) -> SolveConclusion {
        loop {
            // Node boundary: the only points at which budget and cancellation are observed.
            if termination.should_stop() {
                return SolveConclusion::Stopped;
            }
            if let Some(tracker) = tracker.as_deref_mut() {
                if tracker.bound_reached() {
                    return SolveConclusion::BoundReached;
                }
            }

            if self.propagate().is_err() {
                self.statistics.num_conflicts += 1;
                if !self.backtrack(brancher) {
                    return SolveConclusion::Exhausted;
                }
                continue;
            }

            if let Some(tracker) = tracker.as_deref_mut() {
                if self.decisions.is_empty() && !tracker.root_bound_recorded() {
                    tracker.record_root_bound(&self.assignments);
                }
                if !tracker.can_improve(&self.assignments) {
                    if !self.backtrack(brancher) {
                        return SolveConclusion::Exhausted;
                    }
                    continue;
                }
            }

            let decision = {
                let mut context = SelectionContext::new(&self.assignments);
                brancher.next_decision(&mut context)
            };

            match decision {
                None => {
                    self.statistics.num_solutions += 1;
                    quince_assert_extreme!(
                        self.all_propagators_satisfied(),
                        "a complete assignment must satisfy every constraint"
                    );

                    match tracker.as_deref_mut() {
                        Some(tracker) => {
                            if tracker.record_incumbent(&self.assignments) {
                                if let Some(incumbent) = tracker.incumbent() {
                                    brancher.on_solution(incumbent);
                                }
                            }
                            // Keep searching for better solutions and the optimality proof.
                            if !self.backtrack(brancher) {
                                return SolveConclusion::Exhausted;
                            }
                        }
                        None => {
                            let solution = Solution::from_assignments(&self.assignments, None);
                            brancher.on_solution(&solution);
                            return SolveConclusion::Solution(solution);
                        }
                    }
                }
                Some(decision) => {
                    termination.decision_has_been_made();
                    self.statistics.num_decisions += 1;

                    let checkpoint = self.assignments.new_checkpoint();
                    self.decisions.push(DecisionFrame {
                        checkpoint,
                        decision,
                    });
                    self.statistics.peak_depth =
                        self.statistics.peak_depth.max(self.decisions.len() as u64);

                    if self
                        .assignments
                        .make_assignment(decision.domain_id, decision.value)
                        .is_err()
                    {
                        self.statistics.num_conflicts += 1;
                        if !self.backtrack(brancher) {
                            return SolveConclusion::Exhausted;
                        }
                    }
                }
            }
        }
    }

    fn propagate(&mut self) -> PropagationStatus {
        self.propagation_engine.propagate_to_fixpoint(
            &mut self.assignments,
            &mut self.propagators,
            &self.watch_list,
            &mut self.statistics,
        )
    }

    /// Pop decisions until one of them still has an unexplored complement branch: restore the
    /// checkpoint and exclude the tried value at the parent level. Returns `false` when the root
    /// is reached with nothing left to try, i.e. the tree is exhausted.
    fn backtrack(&mut self, brancher: &mut impl Brancher) -> bool {
        while let Some(frame) = self.decisions.pop() {
            self.assignments.restore_to(frame.checkpoint);
            brancher.on_backtrack();

            match self
                .assignments
                .remove_value(frame.decision.domain_id, frame.decision.value)
            {
                Ok(()) => return true,
                Err(_) => {
                    // The complement is empty as well; this level is exhausted too.
                    self.statistics.num_conflicts += 1;
                }
            }
        }
        false
    }

    fn restore_to_root(&mut self, session: Checkpoint) {
        while let Some(frame) = self.decisions.pop() {
            self.assignments.restore_to(frame.checkpoint);
        }
        self.assignments.restore_to(session);
        self.assignments.clear_events();
        quince_assert_simple!(
            self.assignments.checkpoint_level() == 0,
            "all checkpoints are closed once the decision stack is unwound"
        );
    }

    fn all_propagators_satisfied(&self) -> bool {
        self.propagators.keys().all(|propagator_id| {
            self.propagators[propagator_id]
                .is_satisfied(PropagationContext::new(&self.assignments))
        })
    }
}
