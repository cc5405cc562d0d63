use std::time::Duration;

use crate::api::outputs::OptimisationResult;
use crate::api::outputs::SatisfactionResult;
use crate::basic_types::ConstraintOperationError;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::SmallestDomain;
use crate::branching::Brancher;
use crate::constraints::Constraint;
use crate::engine::propagation::Propagator;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::ConstraintSatisfactionSolver;
use crate::engine::SolveConclusion;
use crate::optimisation::BranchAndBound;
use crate::optimisation::Objective;
use crate::optimisation::OptimisationDirection;
use crate::quince_assert_simple;
use crate::statistics::SolverStatistics;
use crate::variable_names::VariableNames;

/// The default [`Brancher`]: most-constrained variable first (smallest remaining domain, ties
/// towards the earliest registered variable), smallest value first.
pub type DefaultBrancher = IndependentVariableValueBrancher<SmallestDomain, InDomainMin>;

/// The options controlling a single solve call: the resource budget, the optional target gap,
/// an optional warm-start assignment, and the number of parallel workers.
///
/// Variables in `warm_start` are identified by their creation index in the model.
#[derive(Clone, Debug, Default)]
pub struct SolveOptions {
    /// Wall-clock budget; `None` means no deadline.
    pub deadline: Option<Duration>,
    /// Cap on the number of branching decisions; `None` means no cap.
    pub decision_budget: Option<u64>,
    /// Stop once the incumbent is within this relative gap of the proven bound.
    pub target_gap: Option<f64>,
    /// Partial assignment guiding the first descent.
    pub warm_start: Vec<(u32, i32)>,
    /// Number of parallel workers; 0 and 1 both mean a single sequential search.
    pub workers: u32,
}

/// The entry point for building and solving a problem: variables and constraints are added
/// through this facade, and the solve calls hand the model to the search engine.
#[derive(Debug, Default)]
pub struct Solver {
    satisfaction_solver: ConstraintSatisfactionSolver,
    variable_names: VariableNames,
}

impl Solver {
    /// Create a new integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.satisfaction_solver.new_domain(lower_bound, upper_bound)
    }

    /// Create a new named integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> DomainId {
        let domain_id = self.new_bounded_integer(lower_bound, upper_bound);
        self.variable_names.add(domain_id, name.into());
        domain_id
    }

    /// Create a new integer variable whose domain is an explicit set of values.
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        let mut values = values.into();
        values.sort_unstable();
        values.dedup();
        quince_assert_simple!(
            !values.is_empty(),
            "a sparse domain needs at least one value"
        );

        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];
        let domain_id = self.new_bounded_integer(lower_bound, upper_bound);

        let assignments = self.satisfaction_solver.assignments_mut();
        let mut kept = values.into_iter().peekable();
        for value in lower_bound..=upper_bound {
            if kept.peek() == Some(&value) {
                let _ = kept.next();
            } else {
                // The extremes are kept, so removing interior values cannot empty the domain.
                assignments
                    .remove_value(domain_id, value)
                    .expect("removing interior values cannot empty the domain");
            }
        }
        assignments.clear_events();

        domain_id
    }

    /// Create a new named integer variable whose domain is an explicit set of values.
    pub fn new_named_sparse_integer(
        &mut self,
        values: impl Into<Vec<i32>>,
        name: impl Into<String>,
    ) -> DomainId {
        let domain_id = self.new_sparse_integer(values);
        self.variable_names.add(domain_id, name.into());
        domain_id
    }

    /// Create a new 0/1 variable.
    pub fn new_boolean(&mut self) -> DomainId {
        self.new_bounded_integer(0, 1)
    }

    /// The current lower bound of the variable.
    pub fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.satisfaction_solver.assignments().lower_bound(domain_id)
    }

    /// The current upper bound of the variable.
    pub fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.satisfaction_solver.assignments().upper_bound(domain_id)
    }

    /// Whether `value` is currently in the domain of the variable.
    pub fn contains_value(&self, domain_id: DomainId, value: i32) -> bool {
        self.satisfaction_solver.assignments().contains(domain_id, value)
    }

    /// The values currently in the domain of the variable, in increasing order.
    pub fn domain_values(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.satisfaction_solver
            .assignments()
            .domain_iterator(domain_id)
    }

    /// The name given to `domain_id` at creation, if any.
    pub fn variable_name(&self, domain_id: DomainId) -> Option<&str> {
        self.variable_names.get(domain_id)
    }

    /// Add a constraint to the solver.
    ///
    /// Returns a [`ConstraintOperationError`] when the constraint conflicts with the root-level
    /// domains; the solver then reports unsatisfiability from every subsequent solve call.
    pub fn add_constraint(
        &mut self,
        constraint: impl Constraint,
    ) -> Result<(), ConstraintOperationError> {
        constraint.post(self)
    }

    pub(crate) fn add_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<(), ConstraintOperationError> {
        self.satisfaction_solver.add_propagator(propagator).map(|_| ())
    }

    /// The default branching strategy over all variables currently in the solver.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self
            .satisfaction_solver
            .assignments()
            .domain_ids()
            .collect::<Vec<_>>();
        IndependentVariableValueBrancher::new(SmallestDomain::new(&variables), InDomainMin)
    }

    /// Search for any solution.
    pub fn satisfy(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
    ) -> SatisfactionResult {
        match self.satisfaction_solver.solve(brancher, termination, None) {
            SolveConclusion::Solution(solution) => SatisfactionResult::Satisfiable(solution),
            SolveConclusion::Exhausted => SatisfactionResult::Unsatisfiable,
            SolveConclusion::Stopped => SatisfactionResult::Unknown,
            SolveConclusion::BoundReached => {
                unreachable!("a satisfaction search has no objective bound to reach")
            }
        }
    }

    /// Search for the best solution under the given branch-and-bound procedure.
    ///
    /// The call never fails for infeasibility or budget exhaustion; those are result variants.
    pub fn optimise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        procedure: BranchAndBound,
    ) -> OptimisationResult {
        let mut tracker = procedure.into_tracker();
        let conclusion = self
            .satisfaction_solver
            .solve(brancher, termination, Some(&mut tracker));

        match conclusion {
            SolveConclusion::Solution(_) => {
                unreachable!("an optimisation search explores past the first solution")
            }
            SolveConclusion::Exhausted => {
                tracker.close_exhausted();
                match tracker.into_incumbent() {
                    Some(best) => OptimisationResult::Optimal(best),
                    None => OptimisationResult::Unsatisfiable,
                }
            }
            SolveConclusion::BoundReached => {
                let optimal = tracker.is_optimal();
                let bound = tracker.proven_bound();
                let best = tracker
                    .into_incumbent()
                    .expect("the bound can only be reached with an incumbent");
                if optimal {
                    OptimisationResult::Optimal(best)
                } else {
                    OptimisationResult::Satisfiable {
                        best,
                        bound: bound
                            .expect("the gap can only be evaluated with a proven bound"),
                    }
                }
            }
            SolveConclusion::Stopped => {
                let bound = tracker.proven_bound();
                match tracker.into_incumbent() {
                    Some(best) => OptimisationResult::Satisfiable {
                        best,
                        bound: bound
                            .expect("an incumbent implies the root bound was recorded"),
                    },
                    None => OptimisationResult::Unknown { bound },
                }
            }
        }
    }

    /// Minimise a linear objective; shorthand for [`Solver::optimise`] with a plain
    /// [`BranchAndBound`].
    pub fn minimise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        objective: Objective,
    ) -> OptimisationResult {
        self.optimise(
            brancher,
            termination,
            BranchAndBound::new(OptimisationDirection::Minimise, objective),
        )
    }

    /// Maximise a linear objective; shorthand for [`Solver::optimise`] with a plain
    /// [`BranchAndBound`].
    pub fn maximise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        objective: Objective,
    ) -> OptimisationResult {
        self.optimise(
            brancher,
            termination,
            BranchAndBound::new(OptimisationDirection::Maximise, objective),
        )
    }

    pub fn statistics(&self) -> &SolverStatistics {
        self.satisfaction_solver.statistics()
    }

    /// Log the search statistics in the `{prefix} {name}={value}` line format.
    pub fn log_statistics(&self) {
        self.statistics().log("%%");
    }
}
