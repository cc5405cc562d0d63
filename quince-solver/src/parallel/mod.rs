//! Partitioned parallel solving.
//!
//! A single search is strictly sequential over its domain store, so parallelism is obtained by
//! partitioning the search tree instead: the domain of one branching variable is split into
//! disjoint slices, and an independent solver instance per slice explores its part of the tree
//! on its own thread. Workers share nothing except the [`SharedIncumbent`] used for pruning and
//! a global cancellation token; every worker honours the deadline at its own node boundaries.
//!
//! The aggregated answer takes the best incumbent across workers and the *weakest* bound across
//! partitions, so optimality is only claimed when every partition completed.

mod shared_incumbent;

pub use shared_incumbent::SharedIncumbent;

use std::sync::Arc;
use std::thread;

use log::debug;

use crate::api::solver::SolveOptions;
use crate::basic_types::Solution;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::value_selection::WarmStart;
use crate::branching::variable_selection::SmallestDomain;
use crate::constraints;
use crate::engine::termination::Cancellation;
use crate::engine::termination::Combinator;
use crate::engine::termination::DecisionBudget;
use crate::engine::termination::TimeBudget;
use crate::model::DomainSpec;
use crate::model::Model;
use crate::model::ModelError;
use crate::model::ModelInstance;
use crate::optimisation::BranchAndBound;
use crate::optimisation::OptimisationDirection;
use crate::results::OptimisationResult;
use crate::results::SatisfactionResult;
use crate::results::SolveOutcome;
use crate::results::SolveStatus;

/// One partition of the search: restrict `variable` to `[lower_bound, upper_bound]`. `None`
/// leaves the search unrestricted (single-partition solve).
type Slice = Option<(u32, i32, i32)>;

/// Solve `model` under `options`, distributing the search over `options.workers` threads when
/// more than one is requested.
///
/// Infeasibility and budget exhaustion are statuses on the returned [`SolveOutcome`]; only a
/// malformed model or warm start is an error.
pub fn solve(model: &Model, options: &SolveOptions) -> Result<SolveOutcome, ModelError> {
    model.validate()?;

    for &(variable, _) in &options.warm_start {
        if variable as usize >= model.num_variables() {
            return Err(ModelError::UnknownWarmStartVariable { variable });
        }
    }

    let slices = partition_slices(model, options.workers.max(1) as usize);
    debug!("solving with {} partition(s)", slices.len());

    if model.has_objective() {
        Ok(solve_optimisation(model, options, slices))
    } else {
        Ok(solve_satisfaction(model, options, slices))
    }
}

/// Split the domain of the first variable with more than one value into near-equal contiguous
/// slices, one per requested worker. With nothing to split (or one worker) the search runs as a
/// single unrestricted partition.
fn partition_slices(model: &Model, workers: usize) -> Vec<Slice> {
    if workers <= 1 {
        return vec![None];
    }

    for (index, spec) in model.variables().iter().enumerate() {
        let values: Vec<i32> = match &spec.domain {
            DomainSpec::Interval {
                lower_bound,
                upper_bound,
            } => {
                if lower_bound >= upper_bound {
                    continue;
                }
                // Contiguous, so only the boundaries matter.
                vec![*lower_bound, *upper_bound]
            }
            DomainSpec::Sparse(values) => {
                let mut values = values.clone();
                values.sort_unstable();
                values.dedup();
                if values.len() < 2 {
                    continue;
                }
                values
            }
            DomainSpec::Boolean => vec![0, 1],
        };

        let (lower_bound, upper_bound) = (values[0], values[values.len() - 1]);
        let width = (upper_bound as i64 - lower_bound as i64 + 1) as usize;
        let num_slices = workers.min(width);

        let mut slices = Vec::with_capacity(num_slices);
        let base = width / num_slices;
        let extra = width % num_slices;
        let mut low = lower_bound as i64;
        for slice_index in 0..num_slices {
            let size = base + usize::from(slice_index < extra);
            let high = low + size as i64 - 1;
            slices.push(Some((index as u32, low as i32, high as i32)));
            low = high + 1;
        }
        return slices;
    }

    vec![None]
}

fn solve_optimisation(model: &Model, options: &SolveOptions, slices: Vec<Slice>) -> SolveOutcome {
    let direction = model
        .objective()
        .map(|(direction, _)| direction)
        .expect("the optimisation path requires an objective");

    let shared = Arc::new(SharedIncumbent::default());
    let cancellation = Cancellation::new();

    let results: Vec<OptimisationResult> = thread::scope(|scope| {
        let handles = slices
            .into_iter()
            .map(|slice| {
                let shared = Arc::clone(&shared);
                let cancellation = cancellation.clone();
                scope.spawn(move || {
                    optimisation_worker(model, options, slice, shared, cancellation)
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("a search worker panicked"))
            .collect()
    });

    aggregate_optimisation(direction, results)
}

fn optimisation_worker(
    model: &Model,
    options: &SolveOptions,
    slice: Slice,
    shared: Arc<SharedIncumbent>,
    cancellation: Cancellation,
) -> OptimisationResult {
    let ModelInstance {
        mut solver,
        variables,
        objective,
    } = model
        .instantiate()
        .expect("the model was validated before partitioning");
    let (direction, objective) =
        objective.expect("the optimisation path requires an objective");

    apply_slice(&mut solver, &variables, slice);

    let hints = options
        .warm_start
        .iter()
        .map(|&(variable, value)| (variables[variable as usize], value))
        .collect::<Vec<_>>();
    let mut brancher = IndependentVariableValueBrancher::new(
        SmallestDomain::new(&variables),
        WarmStart::new(hints),
    );
    let mut termination = worker_termination(options, cancellation);

    let mut procedure =
        BranchAndBound::new(direction, objective).with_shared_incumbent(shared);
    if let Some(target_gap) = options.target_gap {
        procedure = procedure.with_target_gap(target_gap);
    }

    solver.optimise(&mut brancher, &mut termination, procedure)
}

fn solve_satisfaction(model: &Model, options: &SolveOptions, slices: Vec<Slice>) -> SolveOutcome {
    let cancellation = Cancellation::new();

    let results: Vec<SatisfactionResult> = thread::scope(|scope| {
        let handles = slices
            .into_iter()
            .map(|slice| {
                let cancellation = cancellation.clone();
                scope.spawn(move || satisfaction_worker(model, options, slice, cancellation))
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("a search worker panicked"))
            .collect()
    });

    let mut all_infeasible = true;
    let mut solution: Option<Solution> = None;
    for result in results {
        match result {
            SatisfactionResult::Satisfiable(found) => {
                all_infeasible = false;
                if solution.is_none() {
                    solution = Some(found);
                }
            }
            SatisfactionResult::Unsatisfiable => {}
            SatisfactionResult::Unknown => all_infeasible = false,
        }
    }

    match solution {
        Some(solution) => SolveOutcome {
            status: SolveStatus::Feasible,
            solution: Some(solution),
            bound: None,
        },
        None if all_infeasible => SolveOutcome {
            status: SolveStatus::Infeasible,
            solution: None,
            bound: None,
        },
        None => SolveOutcome {
            status: SolveStatus::Unknown,
            solution: None,
            bound: None,
        },
    }
}

fn satisfaction_worker(
    model: &Model,
    options: &SolveOptions,
    slice: Slice,
    cancellation: Cancellation,
) -> SatisfactionResult {
    let ModelInstance {
        mut solver,
        variables,
        ..
    } = model
        .instantiate()
        .expect("the model was validated before partitioning");

    apply_slice(&mut solver, &variables, slice);

    let hints = options
        .warm_start
        .iter()
        .map(|&(variable, value)| (variables[variable as usize], value))
        .collect::<Vec<_>>();
    let mut brancher = IndependentVariableValueBrancher::new(
        SmallestDomain::new(&variables),
        WarmStart::new(hints),
    );
    let mut termination = worker_termination(options, cancellation.clone());

    let result = solver.satisfy(&mut brancher, &mut termination);
    if matches!(result, SatisfactionResult::Satisfiable(_)) {
        // One solution answers the whole problem; the other partitions can stop.
        cancellation.cancel();
    }
    result
}

fn apply_slice(
    solver: &mut crate::Solver,
    variables: &[crate::engine::variables::DomainId],
    slice: Slice,
) {
    if let Some((variable, lower_bound, upper_bound)) = slice {
        let domain_id = variables[variable as usize];
        // An empty slice flags the solver infeasible, which is the correct partition answer.
        let _ = solver.add_constraint(constraints::less_than_or_equals(
            vec![(1, domain_id)],
            upper_bound as i64,
        ));
        let _ = solver.add_constraint(constraints::less_than_or_equals(
            vec![(-1, domain_id)],
            -(lower_bound as i64),
        ));
    }
}

fn worker_termination(
    options: &SolveOptions,
    cancellation: Cancellation,
) -> impl crate::termination::TerminationCondition {
    Combinator::new(
        Combinator::new(
            options.deadline.map(TimeBudget::starting_now),
            options.decision_budget.map(DecisionBudget::new),
        ),
        cancellation,
    )
}

fn aggregate_optimisation(
    direction: OptimisationDirection,
    results: Vec<OptimisationResult>,
) -> SolveOutcome {
    let better = |candidate: i64, current: i64| match direction {
        OptimisationDirection::Minimise => candidate < current,
        OptimisationDirection::Maximise => candidate > current,
    };
    let weakest = |a: i64, b: i64| match direction {
        OptimisationDirection::Minimise => a.min(b),
        OptimisationDirection::Maximise => a.max(b),
    };

    let mut best: Option<Solution> = None;
    let mut all_complete = true;
    let mut bound: Option<i64> = None;
    let mut bound_unknown = false;

    let consider = |best: &mut Option<Solution>, candidate: Solution| {
        let candidate_value = candidate
            .objective_value()
            .expect("optimisation solutions carry their objective value");
        let improves = best
            .as_ref()
            .and_then(|current| current.objective_value())
            .map_or(true, |current| better(candidate_value, current));
        if improves {
            *best = Some(candidate);
        }
    };

    for result in results {
        match result {
            OptimisationResult::Optimal(solution) => {
                let partition_bound = solution
                    .objective_value()
                    .expect("optimisation solutions carry their objective value");
                bound = Some(bound.map_or(partition_bound, |b| weakest(b, partition_bound)));
                consider(&mut best, solution);
            }
            OptimisationResult::Satisfiable {
                best: partition_best,
                bound: partition_bound,
            } => {
                all_complete = false;
                bound = Some(bound.map_or(partition_bound, |b| weakest(b, partition_bound)));
                consider(&mut best, partition_best);
            }
            // An infeasible partition constrains nothing.
            OptimisationResult::Unsatisfiable => {}
            OptimisationResult::Unknown {
                bound: partition_bound,
            } => {
                all_complete = false;
                match partition_bound {
                    Some(partition_bound) => {
                        bound = Some(bound.map_or(partition_bound, |b| weakest(b, partition_bound)));
                    }
                    None => bound_unknown = true,
                }
            }
        }
    }

    if all_complete {
        match best {
            Some(solution) => SolveOutcome {
                status: SolveStatus::Optimal,
                bound: solution.objective_value(),
                solution: Some(solution),
            },
            None => SolveOutcome {
                status: SolveStatus::Infeasible,
                solution: None,
                bound: None,
            },
        }
    } else {
        let bound = if bound_unknown { None } else { bound };
        match best {
            Some(solution) => SolveOutcome {
                status: SolveStatus::Feasible,
                solution: Some(solution),
                bound,
            },
            None => SolveOutcome {
                status: SolveStatus::Unknown,
                solution: None,
                bound,
            },
        }
    }
}
