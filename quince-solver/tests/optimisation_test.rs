#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::time::Duration;
use std::time::Instant;

use quince_solver::branching::Brancher;
use quince_solver::branching::Decision;
use quince_solver::branching::SelectionContext;
use quince_solver::constraints;
use quince_solver::constraints::DisjunctiveTask;
use quince_solver::optimisation::BranchAndBound;
use quince_solver::optimisation::Objective;
use quince_solver::optimisation::OptimisationDirection;
use quince_solver::results::OptimisationResult;
use quince_solver::results::Solution;
use quince_solver::results::SolveOutcome;
use quince_solver::results::SolveStatus;
use quince_solver::termination::DecisionBudget;
use quince_solver::termination::Indefinite;
use quince_solver::termination::TimeBudget;
use quince_solver::DefaultBrancher;
use quince_solver::Solver;

/// Builds the single-machine scenario: three tasks with the given durations must not overlap,
/// and the makespan variable dominates every completion time.
fn single_machine(durations: &[i32]) -> (Solver, Vec<quince_solver::variables::DomainId>, quince_solver::variables::DomainId) {
    let horizon: i32 = durations.iter().sum();

    let mut solver = Solver::default();
    let starts = durations
        .iter()
        .map(|_| solver.new_bounded_integer(0, horizon))
        .collect::<Vec<_>>();
    let makespan = solver.new_bounded_integer(0, 2 * horizon);

    let tasks = starts
        .iter()
        .zip(durations)
        .map(|(&start_variable, &processing_time)| DisjunctiveTask {
            start_variable,
            processing_time,
        })
        .collect::<Vec<_>>();
    solver
        .add_constraint(constraints::disjunctive(tasks))
        .expect("no conflict at the root");

    for (&start, &duration) in starts.iter().zip(durations) {
        solver
            .add_constraint(constraints::less_than_or_equals(
                vec![(1, start), (-1, makespan)],
                -(duration as i64),
            ))
            .expect("no conflict at the root");
    }

    (solver, starts, makespan)
}

#[test]
fn three_tasks_on_one_machine_have_makespan_six() {
    let durations = [2, 3, 1];
    let (mut solver, starts, makespan) = single_machine(&durations);

    let mut brancher = solver.default_brancher();
    match solver.minimise(&mut brancher, &mut Indefinite, Objective::single(makespan)) {
        OptimisationResult::Optimal(solution) => {
            assert_eq!(Some(6), solution.objective_value());
            assert_eq!(6, solution.value(makespan));

            // The optimum is some permutation of the three tasks back to back.
            let mut spans = starts
                .iter()
                .zip(durations)
                .map(|(&start, duration)| (solution.value(start), duration))
                .collect::<Vec<_>>();
            spans.sort_unstable();
            let mut end_of_previous = 0;
            for (start, duration) in spans {
                assert!(start >= end_of_previous, "tasks overlap");
                end_of_previous = start + duration;
            }
            assert_eq!(6, end_of_previous);
        }
        other => panic!("expected an optimal schedule, got {other:?}"),
    }
}

/// A brancher which records the objective value of every incumbent the search reports.
struct IncumbentRecorder {
    inner: DefaultBrancher,
    incumbents: Vec<i64>,
}

impl Brancher for IncumbentRecorder {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        self.inner.next_decision(context)
    }

    fn on_solution(&mut self, solution: &Solution) {
        if let Some(value) = solution.objective_value() {
            self.incumbents.push(value);
        }
    }

    fn on_backtrack(&mut self) {
        self.inner.on_backtrack();
    }
}

#[test]
fn incumbents_improve_monotonically_under_minimisation() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 5);

    // Minimising -x makes the in-domain-min descent find a chain of improving incumbents.
    let mut brancher = IncumbentRecorder {
        inner: solver.default_brancher(),
        incumbents: Vec::new(),
    };
    let result = solver.minimise(&mut brancher, &mut Indefinite, Objective::new(vec![(-1, x)]));

    assert!(matches!(result, OptimisationResult::Optimal(_)));
    assert!(brancher.incumbents.len() > 1, "expected several incumbents");
    for window in brancher.incumbents.windows(2) {
        assert!(
            window[1] < window[0],
            "incumbent sequence {:?} is not strictly improving",
            brancher.incumbents
        );
    }
    assert_eq!(Some(&-5), brancher.incumbents.last());
}

#[test]
fn optimal_status_implies_the_objective_equals_the_bound() {
    let durations = [2, 3, 1];
    let (mut solver, _, makespan) = single_machine(&durations);

    let mut brancher = solver.default_brancher();
    let result = solver.minimise(&mut brancher, &mut Indefinite, Objective::single(makespan));

    let outcome = SolveOutcome::from(result);
    assert_eq!(SolveStatus::Optimal, outcome.status);
    assert_eq!(
        outcome.bound,
        outcome.solution.as_ref().and_then(Solution::objective_value)
    );
}

#[test]
fn a_zero_deadline_never_claims_optimality() {
    let durations = [2, 3, 1];
    let (mut solver, _, makespan) = single_machine(&durations);

    let started = Instant::now();
    let mut brancher = solver.default_brancher();
    let mut termination = TimeBudget::starting_now(Duration::ZERO);
    let result = solver.minimise(&mut brancher, &mut termination, Objective::single(makespan));

    assert!(
        !matches!(result, OptimisationResult::Optimal(_)),
        "a zero budget cannot prove optimality"
    );
    assert!(matches!(
        result,
        OptimisationResult::Unknown { .. } | OptimisationResult::Satisfiable { .. }
    ));
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "a zero deadline must return promptly"
    );
}

#[test]
fn a_decision_budget_reports_the_incumbent_and_the_root_bound() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 50);

    let mut brancher = solver.default_brancher();
    let mut termination = DecisionBudget::new(5);
    let result = solver.minimise(&mut brancher, &mut termination, Objective::new(vec![(-1, x)]));

    match result {
        OptimisationResult::Satisfiable { best, bound } => {
            assert_eq!(-50, bound);
            assert!(best.objective_value().expect("has an objective") > bound);
        }
        other => panic!("expected a satisficing result, got {other:?}"),
    }
}

#[test]
fn a_generous_target_gap_stops_at_the_first_incumbent() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 30);

    let mut brancher = solver.default_brancher();
    let procedure = BranchAndBound::new(
        OptimisationDirection::Minimise,
        Objective::new(vec![(-1, x)]),
    )
    .with_target_gap(1_000.0);
    let result = solver.optimise(&mut brancher, &mut Indefinite, procedure);

    match result {
        OptimisationResult::Satisfiable { best, bound } => {
            assert_eq!(Some(0), best.objective_value());
            assert_eq!(-30, bound);
        }
        other => panic!("expected a gap-limited result, got {other:?}"),
    }
}

#[test]
fn maximisation_reports_values_in_the_requested_direction() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 9);
    let y = solver.new_bounded_integer(0, 9);

    solver
        .add_constraint(constraints::less_than_or_equals(vec![(1, x), (1, y)], 7))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    match solver.maximise(
        &mut brancher,
        &mut Indefinite,
        Objective::new(vec![(1, x), (1, y)]),
    ) {
        OptimisationResult::Optimal(solution) => {
            assert_eq!(Some(7), solution.objective_value());
            assert_eq!(7, solution.value(x) + solution.value(y));
        }
        other => panic!("expected an optimal solution, got {other:?}"),
    }
}

#[test]
fn an_infeasible_optimisation_is_unsatisfiable() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 5);

    solver
        .add_constraint(constraints::less_than_or_equals(vec![(1, x)], 3))
        .expect("satisfiable on its own");
    let _ = solver.add_constraint(constraints::less_than_or_equals(vec![(-1, x)], -4));

    let mut brancher = solver.default_brancher();
    assert!(matches!(
        solver.minimise(&mut brancher, &mut Indefinite, Objective::single(x)),
        OptimisationResult::Unsatisfiable
    ));
}
