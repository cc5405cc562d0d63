#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use quince_solver::model::ConstraintSpec;
use quince_solver::model::LinearRelation;
use quince_solver::model::Model;
use quince_solver::model::ModelError;
use quince_solver::model::TaskSpec;
use quince_solver::optimisation::OptimisationDirection;
use quince_solver::parallel;
use quince_solver::results::SolveStatus;
use quince_solver::SolveOptions;

/// Three tasks on one machine plus a makespan variable to minimise.
fn single_machine_model(durations: &[i32]) -> (Model, Vec<u32>, u32) {
    let horizon: i32 = durations.iter().sum();

    let mut model = Model::default();
    let starts = durations
        .iter()
        .map(|_| model.new_variable(0, horizon))
        .collect::<Vec<_>>();
    let makespan = model.new_variable(0, 2 * horizon);

    model.add_constraint(ConstraintSpec::Disjunctive(
        starts
            .iter()
            .zip(durations)
            .map(|(&start, &duration)| TaskSpec {
                start,
                duration,
                demand: 0,
            })
            .collect(),
    ));

    for (&start, &duration) in starts.iter().zip(durations) {
        model.add_constraint(ConstraintSpec::Linear {
            terms: vec![(1, start), (-1, makespan)],
            relation: LinearRelation::LessOrEqual,
            rhs: -(duration as i64),
        });
    }

    model.set_objective(OptimisationDirection::Minimise, vec![(1, makespan)]);

    (model, starts, makespan)
}

fn options_with_workers(workers: u32) -> SolveOptions {
    SolveOptions {
        workers,
        ..SolveOptions::default()
    }
}

#[test]
fn a_partitioned_solve_finds_the_sequential_optimum() {
    let (model, _, _) = single_machine_model(&[2, 3, 1]);

    let sequential = parallel::solve(&model, &options_with_workers(1)).expect("valid model");
    let partitioned = parallel::solve(&model, &options_with_workers(3)).expect("valid model");

    assert_eq!(SolveStatus::Optimal, sequential.status);
    assert_eq!(SolveStatus::Optimal, partitioned.status);
    assert_eq!(
        sequential
            .solution
            .as_ref()
            .and_then(|solution| solution.objective_value()),
        partitioned
            .solution
            .as_ref()
            .and_then(|solution| solution.objective_value())
    );
    assert_eq!(Some(6), partitioned.bound);
}

#[test]
fn partitioned_satisfaction_finds_a_permutation() {
    let mut model = Model::default();
    let variables = (0..3)
        .map(|_| model.new_variable(1, 3))
        .collect::<Vec<_>>();
    model.add_constraint(ConstraintSpec::AllDifferent(variables.clone()));

    let outcome = parallel::solve(&model, &options_with_workers(2)).expect("valid model");

    assert_eq!(SolveStatus::Feasible, outcome.status);
    let solution = outcome.solution.expect("a feasible outcome has a solution");
    let mut values = (0..3_u32)
        .map(|index| solution.value(quince_solver::variables::DomainId::new(index)))
        .collect::<Vec<_>>();
    values.sort_unstable();
    assert_eq!(vec![1, 2, 3], values);
}

#[test]
fn an_infeasible_model_is_infeasible_from_every_partition() {
    let mut model = Model::default();
    let variables = (0..4)
        .map(|_| model.new_variable(1, 3))
        .collect::<Vec<_>>();
    model.add_constraint(ConstraintSpec::AllDifferent(variables));

    let outcome = parallel::solve(&model, &options_with_workers(2)).expect("valid model");

    assert_eq!(SolveStatus::Infeasible, outcome.status);
    assert!(outcome.solution.is_none());
}

#[test]
fn a_warm_start_for_an_unknown_variable_is_rejected() {
    let (model, _, _) = single_machine_model(&[1, 1, 1]);

    let options = SolveOptions {
        warm_start: vec![(99, 0)],
        ..SolveOptions::default()
    };

    assert_eq!(
        Err(ModelError::UnknownWarmStartVariable { variable: 99 }),
        parallel::solve(&model, &options)
    );
}

#[test]
fn a_warm_start_guides_the_first_descent() {
    let (model, starts, _) = single_machine_model(&[2, 3, 1]);

    // Seed the known-optimal schedule; the search still proves optimality.
    let options = SolveOptions {
        warm_start: vec![(starts[0], 0), (starts[1], 2), (starts[2], 5)],
        ..SolveOptions::default()
    };

    let outcome = parallel::solve(&model, &options).expect("valid model");
    assert_eq!(SolveStatus::Optimal, outcome.status);
    assert_eq!(Some(6), outcome.bound);
}
