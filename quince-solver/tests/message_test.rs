#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use qmx_format as qmx;
use quince_solver::model::solve_request;
use quince_solver::model::Model;
use quince_solver::model::ModelError;

/// A knapsack-flavoured model over wire ids that are deliberately not dense: maximise 3x + 2y
/// subject to x + y <= 4.
fn wire_model() -> qmx::Model {
    qmx::Model {
        variables: vec![
            qmx::Variable::bounded(10, 0, 4).named("x"),
            qmx::Variable::bounded(20, 0, 4).named("y"),
        ],
        constraints: vec![qmx::Constraint {
            kind: Some(qmx::ConstraintKind::Linear(qmx::LinearConstraint {
                terms: vec![
                    qmx::LinearTerm {
                        variable: 10,
                        coefficient: 1,
                    },
                    qmx::LinearTerm {
                        variable: 20,
                        coefficient: 1,
                    },
                ],
                relation: qmx::LinearRelation::LessOrEqual as i32,
                rhs: 4,
            })),
        }],
        objective: Some(qmx::Objective {
            direction: qmx::OptimisationDirection::Maximise as i32,
            terms: vec![
                qmx::LinearTerm {
                    variable: 10,
                    coefficient: 3,
                },
                qmx::LinearTerm {
                    variable: 20,
                    coefficient: 2,
                },
            ],
        }),
    }
}

#[test]
fn a_solve_request_is_answered_in_the_original_id_space() {
    let request = qmx::SolveRequest {
        model: Some(wire_model()),
        ..Default::default()
    };

    let solution = solve_request(&request).expect("a well-formed request");

    assert_eq!(qmx::SolutionStatus::Optimal, solution.status());
    // The optimum spends the whole budget on x.
    assert_eq!(Some(12), solution.objective_value);
    assert_eq!(Some(12), solution.bound);
    assert_eq!(Some(4), solution.value(10));
    assert_eq!(Some(0), solution.value(20));
}

#[test]
fn a_request_without_a_model_is_rejected() {
    let request = qmx::SolveRequest::default();

    assert_eq!(Err(ModelError::MissingModel), solve_request(&request));
}

#[test]
fn a_dangling_constraint_reference_is_rejected() {
    let mut model = wire_model();
    model.constraints.push(qmx::Constraint {
        kind: Some(qmx::ConstraintKind::AllDifferent(qmx::AllDifferent {
            variables: vec![10, 77],
        })),
    });

    let request = qmx::SolveRequest {
        model: Some(model),
        ..Default::default()
    };

    assert_eq!(
        Err(ModelError::DanglingVariable {
            constraint_index: 1,
            variable: 77
        }),
        solve_request(&request)
    );
}

#[test]
fn a_zero_deadline_request_never_reports_optimality() {
    let request = qmx::SolveRequest {
        model: Some(wire_model()),
        deadline_ms: Some(0),
        ..Default::default()
    };

    let solution = solve_request(&request).expect("a well-formed request");

    assert_ne!(qmx::SolutionStatus::Optimal, solution.status());
}

#[test]
fn an_infeasible_request_is_a_status_not_an_error() {
    let mut model = wire_model();
    // y >= 5 contradicts y's domain.
    model.constraints.push(qmx::Constraint {
        kind: Some(qmx::ConstraintKind::Linear(qmx::LinearConstraint {
            terms: vec![qmx::LinearTerm {
                variable: 20,
                coefficient: -1,
            }],
            relation: qmx::LinearRelation::LessOrEqual as i32,
            rhs: -5,
        })),
    });

    let request = qmx::SolveRequest {
        model: Some(model),
        ..Default::default()
    };

    let solution = solve_request(&request).expect("a well-formed request");

    assert_eq!(qmx::SolutionStatus::Infeasible, solution.status());
    assert_eq!(None, solution.objective_value);
    assert!(solution.assignments.is_empty());
}

#[test]
fn a_parallel_request_finds_the_same_optimum() {
    let request = qmx::SolveRequest {
        model: Some(wire_model()),
        workers: Some(3),
        ..Default::default()
    };

    let solution = solve_request(&request).expect("a well-formed request");

    assert_eq!(qmx::SolutionStatus::Optimal, solution.status());
    assert_eq!(Some(12), solution.objective_value);
}

#[test]
fn a_warm_start_over_unknown_ids_is_rejected() {
    let request = qmx::SolveRequest {
        model: Some(wire_model()),
        warm_start: vec![qmx::Assignment {
            variable: 999,
            value: 1,
        }],
        ..Default::default()
    };

    assert_eq!(
        Err(ModelError::UnknownWarmStartVariable { variable: 999 }),
        solve_request(&request)
    );
}

#[test]
fn native_models_encode_to_equivalent_messages() {
    let message = wire_model();
    let model = Model::from_message(&message).expect("a well-formed message");

    let encoded = model.to_message();

    // Ids are renumbered densely in message order; the structure is preserved.
    assert_eq!(2, encoded.variables.len());
    assert_eq!(1, encoded.constraints.len());
    assert!(encoded.objective.is_some());
    assert_eq!(
        Model::from_message(&encoded).expect("a well-formed message"),
        model
    );
}
