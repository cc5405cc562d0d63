#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use quince_solver::constraints;
use quince_solver::constraints::CumulativeTask;
use quince_solver::constraints::Literal;
use quince_solver::results::SatisfactionResult;
use quince_solver::termination::Indefinite;
use quince_solver::Solver;

#[test]
fn a_model_without_constraints_accepts_the_first_complete_assignment() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(2, 7);
    let y = solver.new_bounded_integer(-1, 4);

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            assert!((2..=7).contains(&solution.value(x)));
            assert!((-1..=4).contains(&solution.value(y)));
        }
        _ => panic!("an unconstrained model is satisfiable"),
    }
}

#[test]
fn jointly_contradictory_constraints_are_reported_infeasible() {
    let mut solver = Solver::default();
    let x = solver.new_bounded_integer(0, 10);

    solver
        .add_constraint(constraints::equals(vec![(1, x)], 1))
        .expect("satisfiable on its own");
    // Individually satisfiable, but jointly contradictory with the first constraint; the
    // conflict is already visible at the root.
    let result = solver.add_constraint(constraints::equals(vec![(1, x)], 2));
    assert!(result.is_err());

    let mut brancher = solver.default_brancher();
    assert!(matches!(
        solver.satisfy(&mut brancher, &mut Indefinite),
        SatisfactionResult::Unsatisfiable
    ));
}

#[test]
fn pigeonhole_all_different_is_infeasible() {
    let mut solver = Solver::default();
    let variables = (0..4)
        .map(|_| solver.new_bounded_integer(1, 3))
        .collect::<Vec<_>>();

    solver
        .add_constraint(constraints::all_different(variables))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    assert!(matches!(
        solver.satisfy(&mut brancher, &mut Indefinite),
        SatisfactionResult::Unsatisfiable
    ));
}

#[test]
fn all_different_solutions_are_pairwise_distinct() {
    let mut solver = Solver::default();
    let variables = (0..3)
        .map(|_| solver.new_bounded_integer(1, 3))
        .collect::<Vec<_>>();

    solver
        .add_constraint(constraints::all_different(variables.clone()))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            let mut values = variables
                .iter()
                .map(|&variable| solution.value(variable))
                .collect::<Vec<_>>();
            values.sort_unstable();
            values.dedup();
            assert_eq!(3, values.len());
        }
        _ => panic!("three variables over three values admit a permutation"),
    }
}

#[test]
fn sparse_domains_exclude_their_holes_from_solutions() {
    let mut solver = Solver::default();
    let x = solver.new_sparse_integer(vec![2, 5, 9]);
    let y = solver.new_bounded_integer(0, 1);

    solver
        .add_constraint(constraints::less_than_or_equals(
            vec![(1, x), (1, y)],
            5,
        ))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            assert!([2, 5].contains(&solution.value(x)));
        }
        _ => panic!("x = 2 is a solution"),
    }
}

#[test]
fn unit_clauses_propagate_through_the_formula() {
    let mut solver = Solver::default();
    let a = solver.new_boolean();
    let b = solver.new_boolean();
    let c = solver.new_boolean();

    // a, (!a or b), (!b or c): forces all three to 1.
    solver
        .add_constraint(constraints::clause(vec![Literal::positive(a)]))
        .expect("no conflict");
    solver
        .add_constraint(constraints::clause(vec![
            Literal::negative(a),
            Literal::positive(b),
        ]))
        .expect("no conflict");
    solver
        .add_constraint(constraints::clause(vec![
            Literal::negative(b),
            Literal::positive(c),
        ]))
        .expect("no conflict");

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            assert_eq!(1, solution.value(a));
            assert_eq!(1, solution.value(b));
            assert_eq!(1, solution.value(c));
        }
        _ => panic!("the formula is satisfiable"),
    }
}

#[test]
fn cumulative_schedules_respect_the_capacity() {
    let mut solver = Solver::default();
    let starts = (0..3)
        .map(|_| solver.new_bounded_integer(0, 6))
        .collect::<Vec<_>>();
    let durations = [2, 2, 3];

    let tasks = starts
        .iter()
        .zip(durations)
        .map(|(&start_variable, processing_time)| CumulativeTask {
            start_variable,
            processing_time,
            resource_usage: 1,
        })
        .collect::<Vec<_>>();
    solver
        .add_constraint(constraints::cumulative(tasks, 2))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            // Re-check the resource profile by hand.
            for time in 0..10 {
                let usage: i32 = starts
                    .iter()
                    .zip(durations)
                    .filter(|&(&start, duration)| {
                        let start = solution.value(start);
                        time >= start && time < start + duration
                    })
                    .count() as i32;
                assert!(usage <= 2, "capacity exceeded at time {time}");
            }
        }
        _ => panic!("the tasks fit within the horizon"),
    }
}

#[test]
fn precedences_order_the_assigned_start_times() {
    let mut solver = Solver::default();
    let first = solver.new_bounded_integer(0, 10);
    let second = solver.new_bounded_integer(0, 10);

    solver
        .add_constraint(constraints::precedence(first, second, 4))
        .expect("no conflict at the root");

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            assert!(solution.value(first) + 4 <= solution.value(second));
        }
        _ => panic!("the precedence leaves room in the horizon"),
    }
}
