//! Single-machine scheduling: a set of jobs with processing times and precedences competes for
//! one machine, and the makespan is minimised with branch-and-bound.

use quince_solver::constraints;
use quince_solver::constraints::DisjunctiveTask;
use quince_solver::optimisation::Objective;
use quince_solver::results::OptimisationResult;
use quince_solver::termination::Indefinite;
use quince_solver::Solver;

fn main() {
    env_logger::init();

    let jobs: &[(&str, i32)] = &[("cut", 4), ("weld", 3), ("paint", 2), ("inspect", 1)];
    let horizon: i32 = jobs.iter().map(|&(_, duration)| duration).sum();

    let mut solver = Solver::default();

    let starts = jobs
        .iter()
        .map(|&(name, _)| solver.new_named_bounded_integer(0, horizon, name))
        .collect::<Vec<_>>();

    // One machine: no two jobs overlap.
    let tasks = starts
        .iter()
        .zip(jobs)
        .map(|(&start_variable, &(_, processing_time))| DisjunctiveTask {
            start_variable,
            processing_time,
        })
        .collect::<Vec<_>>();
    let _ = solver.add_constraint(constraints::disjunctive(tasks));

    // Painting happens after welding, inspection after painting.
    let _ = solver.add_constraint(constraints::precedence(starts[1], starts[2], jobs[1].1));
    let _ = solver.add_constraint(constraints::precedence(starts[2], starts[3], jobs[2].1));

    // The makespan dominates every job's completion time.
    let makespan = solver.new_named_bounded_integer(0, horizon, "makespan");
    for (&start, &(_, duration)) in starts.iter().zip(jobs) {
        let _ = solver.add_constraint(constraints::less_than_or_equals(
            vec![(1, start), (-1, makespan)],
            -(duration as i64),
        ));
    }

    let mut brancher = solver.default_brancher();
    match solver.minimise(&mut brancher, &mut Indefinite, Objective::single(makespan)) {
        OptimisationResult::Optimal(solution) => {
            println!("optimal makespan: {}", solution.value(makespan));

            let mut order = starts
                .iter()
                .zip(jobs)
                .map(|(&start, &(name, duration))| (solution.value(start), name, duration))
                .collect::<Vec<_>>();
            order.sort_unstable();

            for (start, name, duration) in order {
                println!("{start:>3} .. {:>3}  {name}", start + duration);
            }
        }
        OptimisationResult::Satisfiable { best, bound } => {
            println!(
                "best makespan found: {} (proven bound {bound})",
                best.value(makespan)
            );
        }
        OptimisationResult::Unsatisfiable => println!("no feasible schedule"),
        OptimisationResult::Unknown { .. } => println!("the search was interrupted"),
    }

    solver.log_statistics();
}
