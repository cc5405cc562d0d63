//! The n-queens puzzle: place `n` queens on an `n x n` board such that no two attack each
//! other. One variable per row holds the queen's column; the three `all_different` groups rule
//! out shared columns and diagonals.

use quince_solver::constraints;
use quince_solver::results::SatisfactionResult;
use quince_solver::termination::Indefinite;
use quince_solver::Solver;

fn main() {
    env_logger::init();

    let n: u32 = std::env::args()
        .nth(1)
        .and_then(|argument| argument.parse().ok())
        .unwrap_or(8);

    if n < 2 {
        println!("Please provide an 'n > 1'");
        return;
    }

    let mut solver = Solver::default();

    let queens = (0..n)
        .map(|row| solver.new_named_bounded_integer(0, n as i32 - 1, format!("q{row}")))
        .collect::<Vec<_>>();

    // Columns are distinct.
    let _ = solver.add_constraint(constraints::all_different(queens.clone()));

    // Diagonals are distinct: q_i + i and q_i - i are all-different, expressed through
    // auxiliary variables tied to the queens with equality constraints.
    let mut ascending = Vec::with_capacity(n as usize);
    let mut descending = Vec::with_capacity(n as usize);
    for (row, &queen) in queens.iter().enumerate() {
        let offset = row as i32;

        let up = solver.new_bounded_integer(offset, n as i32 - 1 + offset);
        let _ = solver.add_constraint(constraints::equals(
            vec![(1, up), (-1, queen)],
            offset as i64,
        ));
        ascending.push(up);

        let down = solver.new_bounded_integer(-offset, n as i32 - 1 - offset);
        let _ = solver.add_constraint(constraints::equals(
            vec![(1, down), (-1, queen)],
            -(offset as i64),
        ));
        descending.push(down);
    }
    let _ = solver.add_constraint(constraints::all_different(ascending));
    let _ = solver.add_constraint(constraints::all_different(descending));

    let mut brancher = solver.default_brancher();
    match solver.satisfy(&mut brancher, &mut Indefinite) {
        SatisfactionResult::Satisfiable(solution) => {
            let row_separator = format!("{}+", "+---".repeat(n as usize));

            for &queen in &queens {
                println!("{row_separator}");

                let queen_col = solution.value(queen);
                for col in 0..n as i32 {
                    print!("{}", if queen_col == col { "| * " } else { "|   " });
                }
                println!("|");
            }
            println!("{row_separator}");
        }
        SatisfactionResult::Unsatisfiable => {
            println!("{n}-queens is unsatisfiable.");
        }
        SatisfactionResult::Unknown => {
            println!("The search was interrupted.");
        }
    }

    solver.log_statistics();
}
