//! # Quince
//! Quince is a constraint-based combinatorial scheduling and optimisation engine. A problem is
//! stated as integer decision variables and constraints over them; the engine searches for a
//! feasible or provably optimal assignment with propagation, backtracking over a checkpointed
//! domain store, and branch-and-bound pruning.
//!
//! The engine supports a closed set of constraint kinds: linear (in)equalities, `all_different`,
//! precedence, cumulative resources, disjunctive (no-overlap) resources and boolean clauses.
//! Models and solutions can also cross a process boundary as compact binary messages via the
//! sibling `qmx-format` crate and [`model::solve_request`].
//!
//! # Solving a satisfaction problem
//! Variables and constraints are added through the [`Solver`]; a search needs a
//! [`branching::Brancher`] and a [`termination::TerminationCondition`]:
//! ```rust
//! use quince_solver::constraints;
//! use quince_solver::results::SatisfactionResult;
//! use quince_solver::termination::Indefinite;
//! use quince_solver::Solver;
//!
//! let mut solver = Solver::default();
//!
//! let x = solver.new_bounded_integer(5, 10);
//! let y = solver.new_bounded_integer(-3, 15);
//!
//! // x + y = 12
//! solver
//!     .add_constraint(constraints::equals(vec![(1, x), (1, y)], 12))
//!     .expect("the constraint is not infeasible at the root");
//!
//! let mut brancher = solver.default_brancher();
//! match solver.satisfy(&mut brancher, &mut Indefinite) {
//!     SatisfactionResult::Satisfiable(solution) => {
//!         assert_eq!(12, solution.value(x) + solution.value(y));
//!     }
//!     _ => panic!("this problem has a solution"),
//! }
//! ```
//!
//! # Optimising an objective
//! [`Solver::minimise`] and [`Solver::maximise`] run a branch-and-bound search over a linear
//! [`optimisation::Objective`]; when the search is not cut short by the termination condition
//! the result is proven optimal:
//! ```rust
//! use quince_solver::constraints;
//! use quince_solver::optimisation::Objective;
//! use quince_solver::results::OptimisationResult;
//! use quince_solver::termination::Indefinite;
//! use quince_solver::Solver;
//!
//! let mut solver = Solver::default();
//!
//! let x = solver.new_bounded_integer(0, 9);
//! let y = solver.new_bounded_integer(0, 9);
//!
//! // x + y >= 8
//! solver
//!     .add_constraint(constraints::less_than_or_equals(vec![(-1, x), (-1, y)], -8))
//!     .expect("the constraint is not infeasible at the root");
//!
//! let mut brancher = solver.default_brancher();
//! let result = solver.minimise(
//!     &mut brancher,
//!     &mut Indefinite,
//!     Objective::new(vec![(1, x), (2, y)]),
//! );
//!
//! match result {
//!     OptimisationResult::Optimal(solution) => {
//!         // The cheapest way to reach 8 avoids y entirely.
//!         assert_eq!(Some(8), solution.objective_value());
//!         assert_eq!(0, solution.value(y));
//!     }
//!     _ => panic!("this problem has an optimal solution"),
//! }
//! ```
//!
//! # Budgets and cancellation
//! A solve is bounded by composing [`termination`] conditions: wall-clock deadlines, decision
//! budgets, and cooperative [`termination::Cancellation`] tokens. Running out of budget is not
//! an error: the result reports the best incumbent found (or that nothing is known yet), and
//! never claims optimality.
//!
//! # Parallel solving
//! [`parallel::solve`] partitions the search tree over several worker threads which share only
//! the incumbent; see the [`parallel`] module documentation.
//!
//! ## Feature flags
//! - `debug-checks`: enable expensive self-checking assertions (full constraint re-verification
//!   on every solution). Slows the solver down considerably; off by default.

pub(crate) mod basic_types;
pub mod branching;
pub mod constraints;
pub mod containers;
mod engine;
pub mod model;
pub mod optimisation;
pub mod parallel;
pub(crate) mod propagators;
pub mod statistics;

mod api;
mod quince_asserts;
mod variable_names;

#[doc(hidden)]
pub mod asserts {
    pub use crate::quince_asserts::*;
}

pub use api::outputs as results;
pub use api::solver::DefaultBrancher;
pub use api::solver::SolveOptions;
pub use api::solver::Solver;
pub use basic_types::ConstraintOperationError;
pub use engine::termination;
pub use engine::variables;
