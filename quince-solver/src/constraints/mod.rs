//! Defines the constraints the solver provides out of the box.
//!
//! A constraint is a relation over variables, enforced in the solver through one or more
//! propagators. Constraints are created through the factory functions in this module and added
//! to the solver with [`Solver::add_constraint`]:
//!
//! ```
//! # use quince_solver::Solver;
//! # use quince_solver::constraints;
//! let mut solver = Solver::default();
//!
//! let a = solver.new_bounded_integer(0, 3);
//! let b = solver.new_bounded_integer(0, 3);
//!
//! solver
//!     .add_constraint(constraints::all_different(vec![a, b]))
//!     .expect("not infeasible at the root");
//! ```
//!
//! [`Solver::add_constraint`]: crate::Solver::add_constraint

mod arithmetic;
mod boolean;
mod scheduling;

pub use arithmetic::*;
pub use boolean::*;
pub use scheduling::*;

pub use crate::propagators::CumulativeTask;
pub use crate::propagators::DisjunctiveTask;
pub use crate::propagators::Literal;

use crate::basic_types::ConstraintOperationError;
use crate::engine::propagation::Propagator;
use crate::Solver;

/// A [`Constraint`] is a relation over variables. It disqualifies certain partial assignments
/// from making it into a solution of the problem.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`Solver`].
    ///
    /// Returns a [`ConstraintOperationError`] if the addition of the constraint causes a
    /// root-level conflict.
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError>;
}

impl<ConcretePropagator> Constraint for ConcretePropagator
where
    ConcretePropagator: Propagator + 'static,
{
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(self)
    }
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|constraint| constraint.post(solver))
    }
}
