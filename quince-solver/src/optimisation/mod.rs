//! Structures related to optimisation: the linear [`Objective`], the [`BranchAndBound`]
//! procedure handed to [`Solver::optimise`], and the tracker which maintains the incumbent and
//! the proven bound during search.
//!
//! [`Solver::optimise`]: crate::Solver::optimise

mod branch_and_bound;
mod objective_tracker;

use std::fmt;

pub use branch_and_bound::BranchAndBound;
pub(crate) use objective_tracker::ObjectiveTracker;

use crate::engine::variables::DomainId;
use crate::engine::Assignments;

/// The direction of the optimisation, either maximising or minimising the objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimisationDirection {
    Minimise,
    Maximise,
}

impl fmt::Display for OptimisationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimisationDirection::Minimise => write!(f, "minimise"),
            OptimisationDirection::Maximise => write!(f, "maximise"),
        }
    }
}

/// A linear objective: a weighted sum of variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Objective {
    terms: Vec<(i64, DomainId)>,
}

impl Objective {
    pub fn new(terms: impl Into<Vec<(i64, DomainId)>>) -> Objective {
        Objective {
            terms: terms.into(),
        }
    }

    /// An objective consisting of a single variable with unit weight.
    pub fn single(domain_id: DomainId) -> Objective {
        Objective {
            terms: vec![(1, domain_id)],
        }
    }

    pub fn terms(&self) -> &[(i64, DomainId)] {
        &self.terms
    }

    pub(crate) fn negated(&self) -> Objective {
        Objective {
            terms: self
                .terms
                .iter()
                .map(|&(weight, domain_id)| (-weight, domain_id))
                .collect(),
        }
    }

    /// The objective value under the current (fully assigned) domains.
    pub(crate) fn evaluate(&self, assignments: &Assignments) -> i64 {
        self.terms
            .iter()
            .map(|&(weight, domain_id)| {
                weight * assignments.assigned_value(domain_id).unwrap_or_default() as i64
            })
            .sum()
    }

    /// The smallest value the objective can still take given the current bounds: positive terms
    /// contribute their lower bound, negative terms their upper bound.
    pub(crate) fn lower_potential(&self, assignments: &Assignments) -> i64 {
        self.terms
            .iter()
            .map(|&(weight, domain_id)| {
                if weight >= 0 {
                    weight * assignments.lower_bound(domain_id) as i64
                } else {
                    weight * assignments.upper_bound(domain_id) as i64
                }
            })
            .sum()
    }
}
