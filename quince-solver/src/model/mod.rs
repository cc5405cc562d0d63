//! The declarative model handed to the engine by external collaborators: variables, constraints
//! and an optional objective, validated up front and instantiated into a [`Solver`].
//!
//! A [`Model`] is the unit that crosses boundaries: it can be built programmatically, received
//! as a [`qmx_format::Model`] message, and cloned into several solvers for partitioned solving.
//! Validation happens before any search starts: a malformed model is rejected with a
//! [`ModelError`] and is never partially processed.

mod message;

pub use message::solve_request;

use thiserror::Error;

use crate::constraints;
use crate::engine::variables::DomainId;
use crate::optimisation::Objective;
use crate::optimisation::OptimisationDirection;
use crate::propagators::CumulativeTask;
use crate::propagators::DisjunctiveTask;
use crate::propagators::Literal;
use crate::Solver;

/// Errors raised while validating or decoding a [`Model`]. These surface to the caller before
/// any search starts; they indicate a problem with the model data, never with the engine.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("variable {variable} has an empty domain at build time")]
    EmptyDomain { variable: u32 },
    #[error("constraint {constraint_index} references unknown variable {variable}")]
    DanglingVariable {
        constraint_index: usize,
        variable: u32,
    },
    #[error("the objective references unknown variable {variable}")]
    DanglingObjectiveVariable { variable: u32 },
    #[error("constraint {constraint_index} is malformed: {reason}")]
    MalformedConstraint {
        constraint_index: usize,
        reason: String,
    },
    #[error("the precedence constraints form a cycle with no slack through variable {variable}")]
    CyclicPrecedence { variable: u32 },
    #[error("the model message contains duplicate variable id {id}")]
    DuplicateVariableId { id: u32 },
    #[error("variable message {index} carries no domain")]
    MissingDomain { index: usize },
    #[error("constraint message {index} carries no kind")]
    MissingConstraintKind { index: usize },
    #[error("the solve request carries no model")]
    MissingModel,
    #[error("the warm start references unknown variable {variable}")]
    UnknownWarmStartVariable { variable: u32 },
}

/// The initial domain of a model variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainSpec {
    Interval { lower_bound: i32, upper_bound: i32 },
    Sparse(Vec<i32>),
    Boolean,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: Option<String>,
    pub domain: DomainSpec,
}

/// A task in a scheduling constraint: a start variable (by model index), a processing time and a
/// resource demand. Disjunctive constraints ignore the demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskSpec {
    pub start: u32,
    pub duration: i32,
    pub demand: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinearRelation {
    LessOrEqual,
    Equal,
}

/// A constraint over model variables, identified by their creation index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstraintSpec {
    Linear {
        terms: Vec<(i64, u32)>,
        relation: LinearRelation,
        rhs: i64,
    },
    AllDifferent(Vec<u32>),
    Precedence {
        before: u32,
        after: u32,
        gap: i32,
    },
    Cumulative {
        tasks: Vec<TaskSpec>,
        capacity: i32,
    },
    Disjunctive(Vec<TaskSpec>),
    /// A disjunction of `(variable, negated)` literals over 0/1 variables.
    Clause(Vec<(u32, bool)>),
}

/// A validated, instantiated model: the solver holding the posted constraints, the variables by
/// model index, and the objective translated to solver variables.
#[derive(Debug)]
pub struct ModelInstance {
    pub solver: Solver,
    pub variables: Vec<DomainId>,
    pub objective: Option<(OptimisationDirection, Objective)>,
}

/// A complete problem description: variables, constraints, and an optional linear objective.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    variables: Vec<VariableSpec>,
    constraints: Vec<ConstraintSpec>,
    objective: Option<(OptimisationDirection, Vec<(i64, u32)>)>,
}

impl Model {
    /// Add a variable with an interval domain; returns its model index.
    pub fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> u32 {
        self.push_variable(VariableSpec {
            name: None,
            domain: DomainSpec::Interval {
                lower_bound,
                upper_bound,
            },
        })
    }

    pub fn new_named_variable(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> u32 {
        self.push_variable(VariableSpec {
            name: Some(name.into()),
            domain: DomainSpec::Interval {
                lower_bound,
                upper_bound,
            },
        })
    }

    /// Add a variable with an explicit value-set domain; returns its model index.
    pub fn new_sparse_variable(&mut self, values: impl Into<Vec<i32>>) -> u32 {
        self.push_variable(VariableSpec {
            name: None,
            domain: DomainSpec::Sparse(values.into()),
        })
    }

    /// Add a 0/1 variable; returns its model index.
    pub fn new_boolean_variable(&mut self) -> u32 {
        self.push_variable(VariableSpec {
            name: None,
            domain: DomainSpec::Boolean,
        })
    }

    fn push_variable(&mut self, spec: VariableSpec) -> u32 {
        self.variables.push(spec);
        (self.variables.len() - 1) as u32
    }

    pub fn add_constraint(&mut self, constraint: ConstraintSpec) {
        self.constraints.push(constraint);
    }

    /// Set the linear objective as `(weight, variable index)` terms.
    pub fn set_objective(
        &mut self,
        direction: OptimisationDirection,
        terms: impl Into<Vec<(i64, u32)>>,
    ) {
        self.objective = Some((direction, terms.into()));
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[VariableSpec] {
        &self.variables
    }

    pub fn constraints(&self) -> &[ConstraintSpec] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<(OptimisationDirection, &[(i64, u32)])> {
        self.objective
            .as_ref()
            .map(|(direction, terms)| (*direction, terms.as_slice()))
    }

    pub fn has_objective(&self) -> bool {
        self.objective.is_some()
    }

    /// Check every build-time invariant: non-empty domains, no dangling variable references,
    /// well-formed constraint parameters, and no precedence cycle without slack.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (index, variable) in self.variables.iter().enumerate() {
            match &variable.domain {
                DomainSpec::Interval {
                    lower_bound,
                    upper_bound,
                } if lower_bound > upper_bound => {
                    return Err(ModelError::EmptyDomain {
                        variable: index as u32,
                    });
                }
                DomainSpec::Sparse(values) if values.is_empty() => {
                    return Err(ModelError::EmptyDomain {
                        variable: index as u32,
                    });
                }
                _ => {}
            }
        }

        for (constraint_index, constraint) in self.constraints.iter().enumerate() {
            self.validate_constraint(constraint_index, constraint)?;
        }

        if let Some((_, terms)) = &self.objective {
            for &(_, variable) in terms {
                if variable as usize >= self.variables.len() {
                    return Err(ModelError::DanglingObjectiveVariable { variable });
                }
            }
        }

        self.validate_precedence_cycles()
    }

    fn validate_constraint(
        &self,
        constraint_index: usize,
        constraint: &ConstraintSpec,
    ) -> Result<(), ModelError> {
        let check_variable = |variable: u32| {
            if variable as usize >= self.variables.len() {
                Err(ModelError::DanglingVariable {
                    constraint_index,
                    variable,
                })
            } else {
                Ok(())
            }
        };
        let malformed = |reason: &str| ModelError::MalformedConstraint {
            constraint_index,
            reason: reason.to_owned(),
        };

        match constraint {
            ConstraintSpec::Linear { terms, .. } => {
                terms.iter().try_for_each(|&(_, variable)| check_variable(variable))
            }
            ConstraintSpec::AllDifferent(variables) => {
                variables.iter().try_for_each(|&variable| check_variable(variable))
            }
            ConstraintSpec::Precedence { before, after, .. } => {
                check_variable(*before)?;
                check_variable(*after)
            }
            ConstraintSpec::Cumulative { tasks, capacity } => {
                if *capacity < 0 {
                    return Err(malformed("the capacity is negative"));
                }
                for task in tasks {
                    check_variable(task.start)?;
                    if task.duration < 0 {
                        return Err(malformed("a task has a negative duration"));
                    }
                    if task.demand < 0 {
                        return Err(malformed("a task has a negative demand"));
                    }
                }
                Ok(())
            }
            ConstraintSpec::Disjunctive(tasks) => {
                for task in tasks {
                    check_variable(task.start)?;
                    if task.duration < 0 {
                        return Err(malformed("a task has a negative duration"));
                    }
                }
                Ok(())
            }
            ConstraintSpec::Clause(literals) => {
                for &(variable, _) in literals {
                    check_variable(variable)?;
                    if !self.is_boolean_domain(variable) {
                        return Err(malformed("a clause literal refers to a non-boolean variable"));
                    }
                }
                Ok(())
            }
        }
    }

    fn is_boolean_domain(&self, variable: u32) -> bool {
        match &self.variables[variable as usize].domain {
            DomainSpec::Boolean => true,
            DomainSpec::Interval {
                lower_bound,
                upper_bound,
            } => *lower_bound >= 0 && *upper_bound <= 1,
            DomainSpec::Sparse(values) => values.iter().all(|&value| value == 0 || value == 1),
        }
    }

    /// Reject precedence cycles whose total gap is non-negative: those force the involved start
    /// times into a relationship with no slack (or no solution at all).
    ///
    /// Detection is longest-path relaxation with the weights scaled so that a cycle of total
    /// gap `>= 0`, and only such a cycle, keeps relaxing after `|V|` rounds.
    fn validate_precedence_cycles(&self) -> Result<(), ModelError> {
        let edges = self
            .constraints
            .iter()
            .filter_map(|constraint| match constraint {
                ConstraintSpec::Precedence { before, after, gap } => {
                    Some((*before, *after, *gap as i64))
                }
                _ => None,
            })
            .collect::<Vec<_>>();

        if edges.is_empty() {
            return Ok(());
        }

        let num_variables = self.variables.len();
        let scale = (num_variables + 1) as i64;
        let mut potential = vec![0_i64; num_variables];

        for _ in 0..num_variables {
            let mut relaxed = false;
            for &(before, after, gap) in &edges {
                let candidate = potential[before as usize].saturating_add(gap * scale + 1);
                if candidate > potential[after as usize] {
                    potential[after as usize] = candidate;
                    relaxed = true;
                }
            }
            if !relaxed {
                return Ok(());
            }
        }

        for &(before, after, gap) in &edges {
            let candidate = potential[before as usize].saturating_add(gap * scale + 1);
            if candidate > potential[after as usize] {
                return Err(ModelError::CyclicPrecedence { variable: after });
            }
        }

        Ok(())
    }

    /// Validate the model and build a [`Solver`] holding its variables and constraints.
    ///
    /// A model whose constraints conflict at the root instantiates successfully, and the
    /// solver then reports unsatisfiability; infeasibility is an answer, not an error.
    pub fn instantiate(&self) -> Result<ModelInstance, ModelError> {
        self.validate()?;

        let mut solver = Solver::default();
        let variables = self
            .variables
            .iter()
            .map(|spec| match (&spec.name, &spec.domain) {
                (
                    None,
                    DomainSpec::Interval {
                        lower_bound,
                        upper_bound,
                    },
                ) => solver.new_bounded_integer(*lower_bound, *upper_bound),
                (
                    Some(name),
                    DomainSpec::Interval {
                        lower_bound,
                        upper_bound,
                    },
                ) => solver.new_named_bounded_integer(*lower_bound, *upper_bound, name.clone()),
                (None, DomainSpec::Sparse(values)) => {
                    solver.new_sparse_integer(values.clone())
                }
                (Some(name), DomainSpec::Sparse(values)) => {
                    solver.new_named_sparse_integer(values.clone(), name.clone())
                }
                (None, DomainSpec::Boolean) => solver.new_boolean(),
                (Some(name), DomainSpec::Boolean) => {
                    solver.new_named_bounded_integer(0, 1, name.clone())
                }
            })
            .collect::<Vec<_>>();

        for constraint in &self.constraints {
            let result = match constraint {
                ConstraintSpec::Linear {
                    terms,
                    relation,
                    rhs,
                } => {
                    let terms = terms
                        .iter()
                        .map(|&(weight, variable)| (weight, variables[variable as usize]))
                        .collect::<Vec<_>>();
                    match relation {
                        LinearRelation::LessOrEqual => {
                            solver.add_constraint(constraints::less_than_or_equals(terms, *rhs))
                        }
                        LinearRelation::Equal => {
                            solver.add_constraint(constraints::equals(terms, *rhs))
                        }
                    }
                }
                ConstraintSpec::AllDifferent(members) => {
                    let members = members
                        .iter()
                        .map(|&variable| variables[variable as usize])
                        .collect::<Vec<_>>();
                    solver.add_constraint(constraints::all_different(members))
                }
                ConstraintSpec::Precedence { before, after, gap } => solver.add_constraint(
                    constraints::precedence(
                        variables[*before as usize],
                        variables[*after as usize],
                        *gap,
                    ),
                ),
                ConstraintSpec::Cumulative { tasks, capacity } => {
                    let tasks = tasks
                        .iter()
                        .map(|task| CumulativeTask {
                            start_variable: variables[task.start as usize],
                            processing_time: task.duration,
                            resource_usage: task.demand,
                        })
                        .collect::<Vec<_>>();
                    solver.add_constraint(constraints::cumulative(tasks, *capacity))
                }
                ConstraintSpec::Disjunctive(tasks) => {
                    let tasks = tasks
                        .iter()
                        .map(|task| DisjunctiveTask {
                            start_variable: variables[task.start as usize],
                            processing_time: task.duration,
                        })
                        .collect::<Vec<_>>();
                    solver.add_constraint(constraints::disjunctive(tasks))
                }
                ConstraintSpec::Clause(literals) => {
                    let literals = literals
                        .iter()
                        .map(|&(variable, negated)| Literal {
                            domain_id: variables[variable as usize],
                            negated,
                        })
                        .collect::<Vec<_>>();
                    solver.add_constraint(constraints::clause(literals))
                }
            };

            if result.is_err() {
                // Root-level conflict: the solver is flagged and reports unsatisfiability.
                break;
            }
        }

        let objective = self.objective.as_ref().map(|(direction, terms)| {
            let terms = terms
                .iter()
                .map(|&(weight, variable)| (weight, variables[variable as usize]))
                .collect::<Vec<_>>();
            (*direction, Objective::new(terms))
        });

        Ok(ModelInstance {
            solver,
            variables,
            objective,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_empty_build_time_domain_is_rejected() {
        let mut model = Model::default();
        let _ = model.new_variable(5, 2);

        assert_eq!(
            Err(ModelError::EmptyDomain { variable: 0 }),
            model.validate()
        );
    }

    #[test]
    fn a_dangling_variable_reference_is_rejected() {
        let mut model = Model::default();
        let x = model.new_variable(0, 5);
        model.add_constraint(ConstraintSpec::AllDifferent(vec![x, 17]));

        assert_eq!(
            Err(ModelError::DanglingVariable {
                constraint_index: 0,
                variable: 17
            }),
            model.validate()
        );
    }

    #[test]
    fn a_zero_slack_precedence_cycle_is_rejected() {
        let mut model = Model::default();
        let a = model.new_variable(0, 10);
        let b = model.new_variable(0, 10);
        model.add_constraint(ConstraintSpec::Precedence {
            before: a,
            after: b,
            gap: 0,
        });
        model.add_constraint(ConstraintSpec::Precedence {
            before: b,
            after: a,
            gap: 0,
        });

        assert!(matches!(
            model.validate(),
            Err(ModelError::CyclicPrecedence { .. })
        ));
    }

    #[test]
    fn a_cycle_with_slack_is_allowed() {
        let mut model = Model::default();
        let a = model.new_variable(0, 10);
        let b = model.new_variable(0, 10);
        // b starts at least 2 after a, and a no more than 5 before b: slack remains.
        model.add_constraint(ConstraintSpec::Precedence {
            before: a,
            after: b,
            gap: 2,
        });
        model.add_constraint(ConstraintSpec::Precedence {
            before: b,
            after: a,
            gap: -5,
        });

        assert_eq!(Ok(()), model.validate());
    }

    #[test]
    fn a_clause_over_integer_variables_is_rejected() {
        let mut model = Model::default();
        let x = model.new_variable(0, 9);
        model.add_constraint(ConstraintSpec::Clause(vec![(x, false)]));

        assert!(matches!(
            model.validate(),
            Err(ModelError::MalformedConstraint { .. })
        ));
    }

    #[test]
    fn instantiation_preserves_sparse_domains() {
        let mut model = Model::default();
        let x = model.new_sparse_variable(vec![1, 4, 9]);

        let instance = model.instantiate().expect("valid model");
        let domain_id = instance.variables[x as usize];

        // Bounds span the value set; the interior values are gone.
        assert_eq!(
            vec![1, 4, 9],
            (1..=9)
                .filter(|&value| instance.solver.contains_value(domain_id, value))
                .collect::<Vec<_>>()
        );
    }
}
