//! Conversions between the declarative [`Model`] and the QMX wire messages, plus the
//! message-level solve entry point.

use std::time::Duration;

use fnv::FnvHashMap;
use qmx_format as qmx;

use super::ConstraintSpec;
use super::DomainSpec;
use super::LinearRelation;
use super::Model;
use super::ModelError;
use super::TaskSpec;
use super::VariableSpec;
use crate::optimisation::OptimisationDirection;
use crate::parallel;
use crate::results::SolveOutcome;
use crate::results::SolveStatus;
use crate::SolveOptions;

impl Model {
    /// Decode a model message. Variable ids in the message may be arbitrary; they are mapped to
    /// dense model indices in message order.
    pub fn from_message(message: &qmx::Model) -> Result<Model, ModelError> {
        let (model, _) = Model::from_message_with_ids(message)?;
        Ok(model)
    }

    fn from_message_with_ids(
        message: &qmx::Model,
    ) -> Result<(Model, FnvHashMap<u32, u32>), ModelError> {
        let mut model = Model::default();
        let mut id_map: FnvHashMap<u32, u32> = FnvHashMap::default();

        for (index, variable) in message.variables.iter().enumerate() {
            let domain = match &variable.domain {
                Some(qmx::VariableDomain::Interval(interval)) => DomainSpec::Interval {
                    lower_bound: interval.lower_bound,
                    upper_bound: interval.upper_bound,
                },
                Some(qmx::VariableDomain::Sparse(values)) => {
                    DomainSpec::Sparse(values.values.clone())
                }
                Some(qmx::VariableDomain::Boolean(_)) => DomainSpec::Boolean,
                None => return Err(ModelError::MissingDomain { index }),
            };

            let dense_index = model.push_variable(VariableSpec {
                name: variable.name.clone(),
                domain,
            });
            if id_map.insert(variable.id, dense_index).is_some() {
                return Err(ModelError::DuplicateVariableId { id: variable.id });
            }
        }

        let resolve = |constraint_index: usize,
                       variable: u32,
                       id_map: &FnvHashMap<u32, u32>|
         -> Result<u32, ModelError> {
            id_map
                .get(&variable)
                .copied()
                .ok_or(ModelError::DanglingVariable {
                    constraint_index,
                    variable,
                })
        };

        for (constraint_index, constraint) in message.constraints.iter().enumerate() {
            let kind = constraint
                .kind
                .as_ref()
                .ok_or(ModelError::MissingConstraintKind {
                    index: constraint_index,
                })?;

            let spec = match kind {
                qmx::ConstraintKind::Linear(linear) => {
                    let mut terms = Vec::with_capacity(linear.terms.len());
                    for term in &linear.terms {
                        terms.push((
                            term.coefficient,
                            resolve(constraint_index, term.variable, &id_map)?,
                        ));
                    }
                    ConstraintSpec::Linear {
                        terms,
                        relation: match linear.relation() {
                            qmx::LinearRelation::LessOrEqual => LinearRelation::LessOrEqual,
                            qmx::LinearRelation::Equal => LinearRelation::Equal,
                        },
                        rhs: linear.rhs,
                    }
                }
                qmx::ConstraintKind::AllDifferent(all_different) => {
                    let mut variables = Vec::with_capacity(all_different.variables.len());
                    for &variable in &all_different.variables {
                        variables.push(resolve(constraint_index, variable, &id_map)?);
                    }
                    ConstraintSpec::AllDifferent(variables)
                }
                qmx::ConstraintKind::Precedence(precedence) => ConstraintSpec::Precedence {
                    before: resolve(constraint_index, precedence.before, &id_map)?,
                    after: resolve(constraint_index, precedence.after, &id_map)?,
                    gap: precedence.gap,
                },
                qmx::ConstraintKind::Cumulative(cumulative) => {
                    let mut tasks = Vec::with_capacity(cumulative.tasks.len());
                    for task in &cumulative.tasks {
                        tasks.push(TaskSpec {
                            start: resolve(constraint_index, task.start, &id_map)?,
                            duration: task.duration,
                            demand: task.demand,
                        });
                    }
                    ConstraintSpec::Cumulative {
                        tasks,
                        capacity: cumulative.capacity,
                    }
                }
                qmx::ConstraintKind::Disjunctive(disjunctive) => {
                    let mut tasks = Vec::with_capacity(disjunctive.tasks.len());
                    for task in &disjunctive.tasks {
                        tasks.push(TaskSpec {
                            start: resolve(constraint_index, task.start, &id_map)?,
                            duration: task.duration,
                            demand: task.demand,
                        });
                    }
                    ConstraintSpec::Disjunctive(tasks)
                }
                qmx::ConstraintKind::Clause(clause) => {
                    let mut literals = Vec::with_capacity(clause.literals.len());
                    for literal in &clause.literals {
                        literals.push((
                            resolve(constraint_index, literal.variable, &id_map)?,
                            literal.negated,
                        ));
                    }
                    ConstraintSpec::Clause(literals)
                }
            };
            model.add_constraint(spec);
        }

        if let Some(objective) = &message.objective {
            let direction = match objective.direction() {
                qmx::OptimisationDirection::Minimise => OptimisationDirection::Minimise,
                qmx::OptimisationDirection::Maximise => OptimisationDirection::Maximise,
            };
            let mut terms = Vec::with_capacity(objective.terms.len());
            for term in &objective.terms {
                let variable = id_map.get(&term.variable).copied().ok_or(
                    ModelError::DanglingObjectiveVariable {
                        variable: term.variable,
                    },
                )?;
                terms.push((term.coefficient, variable));
            }
            model.set_objective(direction, terms);
        }

        Ok((model, id_map))
    }

    /// Encode the model as a message; variables are identified by their dense model index.
    pub fn to_message(&self) -> qmx::Model {
        let variables = self
            .variables
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let mut variable = match &spec.domain {
                    DomainSpec::Interval {
                        lower_bound,
                        upper_bound,
                    } => qmx::Variable::bounded(index as u32, *lower_bound, *upper_bound),
                    DomainSpec::Sparse(values) => {
                        qmx::Variable::sparse(index as u32, values.clone())
                    }
                    DomainSpec::Boolean => qmx::Variable::boolean(index as u32),
                };
                variable.name = spec.name.clone();
                variable
            })
            .collect();

        let constraints = self
            .constraints
            .iter()
            .map(|constraint| qmx::Constraint {
                kind: Some(constraint_kind_to_message(constraint)),
            })
            .collect();

        let objective = self.objective.as_ref().map(|(direction, terms)| {
            let direction = match direction {
                OptimisationDirection::Minimise => qmx::OptimisationDirection::Minimise,
                OptimisationDirection::Maximise => qmx::OptimisationDirection::Maximise,
            };
            qmx::Objective {
                direction: direction as i32,
                terms: terms
                    .iter()
                    .map(|&(coefficient, variable)| qmx::LinearTerm {
                        variable,
                        coefficient,
                    })
                    .collect(),
            }
        });

        qmx::Model {
            variables,
            constraints,
            objective,
        }
    }
}

fn constraint_kind_to_message(constraint: &ConstraintSpec) -> qmx::ConstraintKind {
    match constraint {
        ConstraintSpec::Linear {
            terms,
            relation,
            rhs,
        } => {
            let relation = match relation {
                LinearRelation::LessOrEqual => qmx::LinearRelation::LessOrEqual,
                LinearRelation::Equal => qmx::LinearRelation::Equal,
            };
            qmx::ConstraintKind::Linear(qmx::LinearConstraint {
                terms: terms
                    .iter()
                    .map(|&(coefficient, variable)| qmx::LinearTerm {
                        variable,
                        coefficient,
                    })
                    .collect(),
                relation: relation as i32,
                rhs: *rhs,
            })
        }
        ConstraintSpec::AllDifferent(variables) => {
            qmx::ConstraintKind::AllDifferent(qmx::AllDifferent {
                variables: variables.clone(),
            })
        }
        ConstraintSpec::Precedence { before, after, gap } => {
            qmx::ConstraintKind::Precedence(qmx::Precedence {
                before: *before,
                after: *after,
                gap: *gap,
            })
        }
        ConstraintSpec::Cumulative { tasks, capacity } => {
            qmx::ConstraintKind::Cumulative(qmx::Cumulative {
                tasks: tasks.iter().map(task_to_message).collect(),
                capacity: *capacity,
            })
        }
        ConstraintSpec::Disjunctive(tasks) => {
            qmx::ConstraintKind::Disjunctive(qmx::Disjunctive {
                tasks: tasks.iter().map(task_to_message).collect(),
            })
        }
        ConstraintSpec::Clause(literals) => qmx::ConstraintKind::Clause(qmx::Clause {
            literals: literals
                .iter()
                .map(|&(variable, negated)| qmx::BoolLiteral { variable, negated })
                .collect(),
        }),
    }
}

fn task_to_message(task: &TaskSpec) -> qmx::ScheduledTask {
    qmx::ScheduledTask {
        start: task.start,
        duration: task.duration,
        demand: task.demand,
    }
}

/// Solve a [`qmx_format::SolveRequest`] end to end: decode and validate the model, run the
/// (possibly partitioned) search under the requested budget, and encode the answer.
///
/// Infeasibility and budget exhaustion are status values on the returned message; only a
/// malformed request is an error.
pub fn solve_request(request: &qmx::SolveRequest) -> Result<qmx::Solution, ModelError> {
    let message = request.model.as_ref().ok_or(ModelError::MissingModel)?;
    let (model, id_map) = Model::from_message_with_ids(message)?;

    let mut warm_start = Vec::with_capacity(request.warm_start.len());
    for assignment in &request.warm_start {
        let variable = id_map.get(&assignment.variable).copied().ok_or(
            ModelError::UnknownWarmStartVariable {
                variable: assignment.variable,
            },
        )?;
        warm_start.push((variable, assignment.value));
    }

    let options = SolveOptions {
        deadline: request.deadline_ms.map(Duration::from_millis),
        decision_budget: request.decision_budget,
        target_gap: request.target_gap,
        warm_start,
        workers: request.workers.unwrap_or(1),
    };

    let outcome = parallel::solve(&model, &options)?;

    // Wire ids of the original message, indexed by dense model index.
    let mut wire_ids = vec![0_u32; model.num_variables()];
    for (&wire_id, &dense_index) in &id_map {
        wire_ids[dense_index as usize] = wire_id;
    }

    Ok(outcome_to_message(&outcome, &wire_ids))
}

fn outcome_to_message(outcome: &SolveOutcome, wire_ids: &[u32]) -> qmx::Solution {
    let status = match outcome.status {
        SolveStatus::Optimal => qmx::SolutionStatus::Optimal,
        SolveStatus::Feasible => qmx::SolutionStatus::Feasible,
        SolveStatus::Infeasible => qmx::SolutionStatus::Infeasible,
        SolveStatus::Unknown => qmx::SolutionStatus::Unknown,
    };

    let assignments = outcome
        .solution
        .as_ref()
        .map(|solution| {
            solution
                .iter()
                .map(|(domain_id, value)| qmx::Assignment {
                    variable: wire_ids[domain_id.id as usize],
                    value,
                })
                .collect()
        })
        .unwrap_or_default();

    qmx::Solution {
        status: status as i32,
        objective_value: outcome
            .solution
            .as_ref()
            .and_then(|solution| solution.objective_value()),
        bound: outcome.bound,
        assignments,
    }
}
