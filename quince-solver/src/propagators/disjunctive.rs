use itertools::Itertools;

use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::engine::domain_events::DomainEvents;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;

/// A task on a disjunctive resource: a start-time variable and a fixed processing time.
#[derive(Clone, Copy, Debug)]
pub struct DisjunctiveTask {
    pub start_variable: DomainId,
    pub processing_time: i32,
}

/// Propagator for the disjunctive (no-overlap) constraint: no two tasks may run at the same
/// time on the resource.
///
/// Reasons over unordered pairs: whenever only one ordering of two tasks is still feasible,
/// that ordering is enforced on the bounds of both start times. Edge-finding over larger task
/// sets is a possible strengthening with the same contract.
#[derive(Clone, Debug)]
pub(crate) struct DisjunctivePropagator {
    tasks: Box<[DisjunctiveTask]>,
}

impl DisjunctivePropagator {
    pub(crate) fn new(tasks: Box<[DisjunctiveTask]>) -> Self {
        DisjunctivePropagator { tasks }
    }
}

impl Propagator for DisjunctivePropagator {
    fn name(&self) -> &str {
        "Disjunctive"
    }

    fn initialise(&mut self, context: &mut InitialisationContext) {
        for task in self.tasks.iter() {
            context.register(task.start_variable, DomainEvents::BOUNDS);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        for i in 0..self.tasks.len() {
            for j in i + 1..self.tasks.len() {
                let first = self.tasks[i];
                let second = self.tasks[j];

                let first_can_precede = context.lower_bound(first.start_variable)
                    + first.processing_time
                    <= context.upper_bound(second.start_variable);
                let second_can_precede = context.lower_bound(second.start_variable)
                    + second.processing_time
                    <= context.upper_bound(first.start_variable);

                match (first_can_precede, second_can_precede) {
                    (false, false) => return Err(EmptyDomain),
                    (true, false) => {
                        // `second` can no longer run before `first`, so the ordering is fixed.
                        context.set_lower_bound(
                            second.start_variable,
                            context.lower_bound(first.start_variable) + first.processing_time,
                        )?;
                        context.set_upper_bound(
                            first.start_variable,
                            context.upper_bound(second.start_variable) - first.processing_time,
                        )?;
                    }
                    (false, true) => {
                        context.set_lower_bound(
                            first.start_variable,
                            context.lower_bound(second.start_variable) + second.processing_time,
                        )?;
                        context.set_upper_bound(
                            second.start_variable,
                            context.upper_bound(first.start_variable) - second.processing_time,
                        )?;
                    }
                    (true, true) => {}
                }
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        self.tasks.iter().tuple_combinations().all(|(first, second)| {
            let first_start = context.assigned_value(first.start_variable).unwrap_or_default();
            let second_start =
                context.assigned_value(second.start_variable).unwrap_or_default();

            first_start + first.processing_time <= second_start
                || second_start + second.processing_time <= first_start
        })
    }
}
