use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::engine::domain_events::DomainEvents;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;

/// A task on a cumulative resource: a start-time variable, a fixed processing time, and the
/// amount of the resource the task occupies while it runs.
#[derive(Clone, Copy, Debug)]
pub struct CumulativeTask {
    pub start_variable: DomainId,
    pub processing_time: i32,
    pub resource_usage: i32,
}

/// A maximal interval `[start, end)` of constant mandatory resource usage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ProfileSegment {
    start: i32,
    end: i32,
    height: i32,
}

/// Propagator for the cumulative constraint: at no point in time may the summed resource usage
/// of the running tasks exceed the capacity.
///
/// Time-table reasoning: the profile of *mandatory* usage (the interval `[latest start,
/// earliest completion)` each task certainly occupies) is rebuilt from the current bounds by a
/// sweep over the task release/completion points. A profile overload is a conflict, and start
/// times which would push some profile segment over capacity are pruned at the bounds.
#[derive(Clone, Debug)]
pub(crate) struct CumulativePropagator {
    tasks: Box<[CumulativeTask]>,
    capacity: i32,
}

impl CumulativePropagator {
    pub(crate) fn new(tasks: Box<[CumulativeTask]>, capacity: i32) -> Self {
        CumulativePropagator { tasks, capacity }
    }

    /// The mandatory part `[latest start, earliest completion)` of a task, if it has one.
    fn mandatory_part(
        context: &impl ReadDomains,
        task: &CumulativeTask,
    ) -> Option<(i32, i32)> {
        let latest_start = context.upper_bound(task.start_variable);
        let earliest_completion = context.lower_bound(task.start_variable) + task.processing_time;
        (latest_start < earliest_completion).then_some((latest_start, earliest_completion))
    }

    /// Sweep the mandatory parts into a profile of constant-height segments.
    fn build_profile(&self, context: &impl ReadDomains) -> Vec<ProfileSegment> {
        let mut events: Vec<(i32, i32)> = Vec::new();
        for task in self.tasks.iter() {
            if let Some((start, end)) = Self::mandatory_part(context, task) {
                events.push((start, task.resource_usage));
                events.push((end, -task.resource_usage));
            }
        }
        events.sort_unstable();

        let mut profile = Vec::new();
        let mut height = 0;
        let mut previous_time = None;
        for (time, delta) in events {
            if let Some(previous) = previous_time {
                if previous < time && height > 0 {
                    profile.push(ProfileSegment {
                        start: previous,
                        end: time,
                        height,
                    });
                }
            }
            height += delta;
            previous_time = Some(time);
        }

        profile
    }
}

impl Propagator for CumulativePropagator {
    fn name(&self) -> &str {
        "Cumulative"
    }

    fn initialise(&mut self, context: &mut InitialisationContext) {
        for task in self.tasks.iter() {
            context.register(task.start_variable, DomainEvents::BOUNDS);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let profile = self.build_profile(&context.as_readonly());

        if profile.iter().any(|segment| segment.height > self.capacity) {
            return Err(EmptyDomain);
        }

        for task in self.tasks.iter() {
            if task.processing_time == 0 || task.resource_usage == 0 {
                continue;
            }

            let mandatory = Self::mandatory_part(&context.as_readonly(), task);

            for segment in profile.iter() {
                // The task's own mandatory usage is part of the profile; a segment it already
                // fully occupies cannot forbid it.
                let own_usage = match mandatory {
                    Some((start, end)) if start <= segment.start && segment.end <= end => {
                        task.resource_usage
                    }
                    _ => 0,
                };

                if segment.height - own_usage + task.resource_usage <= self.capacity {
                    continue;
                }

                // Running through `[segment.start, segment.end)` would overload the resource,
                // so the task cannot start in `(segment.start - processing_time, segment.end)`.
                let window_low = segment.start - task.processing_time;

                let lower_bound = context.lower_bound(task.start_variable);
                if lower_bound > window_low && lower_bound < segment.end {
                    context.set_lower_bound(task.start_variable, segment.end)?;
                }

                let upper_bound = context.upper_bound(task.start_variable);
                if upper_bound > window_low && upper_bound < segment.end {
                    context.set_upper_bound(task.start_variable, window_low)?;
                }
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        let mut events: Vec<(i32, i32)> = Vec::new();
        for task in self.tasks.iter() {
            let start = context.assigned_value(task.start_variable).unwrap_or_default();
            if task.processing_time > 0 {
                events.push((start, task.resource_usage));
                events.push((start + task.processing_time, -task.resource_usage));
            }
        }
        events.sort_unstable();

        let mut height = 0;
        for (_, delta) in events {
            height += delta;
            if height > self.capacity {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    fn task(start_variable: DomainId, processing_time: i32, resource_usage: i32) -> CumulativeTask {
        CumulativeTask {
            start_variable,
            processing_time,
            resource_usage,
        }
    }

    #[test]
    fn an_overloaded_profile_is_a_conflict() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(0, 0);

        let result = solver.new_propagator(CumulativePropagator::new(
            [task(a, 3, 2), task(b, 2, 2)].into(),
            3,
        ));

        assert!(result.is_err());
    }

    #[test]
    fn start_times_are_pushed_past_a_full_segment() {
        let mut solver = TestSolver::default();
        // A fixed task occupies the full capacity over [0, 4).
        let fixed = solver.new_variable(0, 0);
        let movable = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(CumulativePropagator::new(
                [task(fixed, 4, 2), task(movable, 3, 1)].into(),
                2,
            ))
            .expect("no empty domains");

        solver.assert_bounds(movable, 4, 10);
    }

    #[test]
    fn tasks_fitting_under_capacity_are_left_alone() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 5);
        let b = solver.new_variable(0, 5);

        let _ = solver
            .new_propagator(CumulativePropagator::new(
                [task(a, 3, 1), task(b, 3, 1)].into(),
                2,
            ))
            .expect("no empty domains");

        solver.assert_bounds(a, 0, 5);
        solver.assert_bounds(b, 0, 5);
    }

    #[test]
    fn latest_starts_are_pulled_before_a_full_segment() {
        let mut solver = TestSolver::default();
        // A fixed task occupies the full capacity over [6, 10).
        let fixed = solver.new_variable(6, 6);
        let movable = solver.new_variable(0, 8);

        let _ = solver
            .new_propagator(CumulativePropagator::new(
                [task(fixed, 4, 1), task(movable, 3, 1)].into(),
                1,
            ))
            .expect("no empty domains");

        // Starting later than 3 would overlap [6, 10).
        solver.assert_bounds(movable, 0, 3);
    }

    #[test]
    fn a_capacity_respecting_schedule_is_accepted() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 0);
        let b = solver.new_variable(1, 1);

        let propagator = solver
            .new_propagator(CumulativePropagator::new(
                [task(a, 2, 1), task(b, 2, 1)].into(),
                2,
            ))
            .expect("no empty domains");

        assert!(solver.is_satisfied(propagator));
    }
}
