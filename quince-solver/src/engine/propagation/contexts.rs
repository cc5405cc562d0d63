use super::PropagatorId;
use super::WatchList;
use crate::basic_types::PropagationStatus;
use crate::engine::domain_events::DomainEvents;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;

/// Types which hold a domain store and expose the shared read operations of [`ReadDomains`].
pub(crate) trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

/// Read access to the current domains, shared by all propagation contexts.
pub(crate) trait ReadDomains: HasAssignments {
    fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments().lower_bound(domain_id)
    }

    fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments().upper_bound(domain_id)
    }

    fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.assignments().is_fixed(domain_id)
    }

    fn assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.assignments().assigned_value(domain_id)
    }

    fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.assignments().contains(domain_id, value)
    }
}

impl<T: HasAssignments> ReadDomains for T {}

/// Read-only view of the domain store handed to [`Propagator::is_satisfied`].
///
/// [`Propagator::is_satisfied`]: super::Propagator::is_satisfied
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

impl HasAssignments for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// Mutable view of the domain store handed to [`Propagator::propagate`]. All narrowing performed
/// through this context is recorded on the trail of the underlying store.
///
/// [`Propagator::propagate`]: super::Propagator::propagate
#[derive(Debug)]
pub(crate) struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments) -> Self {
        PropagationContextMut { assignments }
    }

    pub(crate) fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }

    pub(crate) fn set_lower_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> PropagationStatus {
        self.assignments.tighten_lower_bound(domain_id, bound)
    }

    pub(crate) fn set_upper_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> PropagationStatus {
        self.assignments.tighten_upper_bound(domain_id, bound)
    }

    pub(crate) fn remove_value(&mut self, domain_id: DomainId, value: i32) -> PropagationStatus {
        self.assignments.remove_value(domain_id, value)
    }

    pub(crate) fn fix(&mut self, domain_id: DomainId, value: i32) -> PropagationStatus {
        self.assignments.make_assignment(domain_id, value)
    }
}

impl HasAssignments for PropagationContextMut<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// Context handed to [`Propagator::initialise`] through which the propagator registers the
/// variables it watches.
///
/// [`Propagator::initialise`]: super::Propagator::initialise
#[derive(Debug)]
pub(crate) struct InitialisationContext<'a> {
    assignments: &'a Assignments,
    watch_list: &'a mut WatchList,
    propagator_id: PropagatorId,
}

impl<'a> InitialisationContext<'a> {
    pub(crate) fn new(
        assignments: &'a Assignments,
        watch_list: &'a mut WatchList,
        propagator_id: PropagatorId,
    ) -> Self {
        InitialisationContext {
            assignments,
            watch_list,
            propagator_id,
        }
    }

    /// Subscribe the propagator to the given events on `domain_id`.
    pub(crate) fn register(&mut self, domain_id: DomainId, events: DomainEvents) {
        self.watch_list.watch(domain_id, self.propagator_id, events);
    }
}

impl HasAssignments for InitialisationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
