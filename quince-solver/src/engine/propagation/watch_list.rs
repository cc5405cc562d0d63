use super::PropagatorId;
use crate::containers::KeyedVec;
use crate::engine::domain_events::DomainEvent;
use crate::engine::domain_events::DomainEvents;
use crate::engine::variables::DomainId;

/// For every domain, the propagators to wake up when the domain changes, together with the
/// events each of them subscribed to. Registration order is preserved.
#[derive(Debug, Default)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, Vec<(PropagatorId, DomainEvents)>>,
}

impl WatchList {
    /// Called whenever a domain is created so the watch list covers it.
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Vec::new());
    }

    pub(crate) fn watch(
        &mut self,
        domain_id: DomainId,
        propagator_id: PropagatorId,
        events: DomainEvents,
    ) {
        self.watchers[domain_id].push((propagator_id, events));
    }

    /// The propagators subscribed to `event` on `domain_id`, in registration order.
    pub(crate) fn watchers_for(
        &self,
        domain_id: DomainId,
        event: DomainEvent,
    ) -> impl Iterator<Item = PropagatorId> + '_ {
        self.watchers[domain_id]
            .iter()
            .filter(move |(_, events)| events.contains(event))
            .map(|&(propagator_id, _)| propagator_id)
    }
}
