use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::PropagationContextMut;
use super::PropagatorId;
use super::PropagatorStore;
use super::WatchList;
use crate::basic_types::PropagationStatus;
use crate::engine::Assignments;
use crate::statistics::SolverStatistics;

/// The worklist driving propagation to a fixpoint.
///
/// Propagators are popped ordered by (priority, registration index), which makes every pass
/// deterministic for identical inputs. When a propagator narrows a domain, every watcher of that
/// domain is re-enqueued, including the propagator itself, since most of the global constraints
/// here can trigger further narrowing of their own variables.
#[derive(Debug, Default)]
pub(crate) struct PropagationEngine {
    queue: BinaryHeap<Reverse<(u32, PropagatorId)>>,
    enqueued: Vec<bool>,
}

impl PropagationEngine {
    /// Called whenever a propagator is added so the enqueued flags cover it.
    pub(crate) fn grow(&mut self) {
        self.enqueued.push(false);
    }

    pub(crate) fn enqueue(&mut self, propagator_id: PropagatorId, priority: u32) {
        if !self.enqueued[propagator_id.0 as usize] {
            self.enqueued[propagator_id.0 as usize] = true;
            self.queue.push(Reverse((priority, propagator_id)));
        }
    }

    pub(crate) fn enqueue_all(&mut self, store: &PropagatorStore) {
        for propagator_id in store.keys() {
            self.enqueue(propagator_id, store[propagator_id].priority());
        }
    }

    /// Repeatedly pop and run propagators until no domain shrinks further, or until a domain
    /// empties, in which case the worklist is cleared and the caller is expected to restore a
    /// checkpoint.
    pub(crate) fn propagate_to_fixpoint(
        &mut self,
        assignments: &mut Assignments,
        store: &mut PropagatorStore,
        watch_list: &WatchList,
        statistics: &mut SolverStatistics,
    ) -> PropagationStatus {
        self.enqueue_watchers(assignments, store, watch_list);

        while let Some(Reverse((_, propagator_id))) = self.queue.pop() {
            self.enqueued[propagator_id.0 as usize] = false;
            statistics.num_propagations += 1;

            let status = store[propagator_id].propagate(PropagationContextMut::new(assignments));
            if status.is_err() {
                self.clear(assignments);
                return status;
            }

            self.enqueue_watchers(assignments, store, watch_list);
        }

        Ok(())
    }

    fn enqueue_watchers(
        &mut self,
        assignments: &mut Assignments,
        store: &PropagatorStore,
        watch_list: &WatchList,
    ) {
        for (domain_id, event) in assignments.drain_events() {
            for watcher in watch_list.watchers_for(domain_id, event) {
                self.enqueue(watcher, store[watcher].priority());
            }
        }
    }

    fn clear(&mut self, assignments: &mut Assignments) {
        self.queue.clear();
        self.enqueued.fill(false);
        assignments.clear_events();
    }
}
