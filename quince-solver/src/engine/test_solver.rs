//! A harness for unit-testing propagators in isolation: variables and propagators are added
//! directly, domains are narrowed by hand, and the propagation behaviour is observed without a
//! search being involved.

use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::PropagationEngine;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorStore;
use crate::engine::propagation::WatchList;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;
use crate::statistics::SolverStatistics;

#[derive(Default)]
pub(crate) struct TestSolver {
    pub(crate) assignments: Assignments,
    propagators: PropagatorStore,
    watch_list: WatchList,
    engine: PropagationEngine,
    statistics: SolverStatistics,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        self.watch_list.grow();
        domain_id
    }

    /// Add a propagator and propagate it (together with any already present) to a fixpoint.
    pub(crate) fn new_propagator(
        &mut self,
        propagator: impl Propagator + 'static,
    ) -> Result<PropagatorId, EmptyDomain> {
        let propagator_id = self.propagators.alloc(Box::new(propagator));
        self.engine.grow();

        {
            let mut context = InitialisationContext::new(
                &self.assignments,
                &mut self.watch_list,
                propagator_id,
            );
            self.propagators[propagator_id].initialise(&mut context);
        }

        self.engine
            .enqueue(propagator_id, self.propagators[propagator_id].priority());
        self.propagate_until_fixpoint().map(|_| propagator_id)
    }

    /// Invoke a single propagator once, without running the worklist.
    pub(crate) fn propagate(&mut self, propagator_id: PropagatorId) -> PropagationStatus {
        self.propagators[propagator_id]
            .propagate(PropagationContextMut::new(&mut self.assignments))
    }

    pub(crate) fn propagate_until_fixpoint(&mut self) -> PropagationStatus {
        self.engine.enqueue_all(&self.propagators);
        self.engine.propagate_to_fixpoint(
            &mut self.assignments,
            &mut self.propagators,
            &self.watch_list,
            &mut self.statistics,
        )
    }

    pub(crate) fn is_satisfied(&self, propagator_id: PropagatorId) -> bool {
        self.propagators[propagator_id].is_satisfied(PropagationContext::new(&self.assignments))
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

    pub(crate) fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.lower_bound(domain_id)
    }

    pub(crate) fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.upper_bound(domain_id)
    }

    pub(crate) fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.assignments.contains(domain_id, value)
    }

    pub(crate) fn assert_bounds(&self, domain_id: DomainId, lower_bound: i32, upper_bound: i32) {
        assert_eq!(
            lower_bound,
            self.lower_bound(domain_id),
            "lower bound of {domain_id}"
        );
        assert_eq!(
            upper_bound,
            self.upper_bound(domain_id),
            "upper bound of {domain_id}"
        );
    }
}
