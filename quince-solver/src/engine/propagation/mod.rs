//! The propagation layer: the [`Propagator`] trait implemented by every constraint, the contexts
//! through which propagators read and narrow domains, and the worklist which drives propagation
//! to a fixpoint.

mod contexts;
mod propagation_engine;
mod propagator;
mod propagator_id;
mod store;
mod watch_list;

pub(crate) use contexts::InitialisationContext;
pub(crate) use contexts::PropagationContext;
pub(crate) use contexts::PropagationContextMut;
pub(crate) use contexts::ReadDomains;
pub(crate) use propagation_engine::PropagationEngine;
pub(crate) use propagator::Propagator;
pub(crate) use propagator_id::PropagatorId;
pub(crate) use store::PropagatorStore;
pub(crate) use watch_list::WatchList;
