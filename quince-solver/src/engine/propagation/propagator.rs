use super::InitialisationContext;
use super::PropagationContext;
use super::PropagationContextMut;
use crate::basic_types::PropagationStatus;

/// The interface every constraint implements.
///
/// A propagator narrows the domains of its variables to values that can still participate in a
/// solution of the constraint. Narrowing has to be *sound* (never discard a value that appears
/// in some solution of the constraint) and *idempotent*: calling [`Propagator::propagate`] again
/// without any intervening domain change must not narrow further. Beyond that, how much a
/// propagator prunes is a quality/performance trade-off, not a correctness requirement; the
/// engine re-invokes propagators until a fixpoint regardless.
pub(crate) trait Propagator {
    /// The name of the propagator; used in logs.
    fn name(&self) -> &str;

    /// The scheduling priority: lower values are popped from the propagation worklist first.
    /// Cheap propagators should return small values so they run before expensive ones.
    fn priority(&self) -> u32 {
        3
    }

    /// Called once when the propagator is added to the solver. The implementation registers the
    /// variables (and the domain events) it wants to be woken up for.
    fn initialise(&mut self, context: &mut InitialisationContext);

    /// Narrow the domains of the watched variables based on their current domains. Returns
    /// `Err(EmptyDomain)` when the constraint is in contradiction with the current domains,
    /// directly or because a narrowing emptied a domain.
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatus;

    /// Whether the constraint holds under the current (fully assigned) domains.
    fn is_satisfied(&self, context: PropagationContext) -> bool;
}
