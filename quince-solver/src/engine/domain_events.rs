use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// A change observed on a single domain. Emitted by the domain store whenever a narrowing
/// operation succeeds; consumed by the propagation engine to wake up watching propagators.
#[derive(Debug, EnumSetType)]
pub(crate) enum DomainEvent {
    /// The domain became a singleton.
    Assign,
    /// The lower bound increased.
    LowerBound,
    /// The upper bound decreased.
    UpperBound,
    /// A value strictly between the bounds was removed.
    Removal,
}

/// The set of [`DomainEvent`]s a propagator subscribes to for one of its variables.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DomainEvents(EnumSet<DomainEvent>);

impl DomainEvents {
    /// Bound changes, including assignments.
    pub(crate) const BOUNDS: DomainEvents = DomainEvents(enum_set!(
        DomainEvent::Assign | DomainEvent::LowerBound | DomainEvent::UpperBound
    ));

    /// Only assignments.
    pub(crate) const ASSIGN: DomainEvents = DomainEvents(enum_set!(DomainEvent::Assign));

    pub(crate) fn contains(&self, event: DomainEvent) -> bool {
        self.0.contains(event)
    }
}
