use fnv::FnvHashSet;

use crate::basic_types::EmptyDomain;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::domain_events::DomainEvent;
use crate::engine::variables::DomainId;
use crate::quince_assert_simple;

/// An opaque token identifying a point in the search to which the domain store can be restored.
///
/// Tokens follow a stack discipline: restoring to a token undoes every narrowing recorded since
/// the token was issued and invalidates all tokens issued after it. Restoring to an invalidated
/// token is an engine defect, not a recoverable condition, and trips an assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    level: usize,
    stamp: u64,
}

/// The domain store: the current domain of every variable, together with the trail which makes
/// all narrowing operations reversible.
///
/// Narrowing is the only channel through which search and propagation communicate pruning. A
/// domain only ever shrinks while the search descends; it grows exclusively through
/// [`Assignments::restore_to`], which reproduces a previously observed state exactly.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    trail: Trail<DomainChange>,
    events: Vec<(DomainId, DomainEvent)>,
    checkpoint_stamps: Vec<u64>,
    next_stamp: u64,
}

/// A domain represented as an interval with holes. Values outside `[lower_bound, upper_bound]`
/// may linger in the hole set after bound updates; they are ignored until a restore makes them
/// relevant again.
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: FnvHashSet<i32>,
}

impl IntegerDomain {
    fn contains(&self, value: i32) -> bool {
        value >= self.lower_bound && value <= self.upper_bound && !self.holes.contains(&value)
    }

    fn is_fixed(&self) -> bool {
        self.lower_bound == self.upper_bound
    }
}

/// One reversible step on the trail.
#[derive(Clone, Debug)]
enum DomainChange {
    LowerBound {
        domain_id: DomainId,
        previous_bound: i32,
    },
    UpperBound {
        domain_id: DomainId,
        previous_bound: i32,
    },
    Removal {
        domain_id: DomainId,
        value: i32,
    },
}

impl Assignments {
    /// Create a new domain with the inclusive interval `[lower_bound, upper_bound]`.
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        quince_assert_simple!(
            lower_bound <= upper_bound,
            "a domain cannot be created empty"
        );

        self.domains.push(IntegerDomain {
            lower_bound,
            upper_bound,
            holes: FnvHashSet::default(),
        })
    }

    pub(crate) fn num_domains(&self) -> u32 {
        self.domains.len() as u32
    }

    pub(crate) fn domain_ids(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys()
    }

    pub(crate) fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub(crate) fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub(crate) fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.domains[domain_id].is_fixed()
    }

    /// The assigned value, or `None` while the domain still holds more than one value.
    pub(crate) fn assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        let domain = &self.domains[domain_id];
        domain.is_fixed().then_some(domain.lower_bound)
    }

    pub(crate) fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub(crate) fn domain_size(&self, domain_id: DomainId) -> usize {
        let domain = &self.domains[domain_id];
        let width = (domain.upper_bound - domain.lower_bound + 1) as usize;
        let holes = domain
            .holes
            .iter()
            .filter(|&&value| value > domain.lower_bound && value < domain.upper_bound)
            .count();
        width - holes
    }

    pub(crate) fn domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        let domain = &self.domains[domain_id];
        (domain.lower_bound..=domain.upper_bound).filter(move |value| !domain.holes.contains(value))
    }

    /// Raise the lower bound to at least `bound`.
    ///
    /// On success the change is recorded on the trail and a [`DomainEvent`] is emitted. When the
    /// domain empties the (recorded) change is kept so that the enclosing checkpoint restore
    /// undoes it, and `Err(EmptyDomain)` tells the caller to backtrack.
    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let (previous_bound, new_bound, upper_bound) = {
            let domain = &mut self.domains[domain_id];
            if bound <= domain.lower_bound {
                return Ok(());
            }

            let previous_bound = domain.lower_bound;
            let mut new_bound = bound;
            while new_bound <= domain.upper_bound && domain.holes.contains(&new_bound) {
                new_bound += 1;
            }
            domain.lower_bound = new_bound;

            (previous_bound, new_bound, domain.upper_bound)
        };

        self.trail.push(DomainChange::LowerBound {
            domain_id,
            previous_bound,
        });
        self.events.push((domain_id, DomainEvent::LowerBound));

        if new_bound > upper_bound {
            return Err(EmptyDomain);
        }
        if new_bound == upper_bound {
            self.events.push((domain_id, DomainEvent::Assign));
        }
        Ok(())
    }

    /// Lower the upper bound to at most `bound`. See [`Assignments::tighten_lower_bound`].
    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let (previous_bound, new_bound, lower_bound) = {
            let domain = &mut self.domains[domain_id];
            if bound >= domain.upper_bound {
                return Ok(());
            }

            let previous_bound = domain.upper_bound;
            let mut new_bound = bound;
            while new_bound >= domain.lower_bound && domain.holes.contains(&new_bound) {
                new_bound -= 1;
            }
            domain.upper_bound = new_bound;

            (previous_bound, new_bound, domain.lower_bound)
        };

        self.trail.push(DomainChange::UpperBound {
            domain_id,
            previous_bound,
        });
        self.events.push((domain_id, DomainEvent::UpperBound));

        if new_bound < lower_bound {
            return Err(EmptyDomain);
        }
        if new_bound == lower_bound {
            self.events.push((domain_id, DomainEvent::Assign));
        }
        Ok(())
    }

    /// Remove a single value from the domain.
    pub(crate) fn remove_value(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        {
            let domain = &self.domains[domain_id];
            if !domain.contains(value) {
                return Ok(());
            }
            if value == domain.lower_bound {
                return self.tighten_lower_bound(domain_id, value + 1);
            }
            if value == domain.upper_bound {
                return self.tighten_upper_bound(domain_id, value - 1);
            }
        }

        let _ = self.domains[domain_id].holes.insert(value);
        self.trail.push(DomainChange::Removal { domain_id, value });
        self.events.push((domain_id, DomainEvent::Removal));
        Ok(())
    }

    /// Narrow the domain to the single value `value`.
    pub(crate) fn make_assignment(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.tighten_lower_bound(domain_id, value)?;
        self.tighten_upper_bound(domain_id, value)
    }

    /// Open a new checkpoint. All narrowing from here on is undone by restoring to the returned
    /// token.
    pub(crate) fn new_checkpoint(&mut self) -> Checkpoint {
        self.trail.begin_level();
        self.next_stamp += 1;
        self.checkpoint_stamps.push(self.next_stamp);

        Checkpoint {
            level: self.trail.level(),
            stamp: self.next_stamp,
        }
    }

    /// The number of currently open checkpoints; 0 at the root.
    pub(crate) fn checkpoint_level(&self) -> usize {
        self.trail.level()
    }

    /// Undo every narrowing recorded since `checkpoint` was issued, leaving all domains exactly
    /// as they were at that point. `checkpoint` and all tokens issued after it become invalid.
    pub(crate) fn restore_to(&mut self, checkpoint: Checkpoint) {
        quince_assert_simple!(
            checkpoint.level >= 1
                && checkpoint.level <= self.trail.level()
                && self.checkpoint_stamps[checkpoint.level - 1] == checkpoint.stamp,
            "restored a stale checkpoint"
        );

        self.checkpoint_stamps.truncate(checkpoint.level - 1);

        for change in self.trail.unwind_to(checkpoint.level - 1) {
            match change {
                DomainChange::LowerBound {
                    domain_id,
                    previous_bound,
                } => self.domains[domain_id].lower_bound = previous_bound,
                DomainChange::UpperBound {
                    domain_id,
                    previous_bound,
                } => self.domains[domain_id].upper_bound = previous_bound,
                DomainChange::Removal { domain_id, value } => {
                    let _ = self.domains[domain_id].holes.remove(&value);
                }
            }
        }

        // Changes that were never propagated are moot after the restore.
        self.events.clear();
    }

    pub(crate) fn drain_events(&mut self) -> Vec<(DomainId, DomainEvent)> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }
}
