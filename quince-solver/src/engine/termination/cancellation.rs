use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A cooperative cancellation token: a cheaply cloneable flag which any holder can raise and
/// which the solver samples at every node boundary.
///
/// Cancellation is advisory: a running propagation pass always finishes first, so the domain
/// store is never observed in a partially restored state.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Cancellation {
        Cancellation::default()
    }

    /// Request that every solver holding a clone of this token stops at its next node boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl TerminationCondition for Cancellation {
    fn should_stop(&mut self) -> bool {
        self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelling_one_clone_stops_all_clones() {
        let token = Cancellation::new();
        let mut observer = token.clone();

        assert!(!observer.should_stop());
        token.cancel();
        assert!(observer.should_stop());
    }
}
