//! A [`TerminationCondition`] is polled by the solver during search and indicates when the
//! solver should stop, even if no definitive conclusion has been reached yet. Conditions are
//! only ever sampled at node boundaries (between propagation passes, never inside one), so a
//! triggered condition always observes a consistent domain store.

mod cancellation;
mod combinator;
mod decision_budget;
mod indefinite;
mod time_budget;

pub use cancellation::Cancellation;
pub use combinator::Combinator;
pub use decision_budget::DecisionBudget;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition: when the solver should give up
/// searching and report the best it has.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Notifies the condition that a branching decision was made.
    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(condition) => condition.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(condition) = self {
            condition.decision_has_been_made();
        }
    }
}
