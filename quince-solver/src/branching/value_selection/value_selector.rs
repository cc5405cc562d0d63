use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Selects the value of `decision_variable` the search should try first. The returned value must
/// be in the variable's current domain.
pub trait ValueSelector {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: DomainId)
        -> i32;
}
