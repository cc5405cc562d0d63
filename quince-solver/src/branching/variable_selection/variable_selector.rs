use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Selects the next variable to branch on, or `None` when every variable under consideration is
/// assigned.
pub trait VariableSelector {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId>;
}
