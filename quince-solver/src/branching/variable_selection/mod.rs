//! Variable selectors: which unassigned variable to branch on next.

mod input_order;
mod smallest_domain;
mod variable_selector;

pub use input_order::InputOrder;
pub use smallest_domain::SmallestDomain;
pub use variable_selector::VariableSelector;
