//! Branchers assembled from variable and value selectors.

mod independent_variable_value_brancher;

pub use independent_variable_value_brancher::IndependentVariableValueBrancher;
