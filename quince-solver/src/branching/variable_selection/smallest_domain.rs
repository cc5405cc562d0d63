use log::warn;

use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A [`VariableSelector`] which selects the unassigned variable with the smallest remaining
/// domain ("most constrained first"). Ties are broken towards the variable registered first,
/// which keeps the search deterministic for identical inputs.
#[derive(Clone, Debug)]
pub struct SmallestDomain {
    variables: Vec<DomainId>,
}

impl SmallestDomain {
    pub fn new(variables: &[DomainId]) -> SmallestDomain {
        if variables.is_empty() {
            warn!("The SmallestDomain variable selector was not provided with any variables");
        }
        SmallestDomain {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for SmallestDomain {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        let mut best: Option<(usize, DomainId)> = None;

        for &variable in &self.variables {
            if context.is_fixed(variable) {
                continue;
            }

            let size = context.domain_size(variable);
            if best.map_or(true, |(best_size, _)| size < best_size) {
                best = Some((size, variable));
            }
        }

        best.map(|(_, variable)| variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_domain_is_selected() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 10), (0, 4), (0, 7)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.domains().collect::<Vec<_>>();

        let mut selector = SmallestDomain::new(&variables);

        assert_eq!(Some(variables[1]), selector.select_variable(&mut context));
    }

    #[test]
    fn ties_are_broken_towards_the_first_registered_variable() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 4), (0, 4)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.domains().collect::<Vec<_>>();

        let mut selector = SmallestDomain::new(&variables);

        assert_eq!(Some(variables[0]), selector.select_variable(&mut context));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let assignments = SelectionContext::create_for_testing(vec![(3, 3), (7, 7)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.domains().collect::<Vec<_>>();

        let mut selector = SmallestDomain::new(&variables);

        assert_eq!(None, selector.select_variable(&mut context));
    }
}
