use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// A [`VariableSelector`] which selects the first unassigned variable in the order in which they
/// were provided.
#[derive(Clone, Debug)]
pub struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub fn new(variables: &[DomainId]) -> InputOrder {
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl VariableSelector for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        self.variables
            .iter()
            .copied()
            .find(|&variable| !context.is_fixed(variable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_first_unassigned_variable_is_selected() {
        let assignments = SelectionContext::create_for_testing(vec![(5, 5), (0, 4), (0, 2)]);
        let mut context = SelectionContext::new(&assignments);
        let variables = context.domains().collect::<Vec<_>>();

        let mut selector = InputOrder::new(&variables);

        assert_eq!(Some(variables[1]), selector.select_variable(&mut context));
    }
}
