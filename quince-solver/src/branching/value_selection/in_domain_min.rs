use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// [`ValueSelector`] which chooses the smallest value in the domain of the provided variable.
#[derive(Clone, Copy, Debug)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> i32 {
        context.lower_bound(decision_variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_lower_bound_is_selected() {
        let assignments = SelectionContext::create_for_testing(vec![(3, 10)]);
        let mut context = SelectionContext::new(&assignments);
        let variable = context.domains().next().unwrap();

        let mut selector = InDomainMin;

        assert_eq!(3, selector.select_value(&mut context, variable));
    }
}
