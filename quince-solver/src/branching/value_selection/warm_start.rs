use fnv::FnvHashMap;

use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// [`ValueSelector`] which steers the first descent towards a provided partial assignment.
///
/// For a hinted variable whose hint is still in its domain the hint is tried first; everywhere
/// else it behaves like [`InDomainMin`](super::InDomainMin). Hints that propagation has already
/// ruled out are simply ignored, so a stale warm start degrades gracefully instead of failing.
#[derive(Clone, Debug, Default)]
pub struct WarmStart {
    hints: FnvHashMap<DomainId, i32>,
}

impl WarmStart {
    pub fn new(hints: impl IntoIterator<Item = (DomainId, i32)>) -> WarmStart {
        WarmStart {
            hints: hints.into_iter().collect(),
        }
    }
}

impl ValueSelector for WarmStart {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: DomainId,
    ) -> i32 {
        match self.hints.get(&decision_variable) {
            Some(&hint) if context.contains(decision_variable, hint) => hint,
            _ => context.lower_bound(decision_variable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_hint_inside_the_domain_is_preferred() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 10)]);
        let mut context = SelectionContext::new(&assignments);
        let variable = context.domains().next().unwrap();

        let mut selector = WarmStart::new([(variable, 7)]);

        assert_eq!(7, selector.select_value(&mut context, variable));
    }

    #[test]
    fn a_hint_outside_the_domain_falls_back_to_the_minimum() {
        let assignments = SelectionContext::create_for_testing(vec![(0, 5)]);
        let mut context = SelectionContext::new(&assignments);
        let variable = context.domains().next().unwrap();

        let mut selector = WarmStart::new([(variable, 42)]);

        assert_eq!(0, selector.select_value(&mut context, variable));
    }
}
