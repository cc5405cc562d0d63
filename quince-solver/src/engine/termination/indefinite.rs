use super::TerminationCondition;

/// A [`TerminationCondition`] which never triggers; the solver runs until it has a definitive
/// answer.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
