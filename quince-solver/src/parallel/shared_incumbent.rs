use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use crate::basic_types::Solution;

/// The incumbent shared between the workers of a partitioned solve.
///
/// Workers only communicate through this structure: an atomic cell with the best objective
/// value for cheap pruning reads at node boundaries, and a mutex-guarded compare-and-improve
/// holding the solution itself. Values are in the internal minimising orientation used by the
/// objective tracker, which is identical for every worker of a solve.
#[derive(Debug)]
pub struct SharedIncumbent {
    best_value: AtomicI64,
    best: Mutex<Option<(i64, Solution)>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        SharedIncumbent {
            best_value: AtomicI64::new(i64::MAX),
            best: Mutex::new(None),
        }
    }
}

impl SharedIncumbent {
    /// The best value offered so far, if any.
    pub(crate) fn best_value(&self) -> Option<i64> {
        let value = self.best_value.load(Ordering::Relaxed);
        (value != i64::MAX).then_some(value)
    }

    /// Install `solution` as the shared incumbent if it is strictly better than the current
    /// one. Returns whether the offer was accepted.
    pub(crate) fn offer(&self, value: i64, solution: &Solution) -> bool {
        let mut best = self.best.lock().expect("the incumbent lock is never poisoned");

        let improved = best.as_ref().map_or(true, |&(current, _)| value < current);
        if improved {
            *best = Some((value, solution.clone()));
            self.best_value.store(value, Ordering::Relaxed);
        }
        improved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Assignments;

    fn solution_with_value(value: i64) -> Solution {
        let assignments = Assignments::default();
        Solution::from_assignments(&assignments, Some(value))
    }

    #[test]
    fn only_strict_improvements_are_accepted() {
        let shared = SharedIncumbent::default();

        assert!(shared.offer(10, &solution_with_value(10)));
        assert!(!shared.offer(10, &solution_with_value(10)));
        assert!(shared.offer(7, &solution_with_value(7)));
        assert_eq!(Some(7), shared.best_value());
    }
}
