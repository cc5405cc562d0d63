use crate::engine::Assignments;
use crate::engine::variables::DomainId;
use crate::quince_assert_simple;

/// An immutable snapshot of a complete assignment: one value per variable, plus the objective
/// value of the assignment when the solve had an objective.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: Vec<i32>,
    objective_value: Option<i64>,
}

impl Solution {
    /// Extract a solution from a fully assigned domain store.
    pub(crate) fn from_assignments(
        assignments: &Assignments,
        objective_value: Option<i64>,
    ) -> Solution {
        let values = assignments
            .domain_ids()
            .map(|domain_id| {
                let value = assignments.assigned_value(domain_id);
                quince_assert_simple!(
                    value.is_some(),
                    "a solution can only be extracted from a fully assigned domain store"
                );
                value.unwrap_or_default()
            })
            .collect();

        Solution {
            values,
            objective_value,
        }
    }

    pub fn num_domains(&self) -> usize {
        self.values.len()
    }

    /// The value assigned to `domain_id`.
    ///
    /// Panics if the solution does not define the given variable.
    pub fn value(&self, domain_id: DomainId) -> i32 {
        self.values[domain_id.id as usize]
    }

    pub fn objective_value(&self) -> Option<i64> {
        self.objective_value
    }

    pub fn iter(&self) -> impl Iterator<Item = (DomainId, i32)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, &value)| (DomainId::new(index as u32), value))
    }
}
