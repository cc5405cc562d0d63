use crate::Model;

/// A solve call: the model plus the resource budget and search options for this request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SolveRequest {
    #[prost(message, optional, tag = "1")]
    pub model: Option<Model>,
    /// Wall-clock budget in milliseconds. Absent means no deadline.
    #[prost(uint64, optional, tag = "2")]
    pub deadline_ms: Option<u64>,
    /// Cap on the number of branching decisions. Absent means no cap.
    #[prost(uint64, optional, tag = "3")]
    pub decision_budget: Option<u64>,
    /// Stop once the incumbent is within this relative gap of the proven bound.
    #[prost(double, optional, tag = "4")]
    pub target_gap: Option<f64>,
    /// Partial assignment used to guide the first descent.
    #[prost(message, repeated, tag = "5")]
    pub warm_start: Vec<Assignment>,
    /// Number of parallel workers. Absent or zero means a single worker.
    #[prost(uint32, optional, tag = "6")]
    pub workers: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Assignment {
    #[prost(uint32, tag = "1")]
    pub variable: u32,
    #[prost(int32, tag = "2")]
    pub value: i32,
}

/// The outcome of a solve call.
///
/// `objective_value` and `assignments` are present exactly when the status is [`Optimal`] or
/// [`Feasible`]; `bound` carries the best proven bound at the time of the answer.
///
/// [`Optimal`]: SolutionStatus::Optimal
/// [`Feasible`]: SolutionStatus::Feasible
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Solution {
    #[prost(enumeration = "SolutionStatus", tag = "1")]
    pub status: i32,
    #[prost(int64, optional, tag = "2")]
    pub objective_value: Option<i64>,
    #[prost(int64, optional, tag = "3")]
    pub bound: Option<i64>,
    #[prost(message, repeated, tag = "4")]
    pub assignments: Vec<Assignment>,
}

impl Solution {
    /// The assigned value of `variable`, if the solution carries assignments.
    pub fn value(&self, variable: u32) -> Option<i32> {
        self.assignments
            .iter()
            .find(|assignment| assignment.variable == variable)
            .map(|assignment| assignment.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SolutionStatus {
    /// The budget ran out before anything could be concluded.
    Unknown = 0,
    /// The reported solution is optimal and proven so.
    Optimal = 1,
    /// A solution was found but optimality was not proven.
    Feasible = 2,
    /// The model admits no solution.
    Infeasible = 3,
}
