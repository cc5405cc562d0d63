/// A constraint model: the variables, the constraints over them, and an optional objective.
///
/// Variable ids are expected to be dense indices starting at zero; constraints refer to
/// variables through those ids. Whether the ids are well-formed is the receiver's concern, the
/// format itself does not reject dangling references.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Model {
    #[prost(message, repeated, tag = "1")]
    pub variables: Vec<Variable>,
    #[prost(message, repeated, tag = "2")]
    pub constraints: Vec<Constraint>,
    #[prost(message, optional, tag = "3")]
    pub objective: Option<Objective>,
}

/// A single decision variable and its initial domain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Variable {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
    #[prost(oneof = "VariableDomain", tags = "3, 4, 5")]
    pub domain: Option<VariableDomain>,
}

impl Variable {
    /// A variable whose domain is the inclusive interval `[lower_bound, upper_bound]`.
    pub fn bounded(id: u32, lower_bound: i32, upper_bound: i32) -> Variable {
        Variable {
            id,
            name: None,
            domain: Some(VariableDomain::Interval(Interval {
                lower_bound,
                upper_bound,
            })),
        }
    }

    /// A variable whose domain is an explicit set of values.
    pub fn sparse(id: u32, values: Vec<i32>) -> Variable {
        Variable {
            id,
            name: None,
            domain: Some(VariableDomain::Sparse(ValueSet { values })),
        }
    }

    /// A 0/1 variable.
    pub fn boolean(id: u32) -> Variable {
        Variable {
            id,
            name: None,
            domain: Some(VariableDomain::Boolean(BooleanDomain {})),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Variable {
        self.name = Some(name.into());
        self
    }
}

#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum VariableDomain {
    #[prost(message, tag = "3")]
    Interval(Interval),
    #[prost(message, tag = "4")]
    Sparse(ValueSet),
    #[prost(message, tag = "5")]
    Boolean(BooleanDomain),
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Interval {
    #[prost(int32, tag = "1")]
    pub lower_bound: i32,
    #[prost(int32, tag = "2")]
    pub upper_bound: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValueSet {
    #[prost(int32, repeated, tag = "1")]
    pub values: Vec<i32>,
}

/// Marker for a 0/1 domain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BooleanDomain {}

/// A constraint, tagged by kind.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Constraint {
    #[prost(oneof = "ConstraintKind", tags = "1, 2, 3, 4, 5, 6")]
    pub kind: Option<ConstraintKind>,
}

#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum ConstraintKind {
    #[prost(message, tag = "1")]
    Linear(LinearConstraint),
    #[prost(message, tag = "2")]
    AllDifferent(AllDifferent),
    #[prost(message, tag = "3")]
    Precedence(Precedence),
    #[prost(message, tag = "4")]
    Cumulative(Cumulative),
    #[prost(message, tag = "5")]
    Disjunctive(Disjunctive),
    #[prost(message, tag = "6")]
    Clause(Clause),
}

/// `sum(coefficient_i * variable_i) <relation> rhs`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LinearConstraint {
    #[prost(message, repeated, tag = "1")]
    pub terms: Vec<LinearTerm>,
    #[prost(enumeration = "LinearRelation", tag = "2")]
    pub relation: i32,
    #[prost(int64, tag = "3")]
    pub rhs: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LinearRelation {
    LessOrEqual = 0,
    Equal = 1,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LinearTerm {
    #[prost(uint32, tag = "1")]
    pub variable: u32,
    #[prost(int64, tag = "2")]
    pub coefficient: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AllDifferent {
    #[prost(uint32, repeated, tag = "1")]
    pub variables: Vec<u32>,
}

/// `before + gap <= after`, over two start-time variables.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Precedence {
    #[prost(uint32, tag = "1")]
    pub before: u32,
    #[prost(uint32, tag = "2")]
    pub after: u32,
    #[prost(int32, tag = "3")]
    pub gap: i32,
}

/// A task in a scheduling constraint. `start` is a variable id; `duration` and `demand` are
/// constants. Disjunctive constraints ignore `demand`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScheduledTask {
    #[prost(uint32, tag = "1")]
    pub start: u32,
    #[prost(int32, tag = "2")]
    pub duration: i32,
    #[prost(int32, tag = "3")]
    pub demand: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Cumulative {
    #[prost(message, repeated, tag = "1")]
    pub tasks: Vec<ScheduledTask>,
    #[prost(int32, tag = "2")]
    pub capacity: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Disjunctive {
    #[prost(message, repeated, tag = "1")]
    pub tasks: Vec<ScheduledTask>,
}

/// A disjunction of boolean literals over 0/1 variables.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Clause {
    #[prost(message, repeated, tag = "1")]
    pub literals: Vec<BoolLiteral>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoolLiteral {
    #[prost(uint32, tag = "1")]
    pub variable: u32,
    #[prost(bool, tag = "2")]
    pub negated: bool,
}

/// A linear objective and the direction in which to improve it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Objective {
    #[prost(enumeration = "OptimisationDirection", tag = "1")]
    pub direction: i32,
    #[prost(message, repeated, tag = "2")]
    pub terms: Vec<LinearTerm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OptimisationDirection {
    Minimise = 0,
    Maximise = 1,
}
