//! This crate contains the QMX (Quince Model eXchange) messages: a compact binary format with
//! which constraint models and solutions can cross a process or service boundary. The messages
//! are length-delimited protobuf, so any protobuf implementation can produce a [`Model`] for the
//! solver or consume the [`Solution`] it reports.
//!
//! The solver side of the exchange lives in the `quince-solver` crate; this crate deliberately
//! has no solver dependency so that front ends can depend on it alone.

mod model;
mod solution;

pub use model::*;
pub use solution::*;

pub use prost::DecodeError;
pub use prost::Message;

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn model_survives_an_encode_decode_cycle() {
        let model = Model {
            variables: vec![
                Variable::bounded(0, 1, 10),
                Variable::bounded(1, 0, 5).named("makespan"),
            ],
            constraints: vec![Constraint {
                kind: Some(ConstraintKind::AllDifferent(AllDifferent {
                    variables: vec![0, 1],
                })),
            }],
            objective: Some(Objective {
                direction: OptimisationDirection::Minimise as i32,
                terms: vec![LinearTerm {
                    variable: 1,
                    coefficient: 1,
                }],
            }),
        };

        let bytes = model.encode_to_vec();
        let decoded = Model::decode(bytes.as_slice()).expect("valid buffer");

        assert_eq!(model, decoded);
    }

    #[test]
    fn unknown_status_codes_read_as_unknown() {
        let solution = Solution {
            status: 999,
            ..Default::default()
        };

        assert_eq!(solution.status(), SolutionStatus::Unknown);
    }
}
