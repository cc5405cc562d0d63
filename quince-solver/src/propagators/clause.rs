use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::engine::domain_events::DomainEvents;
use crate::engine::propagation::InitialisationContext;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;

/// A boolean literal over a 0/1 variable: the variable itself, or its negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Literal {
    pub domain_id: DomainId,
    pub negated: bool,
}

impl Literal {
    pub fn positive(domain_id: DomainId) -> Literal {
        Literal {
            domain_id,
            negated: false,
        }
    }

    pub fn negative(domain_id: DomainId) -> Literal {
        Literal {
            domain_id,
            negated: true,
        }
    }

    /// The variable value which makes this literal true.
    fn satisfying_value(&self) -> i32 {
        if self.negated {
            0
        } else {
            1
        }
    }
}

/// Propagator for a disjunction of boolean literals; performs unit propagation.
#[derive(Clone, Debug)]
pub(crate) struct ClausePropagator {
    literals: Box<[Literal]>,
}

impl ClausePropagator {
    pub(crate) fn new(literals: Box<[Literal]>) -> Self {
        ClausePropagator { literals }
    }

    fn literal_value(context: &impl ReadDomains, literal: Literal) -> Option<bool> {
        context
            .assigned_value(literal.domain_id)
            .map(|value| value == literal.satisfying_value())
    }
}

impl Propagator for ClausePropagator {
    fn name(&self) -> &str {
        "Clause"
    }

    fn priority(&self) -> u32 {
        0
    }

    fn initialise(&mut self, context: &mut InitialisationContext) {
        for literal in self.literals.iter() {
            context.register(literal.domain_id, DomainEvents::ASSIGN);
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatus {
        let mut unassigned = None;
        let mut num_unassigned = 0;

        for &literal in self.literals.iter() {
            match Self::literal_value(&context, literal) {
                Some(true) => return Ok(()),
                Some(false) => {}
                None => {
                    unassigned = Some(literal);
                    num_unassigned += 1;
                }
            }
        }

        match (num_unassigned, unassigned) {
            // Every literal is falsified.
            (0, _) => Err(EmptyDomain),
            // Unit clause: the remaining literal has to hold.
            (1, Some(literal)) => context.fix(literal.domain_id, literal.satisfying_value()),
            _ => Ok(()),
        }
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        self.literals
            .iter()
            .any(|&literal| Self::literal_value(&context, literal) == Some(true))
    }
}
