//! Builder API: one constructor per utterance shape.
//!
//! Fixed-arity connectives take their clauses as typed arguments, so a
//! missing clause cannot be expressed. The variadic and dynamic entry points
//! ([`and`], [`or`], [`compose`]) validate operand counts and report misuse
//! as a [`GrammarError`]. Unlike the parser they never fall back to `Skip`.

use crate::agent::Agent;

use super::content::{Content, Shape};
use super::error::{GrammarError, GrammarResult};
use super::vocab::{Operator, Role, Species, Topic, UtteranceRef};

pub fn skip() -> Content {
    Content::skip()
}

pub fn over() -> Content {
    Content::over()
}

/// `[subject ]AGREE TALK|WHISPER day<D> ID:<I>`
pub fn agree(subject: Agent, reference: UtteranceRef) -> Content {
    Content::assemble(subject, Shape::Agree(reference))
}

pub fn disagree(subject: Agent, reference: UtteranceRef) -> Content {
    Content::assemble(subject, Shape::Disagree(reference))
}

/// `[subject ]ESTIMATE <target> <role>`
pub fn estimate(subject: Agent, target: Agent, role: Role) -> Content {
    Content::assemble(subject, Shape::Estimate { target, role })
}

pub fn coming_out(subject: Agent, target: Agent, role: Role) -> Content {
    Content::assemble(subject, Shape::ComingOut { target, role })
}

/// `[subject ]DIVINED <target> <species>`
pub fn divined(subject: Agent, target: Agent, species: Species) -> Content {
    Content::assemble(subject, Shape::Divined { target, species })
}

pub fn identified(subject: Agent, target: Agent, species: Species) -> Content {
    Content::assemble(subject, Shape::Identified { target, species })
}

pub fn divination(subject: Agent, target: Agent) -> Content {
    Content::assemble(subject, Shape::Divination(target))
}

pub fn guard(subject: Agent, target: Agent) -> Content {
    Content::assemble(subject, Shape::Guard(target))
}

pub fn guarded(subject: Agent, target: Agent) -> Content {
    Content::assemble(subject, Shape::Guarded(target))
}

pub fn vote(subject: Agent, target: Agent) -> Content {
    Content::assemble(subject, Shape::Vote(target))
}

pub fn voted(subject: Agent, target: Agent) -> Content {
    Content::assemble(subject, Shape::Voted(target))
}

pub fn attack(subject: Agent, target: Agent) -> Content {
    Content::assemble(subject, Shape::Attack(target))
}

pub fn attacked(subject: Agent, target: Agent) -> Content {
    Content::assemble(subject, Shape::Attacked(target))
}

/// `[subject ]REQUEST <target> (<action>)`. An action without a subject
/// is attributed to `target`.
pub fn request(subject: Agent, target: Agent, action: Content) -> Content {
    Content::assemble(
        subject,
        Shape::Request {
            target,
            content: action,
        },
    )
}

/// `[subject ]INQUIRE <target> (<content>)`
pub fn inquire(subject: Agent, target: Agent, content: Content) -> Content {
    Content::assemble(subject, Shape::Inquire { target, content })
}

/// `[subject ]BECAUSE (<reason>) (<action>)`
pub fn because(subject: Agent, reason: Content, action: Content) -> Content {
    Content::assemble(subject, Shape::Because([reason, action]))
}

pub fn xor(subject: Agent, first: Content, second: Content) -> Content {
    Content::assemble(subject, Shape::Xor([first, second]))
}

/// `[subject ]AND (<c0>) ... (<cn>)`; fails on an empty clause list.
pub fn and(subject: Agent, clauses: impl IntoIterator<Item = Content>) -> GrammarResult<Content> {
    Content::new(subject, Shape::And(clauses.into_iter().collect()))
}

pub fn or(subject: Agent, clauses: impl IntoIterator<Item = Content>) -> GrammarResult<Content> {
    Content::new(subject, Shape::Or(clauses.into_iter().collect()))
}

pub fn not(subject: Agent, content: Content) -> Content {
    Content::assemble(subject, Shape::Not(content))
}

/// `[subject ]DAY <day> (<content>)`
pub fn day(subject: Agent, day: u32, content: Content) -> Content {
    Content::assemble(subject, Shape::Day { day, content })
}

/// Build any connective from a runtime operator and clause list.
///
/// `target` is used by REQUEST/INQUIRE and `day` by DAY; both are ignored
/// otherwise. The clause count must match [`Operator::arity`].
pub fn compose(
    subject: Agent,
    operator: Operator,
    target: Agent,
    day: u32,
    clauses: Vec<Content>,
) -> GrammarResult<Content> {
    let shape = match operator {
        Operator::Request => {
            let [content] = exactly(operator, clauses)?;
            Shape::Request { target, content }
        }
        Operator::Inquire => {
            let [content] = exactly(operator, clauses)?;
            Shape::Inquire { target, content }
        }
        Operator::Not => {
            let [content] = exactly(operator, clauses)?;
            Shape::Not(content)
        }
        Operator::Day => {
            let [content] = exactly(operator, clauses)?;
            Shape::Day { day, content }
        }
        Operator::Because => Shape::Because(exactly(operator, clauses)?),
        Operator::Xor => Shape::Xor(exactly(operator, clauses)?),
        Operator::And => Shape::And(clauses),
        Operator::Or => Shape::Or(clauses),
    };
    Content::new(subject, shape)
}

fn exactly<const N: usize>(operator: Operator, clauses: Vec<Content>) -> GrammarResult<[Content; N]> {
    <[Content; N]>::try_from(clauses).map_err(|clauses| GrammarError::ArityMismatch {
        operator,
        expected: operator.arity().to_string(),
        actual: clauses.len(),
    })
}

/// Shape for a target-only action topic.
pub(crate) fn action_shape(topic: Topic, target: Agent) -> Option<Shape> {
    Some(match topic {
        Topic::Divination => Shape::Divination(target),
        Topic::Guard => Shape::Guard(target),
        Topic::Guarded => Shape::Guarded(target),
        Topic::Vote => Shape::Vote(target),
        Topic::Voted => Shape::Voted(target),
        Topic::Attack => Shape::Attack(target),
        Topic::Attacked => Shape::Attacked(target),
        _ => return None,
    })
}
