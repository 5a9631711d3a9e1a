//! Subject completion: filling in the subject a clause leaves implicit.
//!
//! A clause without an explicit subject takes one from its governing
//! operator:
//!
//! 1. A clause that names its own subject keeps it.
//! 2. Under REQUEST/INQUIRE the clause inherits the operator's *target*
//!    (the addressee is who must fulfil it).
//! 3. Otherwise it inherits the operator's subject, if that is set.
//! 4. Otherwise it stays `NONE`.
//!
//! Every [`Content`] is completed when it is constructed, so a clause that
//! keeps its subject is already complete all the way down. A clause that
//! inherits is rebuilt through [`Content::with_subject`], which re-runs the
//! same rule one level lower with the clause as the new governing node.

use crate::agent::Agent;

use super::content::{Content, Shape};

/// The subject an implicit clause under `shape` would inherit, if any.
pub fn inherited_subject(subject: Agent, shape: &Shape) -> Option<Agent> {
    match shape {
        Shape::Request { target, .. } | Shape::Inquire { target, .. } => Some(*target),
        _ if !subject.is_none() => Some(subject),
        _ => None,
    }
}

/// Apply the completion rule to the direct clauses of `shape`.
pub fn complete_children(subject: Agent, shape: Shape) -> Shape {
    match inherited_subject(subject, &shape) {
        Some(inherited) => shape.map_children(|child| {
            if child.subject().is_none() {
                child.with_subject(inherited)
            } else {
                child
            }
        }),
        None => shape,
    }
}
