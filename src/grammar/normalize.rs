//! Normalizer: renders a shape to its canonical text.
//!
//! ```text
//! Skip | Over
//! [subj ]AGREE|DISAGREE TALK|WHISPER day<D> ID:<I>
//! [subj ]ESTIMATE|COMINGOUT <target> <role>
//! [subj ]DIVINED|IDENTIFIED <target> <species>
//! [subj ]VOTE|GUARD|... <target>
//! [subj ]REQUEST|INQUIRE <target> (<clause>)
//! [subj ]BECAUSE|XOR (<clause>) (<clause>)
//! [subj ]AND|OR (<clause>) ...
//! [subj ]NOT (<clause>)
//! [subj ]DAY <day> (<clause>)
//! ```
//!
//! A clause whose subject equals the governing agent (the target under
//! REQUEST/INQUIRE, the subject elsewhere) is embedded without its subject
//! token. The clause still stores the subject; only the text elides it.

use crate::agent::Agent;

use super::content::{Content, Shape};

/// Rendered text plus the offset where the subject prefix ends.
pub(crate) struct Rendered {
    pub text: String,
    pub body_start: usize,
}

pub(crate) fn render(subject: Agent, shape: &Shape) -> Rendered {
    let mut text = String::new();
    if !matches!(shape, Shape::Skip | Shape::Over) {
        write_subject(&mut text, subject);
    }
    let body_start = text.len();
    write_body(&mut text, subject, shape);
    Rendered { text, body_start }
}

fn write_subject(out: &mut String, subject: Agent) {
    if !subject.is_none() {
        // Agent's Display already yields "ANY" for the wildcard.
        out.push_str(&subject.to_string());
        out.push(' ');
    }
}

fn write_body(out: &mut String, subject: Agent, shape: &Shape) {
    let keyword = shape
        .operator()
        .map(|op| op.keyword())
        .unwrap_or_else(|| shape.topic().keyword());
    out.push_str(keyword);

    match shape {
        Shape::Skip | Shape::Over => {}
        Shape::Agree(reference) | Shape::Disagree(reference) => {
            out.push_str(&format!(" {reference}"));
        }
        Shape::Estimate { target, role } | Shape::ComingOut { target, role } => {
            out.push_str(&format!(" {} {role}", target_text(*target)));
        }
        Shape::Divined { target, species } | Shape::Identified { target, species } => {
            out.push_str(&format!(" {} {species}", target_text(*target)));
        }
        Shape::Divination(target)
        | Shape::Guard(target)
        | Shape::Guarded(target)
        | Shape::Vote(target)
        | Shape::Voted(target)
        | Shape::Attack(target)
        | Shape::Attacked(target) => {
            out.push(' ');
            out.push_str(&target_text(*target));
        }
        Shape::Request { target, content } | Shape::Inquire { target, content } => {
            out.push(' ');
            out.push_str(&target_text(*target));
            out.push(' ');
            write_clause(out, content, *target);
        }
        Shape::Day { day, content } => {
            out.push_str(&format!(" {day} "));
            write_clause(out, content, subject);
        }
        Shape::Because(_) | Shape::Xor(_) | Shape::And(_) | Shape::Or(_) | Shape::Not(_) => {
            for child in shape.children() {
                out.push(' ');
                write_clause(out, child, subject);
            }
        }
    }
}

/// Embed a clause in parentheses, eliding its subject when it matches.
fn write_clause(out: &mut String, clause: &Content, governing: Agent) {
    let inner = if clause.subject() == governing {
        clause.body()
    } else {
        clause.text()
    };
    out.push('(');
    out.push_str(inner);
    out.push(')');
}

/// Targets print `ANY` for both the wildcard and an unset agent.
fn target_text(target: Agent) -> String {
    if target.is_none() {
        Agent::ANY.to_string()
    } else {
        target.to_string()
    }
}
