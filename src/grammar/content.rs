//! The expression tree: one immutable [`Content`] per utterance.
//!
//! A [`Content`] pairs a subject with a [`Shape`] (one variant per topic or
//! connective) and caches its canonical text. Construction always runs
//! subject-completion and the normalizer, so a published value is complete
//! and its text is the exact rendering of its fields. Equality and hashing
//! look only at the text.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::agent::Agent;

use super::complete;
use super::error::{GrammarError, GrammarResult};
use super::normalize;
use super::vocab::{Operator, Role, Species, Topic, UtteranceRef};

/// The closed set of utterance shapes.
///
/// Connective variants hold their clauses directly; the fixed arities of
/// REQUEST/INQUIRE/NOT/DAY (one) and BECAUSE/XOR (two) are encoded in the
/// types. AND/OR must be non-empty, which [`Content::new`] checks.
#[derive(Debug, Clone)]
pub enum Shape {
    Skip,
    Over,
    Agree(UtteranceRef),
    Disagree(UtteranceRef),
    Estimate { target: Agent, role: Role },
    ComingOut { target: Agent, role: Role },
    Divined { target: Agent, species: Species },
    Identified { target: Agent, species: Species },
    Divination(Agent),
    Guard(Agent),
    Guarded(Agent),
    Vote(Agent),
    Voted(Agent),
    Attack(Agent),
    Attacked(Agent),
    Request { target: Agent, content: Content },
    Inquire { target: Agent, content: Content },
    /// Reason, then action.
    Because([Content; 2]),
    Xor([Content; 2]),
    And(Vec<Content>),
    Or(Vec<Content>),
    Not(Content),
    Day { day: u32, content: Content },
}

impl Shape {
    pub fn topic(&self) -> Topic {
        match self {
            Shape::Skip => Topic::Skip,
            Shape::Over => Topic::Over,
            Shape::Agree(_) => Topic::Agree,
            Shape::Disagree(_) => Topic::Disagree,
            Shape::Estimate { .. } => Topic::Estimate,
            Shape::ComingOut { .. } => Topic::ComingOut,
            Shape::Divined { .. } => Topic::Divined,
            Shape::Identified { .. } => Topic::Identified,
            Shape::Divination(_) => Topic::Divination,
            Shape::Guard(_) => Topic::Guard,
            Shape::Guarded(_) => Topic::Guarded,
            Shape::Vote(_) => Topic::Vote,
            Shape::Voted(_) => Topic::Voted,
            Shape::Attack(_) => Topic::Attack,
            Shape::Attacked(_) => Topic::Attacked,
            Shape::Request { .. }
            | Shape::Inquire { .. }
            | Shape::Because(_)
            | Shape::Xor(_)
            | Shape::And(_)
            | Shape::Or(_)
            | Shape::Not(_)
            | Shape::Day { .. } => Topic::Operator,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Shape::Request { .. } => Some(Operator::Request),
            Shape::Inquire { .. } => Some(Operator::Inquire),
            Shape::Because(_) => Some(Operator::Because),
            Shape::Xor(_) => Some(Operator::Xor),
            Shape::And(_) => Some(Operator::And),
            Shape::Or(_) => Some(Operator::Or),
            Shape::Not(_) => Some(Operator::Not),
            Shape::Day { .. } => Some(Operator::Day),
            _ => None,
        }
    }

    /// The target agent, for shapes that name one.
    pub fn target(&self) -> Option<Agent> {
        match self {
            Shape::Estimate { target, .. }
            | Shape::ComingOut { target, .. }
            | Shape::Divined { target, .. }
            | Shape::Identified { target, .. }
            | Shape::Request { target, .. }
            | Shape::Inquire { target, .. } => Some(*target),
            Shape::Divination(target)
            | Shape::Guard(target)
            | Shape::Guarded(target)
            | Shape::Vote(target)
            | Shape::Voted(target)
            | Shape::Attack(target)
            | Shape::Attacked(target) => Some(*target),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Content] {
        match self {
            Shape::Request { content, .. }
            | Shape::Inquire { content, .. }
            | Shape::Not(content)
            | Shape::Day { content, .. } => std::slice::from_ref(content),
            Shape::Because(pair) | Shape::Xor(pair) => pair,
            Shape::And(items) | Shape::Or(items) => items,
            _ => &[],
        }
    }

    /// Rebuild the shape with every clause passed through `f`.
    pub fn map_children(self, mut f: impl FnMut(Content) -> Content) -> Shape {
        match self {
            Shape::Request { target, content } => Shape::Request {
                target,
                content: f(content),
            },
            Shape::Inquire { target, content } => Shape::Inquire {
                target,
                content: f(content),
            },
            Shape::Because(pair) => Shape::Because(pair.map(f)),
            Shape::Xor(pair) => Shape::Xor(pair.map(f)),
            Shape::And(items) => Shape::And(items.into_iter().map(f).collect()),
            Shape::Or(items) => Shape::Or(items.into_iter().map(f).collect()),
            Shape::Not(content) => Shape::Not(f(content)),
            Shape::Day { day, content } => Shape::Day {
                day,
                content: f(content),
            },
            atomic => atomic,
        }
    }

    /// An omitted target is the wildcard; `NONE` is never stored as a target.
    fn with_default_target(self) -> Shape {
        fn fill(agent: Agent) -> Agent {
            if agent.is_none() { Agent::ANY } else { agent }
        }
        match self {
            Shape::Estimate { target, role } => Shape::Estimate {
                target: fill(target),
                role,
            },
            Shape::ComingOut { target, role } => Shape::ComingOut {
                target: fill(target),
                role,
            },
            Shape::Divined { target, species } => Shape::Divined {
                target: fill(target),
                species,
            },
            Shape::Identified { target, species } => Shape::Identified {
                target: fill(target),
                species,
            },
            Shape::Divination(t) => Shape::Divination(fill(t)),
            Shape::Guard(t) => Shape::Guard(fill(t)),
            Shape::Guarded(t) => Shape::Guarded(fill(t)),
            Shape::Vote(t) => Shape::Vote(fill(t)),
            Shape::Voted(t) => Shape::Voted(fill(t)),
            Shape::Attack(t) => Shape::Attack(fill(t)),
            Shape::Attacked(t) => Shape::Attacked(fill(t)),
            Shape::Request { target, content } => Shape::Request {
                target: fill(target),
                content,
            },
            Shape::Inquire { target, content } => Shape::Inquire {
                target: fill(target),
                content,
            },
            other => other,
        }
    }
}

struct Node {
    subject: Agent,
    shape: Shape,
    text: String,
    /// Byte offset where the text continues after the subject prefix.
    body_start: usize,
}

/// An immutable, shareable expression with cached canonical text.
///
/// Cloning is cheap (reference counted).
#[derive(Clone)]
pub struct Content(Arc<Node>);

impl Content {
    /// Build a content from a subject and shape.
    ///
    /// Fails only for an empty AND/OR. Clauses lacking a subject inherit
    /// one per the completion rule, and the text is rendered.
    pub fn new(subject: Agent, shape: Shape) -> GrammarResult<Self> {
        if let Shape::And(items) | Shape::Or(items) = &shape {
            if items.is_empty() {
                return Err(GrammarError::EmptyOperands {
                    operator: shape.operator().unwrap_or(Operator::And),
                });
            }
        }
        Ok(Self::assemble(subject, shape))
    }

    /// Complete, normalize, and freeze. Callers guarantee arity.
    pub(crate) fn assemble(subject: Agent, shape: Shape) -> Self {
        let shape = complete::complete_children(subject, shape.with_default_target());
        let rendered = normalize::render(subject, &shape);
        Content(Arc::new(Node {
            subject,
            shape,
            text: rendered.text,
            body_start: rendered.body_start,
        }))
    }

    /// The `Skip` content.
    pub fn skip() -> Self {
        Self::assemble(Agent::NONE, Shape::Skip)
    }

    /// The `Over` content.
    pub fn over() -> Self {
        Self::assemble(Agent::NONE, Shape::Over)
    }

    /// Copy of this content with the subject replaced.
    ///
    /// Clauses that still have no subject of their own inherit the new one,
    /// and the text is re-rendered.
    pub fn with_subject(&self, subject: Agent) -> Self {
        Self::assemble(subject, self.0.shape.clone())
    }

    /// Canonical text.
    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Canonical text without the leading subject token.
    pub fn body(&self) -> &str {
        &self.0.text[self.0.body_start..]
    }

    pub fn subject(&self) -> Agent {
        self.0.subject
    }

    pub fn shape(&self) -> &Shape {
        &self.0.shape
    }

    pub fn topic(&self) -> Topic {
        self.0.shape.topic()
    }

    /// The connective, when `topic()` is [`Topic::Operator`].
    pub fn operator(&self) -> Option<Operator> {
        self.0.shape.operator()
    }

    /// The target agent; [`Agent::ANY`] for shapes that name none.
    pub fn target(&self) -> Agent {
        self.0.shape.target().unwrap_or(Agent::ANY)
    }

    pub fn role(&self) -> Option<Role> {
        match self.0.shape {
            Shape::Estimate { role, .. } | Shape::ComingOut { role, .. } => Some(role),
            _ => None,
        }
    }

    pub fn species(&self) -> Option<Species> {
        match self.0.shape {
            Shape::Divined { species, .. } | Shape::Identified { species, .. } => Some(species),
            _ => None,
        }
    }

    pub fn utterance(&self) -> Option<UtteranceRef> {
        match self.0.shape {
            Shape::Agree(r) | Shape::Disagree(r) => Some(r),
            _ => None,
        }
    }

    pub fn day(&self) -> Option<u32> {
        match self.0.shape {
            Shape::Day { day, .. } => Some(day),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Content] {
        self.0.shape.children()
    }

    pub fn is_skip(&self) -> bool {
        matches!(self.0.shape, Shape::Skip)
    }

    /// Every concrete agent mentioned anywhere in the tree, deduplicated,
    /// in order of first appearance.
    pub fn agents(&self) -> Vec<Agent> {
        let mut out = Vec::new();
        self.collect_agents(&mut out);
        out
    }

    fn collect_agents(&self, out: &mut Vec<Agent>) {
        let mut push = |agent: Agent| {
            if agent.is_concrete() && !out.contains(&agent) {
                out.push(agent);
            }
        };
        push(self.subject());
        if let Some(target) = self.0.shape.target() {
            push(target);
        }
        for child in self.children() {
            child.collect_agents(out);
        }
    }

    /// Structured dump of the tree, for logging and JSON output.
    pub fn view(&self) -> ContentView {
        ContentView {
            text: self.text().to_string(),
            topic: self.topic(),
            operator: self.operator(),
            subject: self.subject().to_string(),
            target: self.0.shape.target().map(|t| t.to_string()),
            role: self.role(),
            species: self.species(),
            utterance: self.utterance(),
            day: self.day(),
            children: self.children().iter().map(Content::view).collect(),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.0.text == other.0.text
    }
}

impl Eq for Content {}

impl Hash for Content {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.text.hash(state);
    }
}

impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.text)
    }
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Content").field(&self.0.text).finish()
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

impl<'de> Deserialize<'de> for Content {
    /// Text from the wire goes through the lenient parser.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(super::parser::parse(&text))
    }
}

/// Field-by-field view of a [`Content`] tree.
#[derive(Debug, Clone, Serialize)]
pub struct ContentView {
    pub text: String,
    pub topic: Topic,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utterance: Option<UtteranceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentView>,
}
