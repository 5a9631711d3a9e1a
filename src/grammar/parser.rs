//! Parser: canonical or hand-written utterance text → [`Content`].
//!
//! Recognition walks an explicit, ordered table of shape matchers
//! ([`SHAPE_ORDER`]); the first matcher that claims the trimmed line wins.
//! Connective shapes split their parenthesized clause list into top-level
//! groups and parse each group recursively.
//!
//! Two modes:
//!
//! - [`try_parse`] is strict and reports the first [`GrammarError`].
//! - [`parse_with`] / [`parse`] are lenient: an unrecognized clause becomes
//!   `Skip` in place, and an unrecognized line becomes `Skip` as a whole.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::agent::Agent;
use crate::config::{DEFAULT_MAX_DEPTH, GrammarConfig};
use crate::registry::AgentRegistry;

use super::builder;
use super::content::Content;
use super::error::{GrammarError, GrammarResult};
use super::lexer::{self, AGENT_TOKEN};
use super::vocab::{Operator, Role, Species, Topic, UtteranceKind, UtteranceRef};

/// The utterance shapes the parser can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// `Skip` / `Over`.
    Bare,
    /// `AGREE|DISAGREE TALK|WHISPER day<D> ID:<I>`.
    Agreement,
    /// `ESTIMATE|COMINGOUT <agent> <role>`.
    Disclosure,
    /// `DIVINED|IDENTIFIED <agent> <species>`.
    Report,
    /// `VOTE|GUARD|... <agent>`.
    Action,
    /// `REQUEST|INQUIRE <agent> (<clause>)`.
    Addressed,
    /// `BECAUSE|AND|OR|XOR|NOT|REQUEST (<clause>)...`.
    Connective,
    /// `DAY <n> (<clause>)`.
    Dated,
}

/// Matcher priority, most specific first.
///
/// `Addressed` precedes `Connective` so that a REQUEST naming its target is
/// never read as a target-less REQUEST.
pub const SHAPE_ORDER: [ShapeKind; 8] = [
    ShapeKind::Bare,
    ShapeKind::Agreement,
    ShapeKind::Disclosure,
    ShapeKind::Report,
    ShapeKind::Action,
    ShapeKind::Addressed,
    ShapeKind::Connective,
    ShapeKind::Dated,
];

fn alternation<T: Copy>(items: &[T], keyword: fn(T) -> &'static str) -> String {
    items.iter().map(|&item| keyword(item)).collect::<Vec<_>>().join("|")
}

fn shape_regex(body: &str) -> Regex {
    // Optional subject token, then the shape-specific body.
    Regex::new(&format!(r"^(?:({AGENT_TOKEN})\s+)?{body}$")).unwrap()
}

static RE_BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(Skip|Over)$").unwrap());

static RE_AGREEMENT: LazyLock<Regex> = LazyLock::new(|| {
    shape_regex(r"(AGREE|DISAGREE)\s+(TALK|WHISPER)\s+day(-?\d+)\s+ID:(-?\d+)")
});

static RE_DISCLOSURE: LazyLock<Regex> = LazyLock::new(|| {
    let roles = alternation(&Role::ALL, Role::keyword);
    shape_regex(&format!(r"(ESTIMATE|COMINGOUT)\s+({AGENT_TOKEN})\s+({roles})"))
});

static RE_REPORT: LazyLock<Regex> = LazyLock::new(|| {
    let species = alternation(&Species::ALL, Species::keyword);
    shape_regex(&format!(r"(DIVINED|IDENTIFIED)\s+({AGENT_TOKEN})\s+({species})"))
});

static RE_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    shape_regex(&format!(
        r"(ATTACKED|ATTACK|DIVINATION|GUARDED|GUARD|VOTED|VOTE)\s+({AGENT_TOKEN})"
    ))
});

static RE_ADDRESSED: LazyLock<Regex> = LazyLock::new(|| {
    shape_regex(&format!(r"(REQUEST|INQUIRE)\s+({AGENT_TOKEN})\s+(\(.*\))"))
});

static RE_CONNECTIVE: LazyLock<Regex> =
    LazyLock::new(|| shape_regex(r"(BECAUSE|AND|OR|XOR|NOT|REQUEST)\s+(\(.*\))"));

static RE_DATED: LazyLock<Regex> = LazyLock::new(|| shape_regex(r"DAY\s+(\d+)\s+(\(.*\))"));

impl ShapeKind {
    fn pattern(self) -> &'static Regex {
        match self {
            ShapeKind::Bare => &RE_BARE,
            ShapeKind::Agreement => &RE_AGREEMENT,
            ShapeKind::Disclosure => &RE_DISCLOSURE,
            ShapeKind::Report => &RE_REPORT,
            ShapeKind::Action => &RE_ACTION,
            ShapeKind::Addressed => &RE_ADDRESSED,
            ShapeKind::Connective => &RE_CONNECTIVE,
            ShapeKind::Dated => &RE_DATED,
        }
    }

    /// Whether this matcher alone would claim `text` (already trimmed).
    pub fn matches(self, text: &str) -> bool {
        self.pattern().is_match(text)
    }
}

/// The first shape in [`SHAPE_ORDER`] whose matcher claims `text`.
///
/// Recognition is purely textual: a line can be recognized and still fail
/// to parse, e.g. when a clause list is unbalanced.
pub fn recognize(text: &str) -> Option<ShapeKind> {
    let text = text.trim();
    SHAPE_ORDER.into_iter().find(|kind| kind.matches(text))
}

/// Context available during parsing.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// Registry that the concrete agents of each successfully parsed line
    /// are interned into.
    pub registry: Option<&'a AgentRegistry>,
    /// Deepest parenthesized nesting accepted.
    pub max_depth: usize,
}

impl Default for ParseContext<'_> {
    fn default() -> Self {
        Self {
            registry: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'a> ParseContext<'a> {
    /// Default limits, interning agents into `registry`.
    pub fn with_registry(registry: &'a AgentRegistry) -> Self {
        Self {
            registry: Some(registry),
            ..Self::default()
        }
    }

    pub fn from_config(config: &GrammarConfig, registry: Option<&'a AgentRegistry>) -> Self {
        Self {
            registry,
            max_depth: config.max_depth,
        }
    }
}

/// Parse `text` leniently with default limits and no registry.
pub fn parse(text: &str) -> Content {
    parse_with(text, &ParseContext::default())
}

/// Parse `text` leniently. Never fails: unrecognized input yields `Skip`.
///
/// Only agents that survive into the returned tree reach the registry; a
/// clause or line that degrades to `Skip` registers nothing.
pub fn parse_with(text: &str, ctx: &ParseContext<'_>) -> Content {
    let parser = Parser { ctx, lenient: true };
    match parser.parse(text, 0) {
        Ok(content) => register(ctx, content),
        Err(err) => {
            tracing::debug!(input = text, error = %err, "utterance degraded to Skip");
            Content::skip()
        }
    }
}

/// Parse `text` strictly, reporting why recognition failed.
///
/// The registry is left untouched on error.
pub fn try_parse(text: &str, ctx: &ParseContext<'_>) -> GrammarResult<Content> {
    let content = Parser { ctx, lenient: false }.parse(text, 0)?;
    Ok(register(ctx, content))
}

fn register(ctx: &ParseContext<'_>, content: Content) -> Content {
    if let Some(registry) = ctx.registry {
        for agent in content.agents() {
            registry.intern(agent);
        }
    }
    content
}

/// Canonical text of `parse(text)`.
pub fn normalize(text: &str) -> String {
    parse(text).text().to_string()
}

struct Parser<'c, 'a> {
    ctx: &'c ParseContext<'a>,
    lenient: bool,
}

impl Parser<'_, '_> {
    fn parse(&self, text: &str, depth: usize) -> GrammarResult<Content> {
        if depth > self.ctx.max_depth {
            return Err(GrammarError::DepthExceeded {
                max_depth: self.ctx.max_depth,
            });
        }
        let text = text.trim();
        for kind in SHAPE_ORDER {
            if let Some(caps) = kind.pattern().captures(text) {
                return self.build(kind, &caps, text, depth);
            }
        }
        Err(GrammarError::ParseFailed {
            input: text.to_string(),
        })
    }

    /// Parse one nested clause; in lenient mode a failure becomes `Skip`.
    fn clause(&self, text: &str, depth: usize) -> GrammarResult<Content> {
        match self.parse(text, depth) {
            Ok(content) => Ok(content),
            Err(err) if self.lenient => {
                tracing::debug!(clause = text, error = %err, "clause degraded to Skip");
                Ok(Content::skip())
            }
            Err(err) => Err(err),
        }
    }

    fn clauses(&self, list: &str, depth: usize) -> GrammarResult<Vec<Content>> {
        let groups = lexer::split_groups(list).ok_or_else(|| GrammarError::UnbalancedGroups {
            input: list.to_string(),
        })?;
        groups
            .into_iter()
            .map(|group| self.clause(group, depth + 1))
            .collect()
    }

    fn agent(&self, token: Option<regex::Match<'_>>) -> GrammarResult<Agent> {
        lexer::resolve_agent(token.map_or("", |m| m.as_str()))
    }

    fn build(
        &self,
        kind: ShapeKind,
        caps: &Captures<'_>,
        text: &str,
        depth: usize,
    ) -> GrammarResult<Content> {
        // The bare matcher has no subject group.
        let subject = match kind {
            ShapeKind::Bare => Agent::NONE,
            _ => self.agent(caps.get(1))?,
        };
        match kind {
            ShapeKind::Bare => Ok(match &caps[1] {
                "Over" => Content::over(),
                _ => Content::skip(),
            }),
            ShapeKind::Agreement => {
                let reference = UtteranceRef {
                    kind: keyword::<UtteranceKind>(&caps[3], text)?,
                    day: number(&caps[4], text)?,
                    idx: number(&caps[5], text)?,
                };
                Ok(match keyword::<Topic>(&caps[2], text)? {
                    Topic::Disagree => builder::disagree(subject, reference),
                    _ => builder::agree(subject, reference),
                })
            }
            ShapeKind::Disclosure => {
                let target = self.agent(caps.get(3))?;
                let role = keyword::<Role>(&caps[4], text)?;
                Ok(match keyword::<Topic>(&caps[2], text)? {
                    Topic::ComingOut => builder::coming_out(subject, target, role),
                    _ => builder::estimate(subject, target, role),
                })
            }
            ShapeKind::Report => {
                let target = self.agent(caps.get(3))?;
                let species = keyword::<Species>(&caps[4], text)?;
                Ok(match keyword::<Topic>(&caps[2], text)? {
                    Topic::Identified => builder::identified(subject, target, species),
                    _ => builder::divined(subject, target, species),
                })
            }
            ShapeKind::Action => {
                let topic = keyword::<Topic>(&caps[2], text)?;
                let target = self.agent(caps.get(3))?;
                let shape = builder::action_shape(topic, target).ok_or_else(|| failed(text))?;
                Content::new(subject, shape)
            }
            ShapeKind::Addressed => {
                let operator = keyword::<Operator>(&caps[2], text)?;
                let target = self.agent(caps.get(3))?;
                let clauses = self.clauses(&caps[4], depth)?;
                builder::compose(subject, operator, target, 0, clauses)
            }
            ShapeKind::Connective => {
                let operator = keyword::<Operator>(&caps[2], text)?;
                let clauses = self.clauses(&caps[3], depth)?;
                // A REQUEST without a target token addresses whoever the
                // clause names as its subject.
                let target = match (operator, clauses.first()) {
                    (Operator::Request, Some(first)) if !first.subject().is_none() => {
                        first.subject()
                    }
                    _ => Agent::ANY,
                };
                builder::compose(subject, operator, target, 0, clauses)
            }
            ShapeKind::Dated => {
                let day = number(&caps[2], text)?;
                let clauses = self.clauses(&caps[3], depth)?;
                builder::compose(subject, Operator::Day, Agent::ANY, day, clauses)
            }
        }
    }
}

fn failed(text: &str) -> GrammarError {
    GrammarError::ParseFailed {
        input: text.to_string(),
    }
}

fn keyword<T: FromStr>(token: &str, text: &str) -> GrammarResult<T> {
    token.parse().map_err(|_| failed(text))
}

fn number<T: FromStr>(digits: &str, text: &str) -> GrammarResult<T> {
    digits.parse().map_err(|_| failed(text))
}
