//! Lexical helpers shared by the parser and normalizer.
//!
//! - agent-reference tokens (`Agent[NN]`, `ANY`)
//! - splitting a clause list into its top-level parenthesized groups
//! - stripping a leading subject token from canonical text

use std::sync::LazyLock;

use regex::Regex;

use crate::agent::Agent;

use super::error::{GrammarError, GrammarResult};

/// Pattern fragment for one agent reference or the wildcard.
pub(crate) const AGENT_TOKEN: &str = r"Agent\[\d+\]|ANY";

static RE_STRIP_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Agent\[\d+\]|ANY)?\s*(\p{Lu}+.*)$").unwrap());

/// Remove the leading subject token from an utterance text.
///
/// Returns the input unchanged when it does not start with an agent
/// reference or `ANY` followed by an upper-case keyword.
pub fn strip_subject(text: &str) -> &str {
    RE_STRIP_SUBJECT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str())
}

/// Resolve an agent token.
///
/// An empty token is an omitted subject and resolves to [`Agent::NONE`].
pub(crate) fn resolve_agent(token: &str) -> GrammarResult<Agent> {
    if token.is_empty() {
        return Ok(Agent::NONE);
    }
    token.parse().map_err(|_| GrammarError::InvalidAgent {
        token: token.to_string(),
    })
}

/// Split `(a) (b (c)) (d)` into `["a", "b (c)", "d"]`.
///
/// Only whitespace may separate the groups, and parentheses must balance.
/// Returns `None` for malformed input or when there is no group at all.
pub fn split_groups(input: &str) -> Option<Vec<&str>> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut open = 0usize;

    for (i, ch) in input.char_indices() {
        match ch {
            '(' => {
                if depth == 0 {
                    open = i + 1;
                }
                depth += 1;
            }
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    groups.push(&input[open..i]);
                }
            }
            c if depth == 0 && !c.is_whitespace() => return None,
            _ => {}
        }
    }

    (depth == 0 && !groups.is_empty()).then_some(groups)
}
