//! Rich diagnostic error types for the content grammar.
//!
//! Every variant carries `#[diagnostic(code(...), help(...))]`. Parsing
//! untrusted text only surfaces these through the strict entry points;
//! the lenient parser degrades to `Skip` instead.

use miette::Diagnostic;
use thiserror::Error;

use super::vocab::Operator;

/// Errors produced by the content grammar.
#[derive(Debug, Error, Diagnostic)]
pub enum GrammarError {
    #[error("no utterance shape matches: \"{input}\"")]
    #[diagnostic(
        code(wolf::grammar::parse_failed),
        help(
            "Utterances look like `Agent[01] VOTE Agent[02]`, \
             `ESTIMATE Agent[03] WEREWOLF`, `REQUEST ANY (GUARD Agent[04])`, \
             `AND (..) (..)`, `DAY 2 (..)`, `Skip` or `Over`. \
             Keywords are upper case and agents are written `Agent[NN]` or `ANY`."
        )
    )]
    ParseFailed { input: String },

    #[error("{operator} takes {expected} operand(s), got {actual}")]
    #[diagnostic(
        code(wolf::grammar::arity),
        help(
            "REQUEST, INQUIRE, NOT and DAY wrap exactly one parenthesized \
             clause; BECAUSE and XOR take exactly two; AND and OR take one or more."
        )
    )]
    ArityMismatch {
        operator: Operator,
        expected: String,
        actual: usize,
    },

    #[error("{operator} needs at least one operand")]
    #[diagnostic(
        code(wolf::grammar::empty_operands),
        help("Pass one or more clauses to AND/OR.")
    )]
    EmptyOperands { operator: Operator },

    #[error("nesting deeper than {max_depth} levels")]
    #[diagnostic(
        code(wolf::grammar::too_deep),
        help(
            "Utterances nest at most a handful of parenthesized levels. \
             Raise `max_depth` in the grammar config if deeper nesting is legitimate."
        )
    )]
    DepthExceeded { max_depth: usize },

    #[error("invalid agent reference: \"{token}\"")]
    #[diagnostic(
        code(wolf::grammar::invalid_agent),
        help("Agent indices must fit below the reserved ANY index (2147483647).")
    )]
    InvalidAgent { token: String },

    #[error("unbalanced or malformed clause list: \"{input}\"")]
    #[diagnostic(
        code(wolf::grammar::unbalanced),
        help(
            "Clauses are written as parenthesized groups separated by spaces, \
             e.g. `(VOTE Agent[01]) (VOTE Agent[02])`. Check that every `(` has a matching `)`."
        )
    )]
    UnbalancedGroups { input: String },
}

/// Result type for grammar operations.
pub type GrammarResult<T> = std::result::Result<T, GrammarError>;
