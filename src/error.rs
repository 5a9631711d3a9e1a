//! Rich diagnostic error types for wolf-talk.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

pub use crate::grammar::error::{GrammarError, GrammarResult};

/// Top-level error type for wolf-talk.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum WolfError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Agent errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum AgentError {
    #[error("agent index {index} is out of range (maximum is {max})")]
    #[diagnostic(
        code(wolf::agent::out_of_range),
        help(
            "Agent indices run from 0 (NONE) up to the reserved ANY index. \
             Use `Agent::ANY` for the wildcard instead of a raw index."
        )
    )]
    IndexOutOfRange { index: u64, max: u32 },

    #[error("invalid agent reference: \"{label}\"")]
    #[diagnostic(
        code(wolf::agent::invalid_label),
        help("Agent references are written `Agent[<digits>]`, `ANY`, or `NONE`.")
    )]
    InvalidLabel { label: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(
        code(wolf::config::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(wolf::config::parse),
        help(
            "The grammar config is TOML with two optional keys: \
             `max_depth` (integer) and `strict` (boolean)."
        )
    )]
    Parse { path: String, message: String },

    #[error("invalid config value: {message}")]
    #[diagnostic(
        code(wolf::config::invalid),
        help("`max_depth` must be at least 1.")
    )]
    Invalid { message: String },
}

/// Convenience result type for the top level.
pub type WolfResult<T> = std::result::Result<T, WolfError>;

/// Result type for agent registry operations.
pub type AgentResult<T> = std::result::Result<T, AgentError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
