// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # wolf-talk
//!
//! The utterance language spoken by agents in a Werewolf game: a closed
//! vocabulary of statements (VOTE, ESTIMATE, DIVINED, ...) composed with
//! connectives (REQUEST, BECAUSE, AND, DAY, ...), parsed from and rendered
//! to one canonical text form.
//!
//! ## Architecture
//!
//! - **Agents** (`agent`, `registry`): `Agent` index tokens and the session intern table
//! - **Grammar** (`grammar`): vocabulary, parser, builders, subject completion, normalizer
//! - **Records** (`record`): talk/whisper lines, votes, and judgements
//! - **Config** (`config`): parser limits loaded from TOML
//!
//! ## Library usage
//!
//! ```
//! use wolf_talk::{parse, Agent, Topic};
//!
//! let content = parse("Agent[01] BECAUSE (Agent[01] ESTIMATE Agent[03] WEREWOLF) (VOTE Agent[03])");
//! assert_eq!(content.children()[1].topic(), Topic::Vote);
//! assert_eq!(content.children()[1].subject(), Agent::from_index(1).unwrap());
//! assert_eq!(
//!     content.text(),
//!     "Agent[01] BECAUSE (ESTIMATE Agent[03] WEREWOLF) (VOTE Agent[03])"
//! );
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod grammar;
pub mod record;
pub mod registry;

pub use agent::Agent;
pub use config::GrammarConfig;
pub use error::{WolfError, WolfResult};
pub use grammar::{
    Content, Operator, ParseContext, Role, Species, Topic, UtteranceKind, UtteranceRef, builder,
    normalize, parse, parse_with, try_parse,
};
pub use record::{Judge, Talk, Utterance, Vote};
pub use registry::{AgentMeta, AgentRegistry};
