//! The utterance grammar: text ⇄ [`Content`] trees.
//!
//! ## Architecture
//!
//! ```text
//! text ──→ parser ──→ builder ──→ Content::assemble ──→ Content
//!            │                        │
//!          lexer               complete (subjects)
//!     (agents, groups)         normalize (text)
//! ```
//!
//! Every [`Content`] is built through the same path whether it came from
//! the parser or from the [`builder`] API: fill default targets, complete
//! implicit subjects, render canonical text. Two contents are equal when
//! their canonical texts are.
//!
//! ## Usage
//!
//! ```rust
//! use wolf_talk::grammar::{builder, parse};
//! use wolf_talk::Agent;
//!
//! let parsed = parse("REQUEST Agent[02] (Agent[02] VOTE Agent[03])");
//! assert_eq!(parsed.text(), "REQUEST Agent[02] (VOTE Agent[03])");
//!
//! let a2 = Agent::from_index(2).unwrap();
//! let a3 = Agent::from_index(3).unwrap();
//! let built = builder::request(Agent::NONE, a2, builder::vote(Agent::NONE, a3));
//! assert_eq!(built, parsed);
//! ```

pub mod builder;
pub mod complete;
pub mod content;
pub mod error;
pub mod lexer;
mod normalize;
pub mod parser;
pub mod vocab;

pub use content::{Content, ContentView, Shape};
pub use error::{GrammarError, GrammarResult};
pub use lexer::{split_groups, strip_subject};
pub use parser::{
    ParseContext, SHAPE_ORDER, ShapeKind, normalize, parse, parse_with, recognize, try_parse,
};
pub use vocab::{
    Arity, Operator, Role, Species, Topic, TopicFields, UnknownKeyword, UtteranceKind,
    UtteranceRef,
};
