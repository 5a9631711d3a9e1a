//! Flat game records that carry or cite utterances.
//!
//! These are plain values. [`Utterance`] is the only one that touches the
//! grammar: its text parses into a [`Content`].

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::grammar::parser;
use crate::grammar::{Content, Shape, Species, UtteranceKind, UtteranceRef};

/// One line of talk or whisper, as logged by the game server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Utterance {
    /// Channel; not part of the wire record.
    #[serde(skip)]
    pub kind: UtteranceKind,
    pub idx: i32,
    pub day: i32,
    pub turn: i32,
    pub agent: Agent,
    pub text: String,
}

/// A talk-channel utterance.
pub type Talk = Utterance;

impl Utterance {
    pub fn talk(idx: i32, day: i32, turn: i32, agent: Agent, text: impl Into<String>) -> Self {
        Self {
            kind: UtteranceKind::Talk,
            idx,
            day,
            turn,
            agent,
            text: text.into(),
        }
    }

    pub fn whisper(idx: i32, day: i32, turn: i32, agent: Agent, text: impl Into<String>) -> Self {
        Self {
            kind: UtteranceKind::Whisper,
            ..Self::talk(idx, day, turn, agent, text)
        }
    }

    /// The text parsed leniently, exactly as [`parser::parse`] reads it.
    pub fn content(&self) -> Content {
        parser::parse(&self.text)
    }

    /// [`content`](Self::content) with the speaker filling in an omitted
    /// subject. `Skip` and `Over` stay unattributed.
    pub fn attributed_content(&self) -> Content {
        let content = self.content();
        match content.shape() {
            Shape::Skip | Shape::Over => content,
            _ if content.subject().is_none() => content.with_subject(self.agent),
            _ => content,
        }
    }

    /// How an AGREE/DISAGREE would cite this utterance.
    pub fn reference(&self) -> UtteranceRef {
        UtteranceRef {
            kind: self.kind,
            day: self.day,
            idx: self.idx,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.text == "Skip"
    }

    pub fn is_over(&self) -> bool {
        self.text == "Over"
    }
}

impl std::fmt::Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            UtteranceKind::Talk => "Talk",
            UtteranceKind::Whisper => "Whisper",
        };
        write!(
            f,
            "{label}: Day{:02} {:02}[{:03}]\t{}\t{}",
            self.day, self.turn, self.idx, self.agent, self.text
        )
    }
}

/// A cast vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vote {
    pub day: i32,
    pub agent: Agent,
    pub target: Agent,
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}voted{}@{}", self.agent, self.target, self.day)
    }
}

/// A divination or identification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Judge {
    pub day: i32,
    pub agent: Agent,
    pub target: Agent,
    pub result: Species,
}

impl std::fmt::Display for Judge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}@{}:{}", self.agent, self.target, self.day, self.result)
    }
}
