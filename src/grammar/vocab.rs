//! The closed vocabulary: topics, operators, and their payload kinds.
//!
//! Nothing here is extensible at runtime. Each [`Topic`] declares which
//! optional fields its utterance shape uses, and each [`Operator`] declares
//! how many clauses it wraps and whether it carries a target or a day.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Atomic statement kind, or [`Topic::Operator`] for connective nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Topic {
    Estimate,
    ComingOut,
    Divination,
    Divined,
    Identified,
    Guard,
    Guarded,
    Vote,
    Voted,
    Attack,
    Attacked,
    Agree,
    Disagree,
    #[serde(rename = "Over")]
    Over,
    #[serde(rename = "Skip")]
    Skip,
    /// Not a statement kind: the node is a connective, see [`Operator`].
    Operator,
}

/// Which optional fields a topic's shape makes relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicFields {
    /// Bare keyword (`Skip`, `Over`).
    Bare,
    /// Reference to an earlier utterance (AGREE/DISAGREE).
    Utterance,
    /// Target agent plus a role (ESTIMATE/COMINGOUT).
    TargetRole,
    /// Target agent plus a species (DIVINED/IDENTIFIED).
    TargetSpecies,
    /// Target agent only (VOTE, GUARD, ...).
    Target,
    /// Connective: see [`Operator`].
    Operands,
}

impl Topic {
    pub const ALL: [Topic; 16] = [
        Topic::Estimate,
        Topic::ComingOut,
        Topic::Divination,
        Topic::Divined,
        Topic::Identified,
        Topic::Guard,
        Topic::Guarded,
        Topic::Vote,
        Topic::Voted,
        Topic::Attack,
        Topic::Attacked,
        Topic::Agree,
        Topic::Disagree,
        Topic::Over,
        Topic::Skip,
        Topic::Operator,
    ];

    /// The wire keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Topic::Estimate => "ESTIMATE",
            Topic::ComingOut => "COMINGOUT",
            Topic::Divination => "DIVINATION",
            Topic::Divined => "DIVINED",
            Topic::Identified => "IDENTIFIED",
            Topic::Guard => "GUARD",
            Topic::Guarded => "GUARDED",
            Topic::Vote => "VOTE",
            Topic::Voted => "VOTED",
            Topic::Attack => "ATTACK",
            Topic::Attacked => "ATTACKED",
            Topic::Agree => "AGREE",
            Topic::Disagree => "DISAGREE",
            Topic::Over => "Over",
            Topic::Skip => "Skip",
            Topic::Operator => "OPERATOR",
        }
    }

    pub fn fields(self) -> TopicFields {
        match self {
            Topic::Skip | Topic::Over => TopicFields::Bare,
            Topic::Agree | Topic::Disagree => TopicFields::Utterance,
            Topic::Estimate | Topic::ComingOut => TopicFields::TargetRole,
            Topic::Divined | Topic::Identified => TopicFields::TargetSpecies,
            Topic::Divination
            | Topic::Guard
            | Topic::Guarded
            | Topic::Vote
            | Topic::Voted
            | Topic::Attack
            | Topic::Attacked => TopicFields::Target,
            Topic::Operator => TopicFields::Operands,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Topic {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.keyword() == s)
            .ok_or_else(|| UnknownKeyword(s.to_string()))
    }
}

/// How many clauses an operator wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "{n} or more"),
        }
    }
}

/// Connective kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    Request,
    Inquire,
    Because,
    Day,
    Not,
    And,
    Or,
    Xor,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Request,
        Operator::Inquire,
        Operator::Because,
        Operator::Day,
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Xor,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Operator::Request => "REQUEST",
            Operator::Inquire => "INQUIRE",
            Operator::Because => "BECAUSE",
            Operator::Day => "DAY",
            Operator::Not => "NOT",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Request | Operator::Inquire | Operator::Not | Operator::Day => {
                Arity::Exactly(1)
            }
            Operator::Because | Operator::Xor => Arity::Exactly(2),
            Operator::And | Operator::Or => Arity::AtLeast(1),
        }
    }

    /// REQUEST/INQUIRE name an addressee, who also becomes the implied
    /// subject of the wrapped clause.
    pub fn carries_target(self) -> bool {
        matches!(self, Operator::Request | Operator::Inquire)
    }

    pub fn carries_day(self) -> bool {
        self == Operator::Day
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Operator {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|o| o.keyword() == s)
            .ok_or_else(|| UnknownKeyword(s.to_string()))
    }
}

/// Role asserted by ESTIMATE/COMINGOUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Bodyguard,
    Fox,
    Freemason,
    Medium,
    Possessed,
    Seer,
    Villager,
    Werewolf,
    Any,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::Bodyguard,
        Role::Fox,
        Role::Freemason,
        Role::Medium,
        Role::Possessed,
        Role::Seer,
        Role::Villager,
        Role::Werewolf,
        Role::Any,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Role::Bodyguard => "BODYGUARD",
            Role::Fox => "FOX",
            Role::Freemason => "FREEMASON",
            Role::Medium => "MEDIUM",
            Role::Possessed => "POSSESSED",
            Role::Seer => "SEER",
            Role::Villager => "VILLAGER",
            Role::Werewolf => "WEREWOLF",
            Role::Any => "ANY",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Role {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.keyword() == s)
            .ok_or_else(|| UnknownKeyword(s.to_string()))
    }
}

/// Species reported by DIVINED/IDENTIFIED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    Human,
    Werewolf,
    Any,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Human, Species::Werewolf, Species::Any];

    pub fn keyword(self) -> &'static str {
        match self {
            Species::Human => "HUMAN",
            Species::Werewolf => "WEREWOLF",
            Species::Any => "ANY",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Species {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|sp| sp.keyword() == s)
            .ok_or_else(|| UnknownKeyword(s.to_string()))
    }
}

/// Channel an utterance was made on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UtteranceKind {
    #[default]
    Talk,
    Whisper,
}

impl UtteranceKind {
    pub fn keyword(self) -> &'static str {
        match self {
            UtteranceKind::Talk => "TALK",
            UtteranceKind::Whisper => "WHISPER",
        }
    }
}

impl std::fmt::Display for UtteranceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for UtteranceKind {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TALK" => Ok(UtteranceKind::Talk),
            "WHISPER" => Ok(UtteranceKind::Whisper),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

/// Pointer to an earlier utterance, cited by AGREE/DISAGREE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceRef {
    pub kind: UtteranceKind,
    pub day: i32,
    pub idx: i32,
}

impl UtteranceRef {
    pub fn talk(day: i32, idx: i32) -> Self {
        Self {
            kind: UtteranceKind::Talk,
            day,
            idx,
        }
    }

    pub fn whisper(day: i32, idx: i32) -> Self {
        Self {
            kind: UtteranceKind::Whisper,
            day,
            idx,
        }
    }
}

impl std::fmt::Display for UtteranceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} day{} ID:{}", self.kind, self.day, self.idx)
    }
}

/// A token that is not part of the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown keyword: \"{0}\"")]
pub struct UnknownKeyword(pub String);
