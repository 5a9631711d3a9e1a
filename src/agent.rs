//! Agent references: the identity tokens for game participants.
//!
//! An [`Agent`] is a plain index, so two references to the same index are
//! the same agent by value. Index 0 is the [`Agent::NONE`] sentinel
//! ("unspecified") and the reserved maximum index is [`Agent::ANY`]
//! ("any participant"). Interning and participant bookkeeping live in
//! [`crate::registry::AgentRegistry`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, AgentResult};

/// Identity token for a participant, or one of the NONE/ANY sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Agent(u32);

impl Agent {
    /// Unspecified agent.
    pub const NONE: Agent = Agent(0);

    /// Wildcard: any participant.
    pub const ANY: Agent = Agent(Self::ANY_INDEX);

    /// Raw index reserved for [`Agent::ANY`].
    pub const ANY_INDEX: u32 = i32::MAX as u32;

    /// Create an agent from a raw index.
    ///
    /// Returns `None` if `index` lies beyond the reserved ANY index.
    pub fn from_index(index: u32) -> Option<Self> {
        (index <= Self::ANY_INDEX).then_some(Agent(index))
    }

    /// Fallible variant of [`Agent::from_index`] for wider integers.
    pub fn try_from_index(index: u64) -> AgentResult<Self> {
        u32::try_from(index)
            .ok()
            .and_then(Self::from_index)
            .ok_or(AgentError::IndexOutOfRange {
                index,
                max: Self::ANY_INDEX,
            })
    }

    /// Get the underlying index.
    pub fn index(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_any(self) -> bool {
        self == Self::ANY
    }

    /// Whether this is a real participant rather than a sentinel.
    pub fn is_concrete(self) -> bool {
        !self.is_none() && !self.is_any()
    }

    /// Parse the digits inside an `Agent[..]` token.
    pub(crate) fn from_digits(digits: &str) -> AgentResult<Self> {
        let index: u64 = digits.parse().map_err(|_| AgentError::InvalidLabel {
            label: format!("Agent[{digits}]"),
        })?;
        Self::try_from_index(index)
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::NONE => write!(f, "NONE"),
            Self::ANY => write!(f, "ANY"),
            Agent(index) => write!(f, "Agent[{index:02}]"),
        }
    }
}

impl FromStr for Agent {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANY" => Ok(Self::ANY),
            "NONE" => Ok(Self::NONE),
            _ => {
                let digits = s
                    .strip_prefix("Agent[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
                    .ok_or_else(|| AgentError::InvalidLabel { label: s.into() })?;
                Self::from_digits(digits)
            }
        }
    }
}
