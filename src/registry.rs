//! Agent registry: the session-owned intern table for participants.
//!
//! The [`AgentRegistry`] maps raw indices to their canonical [`Agent`] and
//! records when each participant was first mentioned. Creation goes through
//! `DashMap::entry`, so concurrent `get_or_create` calls for the same index
//! are idempotent: the first writer wins and every later caller observes
//! the same entry.

use dashmap::DashMap;

use crate::agent::Agent;
use crate::error::{AgentError, AgentResult};

/// Bookkeeping for one interned agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentMeta {
    pub agent: Agent,
    /// Canonical reference text, e.g. `Agent[03]`.
    pub label: String,
    /// When the agent was first interned (seconds since UNIX epoch).
    pub first_seen: u64,
}

impl AgentMeta {
    fn new(agent: Agent) -> Self {
        Self {
            agent,
            label: agent.to_string(),
            first_seen: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }
}

/// Get-or-create table of agents keyed by index.
pub struct AgentRegistry {
    by_index: DashMap<u32, AgentMeta>,
}

impl AgentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_index: DashMap::new(),
        }
    }

    /// Return the canonical agent for `index`, interning it on first use.
    pub fn get_or_create(&self, index: u32) -> AgentResult<Agent> {
        let agent = Agent::from_index(index).ok_or(AgentError::IndexOutOfRange {
            index: u64::from(index),
            max: Agent::ANY_INDEX,
        })?;
        Ok(self.intern(agent))
    }

    /// Intern an already-constructed agent, returning the canonical entry.
    pub fn intern(&self, agent: Agent) -> Agent {
        self.by_index
            .entry(agent.index())
            .or_insert_with(|| {
                tracing::trace!(agent = %agent, "interned agent");
                AgentMeta::new(agent)
            })
            .agent
    }

    /// Look up an interned agent by index.
    pub fn get(&self, index: u32) -> Option<AgentMeta> {
        self.by_index.get(&index).map(|r| r.value().clone())
    }

    /// Look up an interned agent by its reference text (`Agent[03]`, `ANY`).
    pub fn lookup(&self, label: &str) -> AgentResult<Option<Agent>> {
        let agent: Agent = label.trim().parse()?;
        Ok(self.by_index.get(&agent.index()).map(|r| r.agent))
    }

    /// All interned agents, ordered by index.
    pub fn all(&self) -> Vec<AgentMeta> {
        let mut all: Vec<AgentMeta> = self.by_index.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|m| m.agent);
        all
    }

    /// Number of interned agents.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("count", &self.len())
            .finish()
    }
}
