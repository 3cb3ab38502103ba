//! Thought selection for display.
//!
//! A thought pool is a list of [`ThoughtCandidate`]s. One candidate is
//! picked uniformly; sub-pools are resolved through the weighted decision
//! engine. The result is appended to the agent's bounded thought history.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use facetie_types::{AgentId, ThoughtEntry};

use crate::error::AgentError;
use crate::pool::DecisionPool;
use crate::state::push_bounded;
use crate::store::MindStore;

/// One entry of a thought pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThoughtCandidate {
    /// A fixed line of text.
    Literal(String),
    /// A nested pool resolved by [`MindStore::decide`].
    Pool(DecisionPool),
    /// A fixed line given as `{ text: ... }`.
    Text {
        /// The line.
        text: String,
    },
}

impl From<&str> for ThoughtCandidate {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_owned())
    }
}

impl From<DecisionPool> for ThoughtCandidate {
    fn from(pool: DecisionPool) -> Self {
        Self::Pool(pool)
    }
}

impl MindStore {
    /// Pick a thought for `id` and record it.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyThoughtPool`] if `candidates` is empty.
    /// The agent's state is untouched in that case.
    pub fn think(
        &mut self,
        id: impl Into<AgentId>,
        candidates: &[ThoughtCandidate],
        rng: &mut impl Rng,
    ) -> Result<String, AgentError> {
        if candidates.is_empty() {
            return Err(AgentError::EmptyThoughtPool);
        }
        let id = id.into();
        let index = rng.random_range(0..candidates.len());
        let thought = match candidates.get(index) {
            Some(ThoughtCandidate::Pool(pool)) => self.decide(id.clone(), pool, rng),
            Some(ThoughtCandidate::Literal(text) | ThoughtCandidate::Text { text }) => text.clone(),
            None => return Err(AgentError::EmptyThoughtPool),
        };

        let timestamp = self.now();
        let capacity = self.config().thought_capacity;
        debug!(agent = %id, %thought, "think");
        push_bounded(
            &mut self.ensure(id).thought_history,
            ThoughtEntry {
                timestamp,
                thought: thought.clone(),
            },
            capacity,
        );
        Ok(thought)
    }

    /// The agent's recent thoughts, oldest first.
    pub fn thoughts(&mut self, id: impl Into<AgentId>) -> Vec<ThoughtEntry> {
        self.ensure(id).thought_history.iter().cloned().collect()
    }
}
