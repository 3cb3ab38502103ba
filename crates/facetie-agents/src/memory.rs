//! Short-term and long-term memory.
//!
//! Short-term memory is a bounded FIFO log of timestamped events; the
//! oldest entry is evicted once the configured capacity (10 by default) is
//! exceeded. Events of an important kind (`rescue`, `attack`,
//! `found_location`) are also upserted into long-term memory under their
//! own key, or their kind name when they have none. Long-term entries are
//! never evicted.
//!
//! ## Recency boost
//!
//! [`MindStore::recency_boost`] scans short-term memory newest to oldest
//! for the first event whose JSON form contains the option name and
//! returns `1.0 + max(0, 0.5 * (1 - age / window))`. Only that first match
//! counts. Without a match the boost is exactly `1.0`.

use chrono::{DateTime, Utc};
use tracing::debug;

use facetie_types::{AgentId, MemoryEntry, MemoryEvent};

use crate::config::MindConfig;
use crate::state::{AgentState, push_bounded};
use crate::store::MindStore;

impl MindStore {
    /// Record an event for `id`, stamped with the store clock.
    pub fn remember(&mut self, id: impl Into<AgentId>, event: MemoryEvent) {
        let timestamp = self.now();
        let capacity = self.config().short_term_capacity;
        let id = id.into();
        debug!(agent = %id, kind = %event.kind(), "remember");

        let state = self.ensure(id);
        if let Some(key) = event.long_term_key() {
            state.long_term.insert(key, event.clone());
        }
        push_bounded(&mut state.short_term, MemoryEntry { timestamp, event }, capacity);
    }

    /// Short-term entries matching `predicate`, oldest first.
    pub fn recent(
        &mut self,
        id: impl Into<AgentId>,
        predicate: impl Fn(&MemoryEntry) -> bool,
    ) -> Vec<MemoryEntry> {
        self.ensure(id)
            .short_term
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect()
    }

    /// Long-term memory lookup. Does not create the agent.
    pub fn long_term(&self, id: &str, key: &str) -> Option<&MemoryEvent> {
        self.get(id)?.long_term.get(key)
    }

    /// Recency multiplier (`>= 1.0`) for `option` given the agent's memory.
    pub fn recency_boost(&mut self, id: impl Into<AgentId>, option: &str) -> f64 {
        let now = self.now();
        let (state, config) = self.ensure_with_config(id);
        recency_boost_of(state, option, now, config)
    }
}

/// Recency multiplier for one option against one agent's short-term memory.
pub(crate) fn recency_boost_of(
    state: &AgentState,
    option: &str,
    now: DateTime<Utc>,
    config: &MindConfig,
) -> f64 {
    let matched = state.short_term.iter().rev().find(|entry| {
        serde_json::to_string(&entry.event).is_ok_and(|json| json.contains(option))
    });

    let Some(entry) = matched else {
        return 1.0;
    };

    let age_ms = now
        .signed_duration_since(entry.timestamp)
        .num_milliseconds()
        .max(0);
    let age = u32::try_from(age_ms).map_or(f64::from(u32::MAX), f64::from);
    let window = f64::from(config.recency_window_ms);

    let contribution = config.recency_max_boost * (1.0 - age / window);
    1.0 + contribution.max(0.0)
}
