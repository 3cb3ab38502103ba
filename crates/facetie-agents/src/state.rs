//! The live mental-state record of one agent.
//!
//! [`AgentState`] is owned by the [`MindStore`](crate::MindStore) and only
//! mutated through it, which is what keeps the capacity and clamp
//! invariants intact. Conversions to and from [`AgentSnapshot`] are the
//! persistence boundary.

use std::collections::{BTreeMap, VecDeque};

use facetie_types::{
    AgentId, AgentSnapshot, EmotionVector, MemoryEntry, MemoryEvent, SocialLink, ThoughtEntry,
    clamp_level,
};

use crate::config::MindConfig;

/// One agent's memory, emotions, social links, and thought history.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentState {
    /// Recent events, oldest first, at most `short_term_capacity` long.
    pub(crate) short_term: VecDeque<MemoryEntry>,
    /// Durable events by key. Never evicted.
    pub(crate) long_term: BTreeMap<String, MemoryEvent>,
    /// Emotion scalars, always in `[0, 100]`.
    pub(crate) emotions: EmotionVector,
    /// Outgoing relationships.
    pub(crate) social_links: BTreeMap<AgentId, SocialLink>,
    /// Recent thoughts, oldest first, at most `thought_capacity` long.
    pub(crate) thought_history: VecDeque<ThoughtEntry>,
}

impl AgentState {
    /// A fresh agent with the configured starting emotions.
    pub fn new(config: &MindConfig) -> Self {
        Self {
            short_term: VecDeque::with_capacity(config.short_term_capacity),
            long_term: BTreeMap::new(),
            emotions: config.initial_emotions.clamped(),
            social_links: BTreeMap::new(),
            thought_history: VecDeque::with_capacity(config.thought_capacity),
        }
    }

    /// Short-term memory, oldest first.
    pub const fn short_term(&self) -> &VecDeque<MemoryEntry> {
        &self.short_term
    }

    /// Long-term memory.
    pub const fn long_term(&self) -> &BTreeMap<String, MemoryEvent> {
        &self.long_term
    }

    /// Current emotions.
    pub const fn emotions(&self) -> &EmotionVector {
        &self.emotions
    }

    /// Outgoing social links.
    pub const fn social_links(&self) -> &BTreeMap<AgentId, SocialLink> {
        &self.social_links
    }

    /// Thought history, oldest first.
    pub const fn thought_history(&self) -> &VecDeque<ThoughtEntry> {
        &self.thought_history
    }

    /// Deep copy for persistence.
    pub fn to_snapshot(&self, id: &AgentId) -> AgentSnapshot {
        AgentSnapshot {
            id: id.clone(),
            short_term: self.short_term.iter().cloned().collect(),
            long_term: self.long_term.clone(),
            emotions: self.emotions,
            social_links: self.social_links.clone(),
            thought_history: self.thought_history.iter().cloned().collect(),
        }
    }

    /// Rebuild from a snapshot, re-applying every invariant.
    ///
    /// Over-long logs keep their newest entries; emotions and trust values
    /// are clamped.
    pub fn from_snapshot(snapshot: AgentSnapshot, config: &MindConfig) -> Self {
        let mut short_term = VecDeque::from(snapshot.short_term);
        truncate_oldest(&mut short_term, config.short_term_capacity);

        let mut thought_history = VecDeque::from(snapshot.thought_history);
        truncate_oldest(&mut thought_history, config.thought_capacity);

        let social_links = snapshot
            .social_links
            .into_iter()
            .map(|(target, mut link)| {
                link.trust = clamp_level(i32::from(link.trust));
                (target, link)
            })
            .collect();

        Self {
            short_term,
            long_term: snapshot.long_term,
            emotions: snapshot.emotions.clamped(),
            social_links,
            thought_history,
        }
    }
}

/// Append to a bounded log, evicting the oldest entries past `capacity`.
pub(crate) fn push_bounded<T>(log: &mut VecDeque<T>, item: T, capacity: usize) {
    log.push_back(item);
    truncate_oldest(log, capacity);
}

fn truncate_oldest<T>(log: &mut VecDeque<T>, capacity: usize) {
    while log.len() > capacity {
        log.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    #[test]
    fn push_bounded_drops_oldest() {
        let mut log = VecDeque::new();
        for i in 0..7 {
            push_bounded(&mut log, i, 5);
        }
        assert_eq!(log, VecDeque::from(vec![2, 3, 4, 5, 6]));
    }

    #[test]
    fn from_snapshot_trims_and_clamps() {
        let config = MindConfig::default();
        let at = DateTime::from_timestamp(0, 0).unwrap_or_default();
        let snapshot = AgentSnapshot {
            id: AgentId::from("v1"),
            thought_history: (0..8)
                .map(|i| ThoughtEntry {
                    timestamp: at,
                    thought: format!("thought {i}"),
                })
                .collect(),
            social_links: BTreeMap::from([(
                AgentId::from("v2"),
                SocialLink::with_trust(240),
            )]),
            ..AgentSnapshot::default()
        };

        let state = AgentState::from_snapshot(snapshot, &config);
        assert_eq!(state.thought_history().len(), 5);
        assert_eq!(
            state.thought_history().front().map(|t| t.thought.as_str()),
            Some("thought 3")
        );
        assert_eq!(state.social_links().get("v2").map(|l| l.trust), Some(100));
    }
}
