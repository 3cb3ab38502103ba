//! Social links between agents.
//!
//! Each agent holds directed [`SocialLink`]s to the agents it knows, with a
//! trust score in `[0, 100]` (50 is neutral) and an optional leader flag.
//! Cooperation raises trust. Gossip spreads a memory event to nearby agents
//! and alerts spread fear. Hierarchy formation flags a leader.
//!
//! [`social_boost_of`] feeds average trust back into the decision engine:
//! options whose names contain `call`, `help`, `cooperate`, or `gossip`
//! are scaled by `1 + (avg_trust - 50) / 200`.

use facetie_types::{AgentId, Emotion, MemoryEvent, SocialLink, clamp_level};

use crate::state::AgentState;
use crate::store::MindStore;

/// Option-name fragments that mark socially coded behavior.
const SOCIAL_KEYWORDS: &[&str] = &["call", "help", "cooperate", "gossip"];

/// Trust level treated as neutral by the social boost.
const NEUTRAL_TRUST: f64 = 50.0;

impl MindStore {
    /// Record a cooperative interaction from `id` toward `target`.
    ///
    /// Creates the link at the default trust if needed, then raises trust by
    /// the configured delta (5), clamped to 100. Returns the new trust.
    pub fn cooperate(&mut self, id: impl Into<AgentId>, target: impl Into<AgentId>) -> u8 {
        let now = self.now();
        let (state, config) = self.ensure_with_config(id);
        let link = state
            .social_links
            .entry(target.into())
            .or_insert_with(|| SocialLink::with_trust(config.default_trust));
        link.trust = clamp_level(i32::from(link.trust).saturating_add(config.cooperate_trust_delta));
        link.last_interaction = Some(now);
        link.trust
    }

    /// Spread `message`: remembered as `gossip` by the speaker and as
    /// `gossip_heard` (with the speaker as source) by every listener.
    pub fn gossip<I, T>(&mut self, id: impl Into<AgentId>, message: &str, nearby: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<AgentId>,
    {
        let speaker = id.into();
        self.remember(
            speaker.clone(),
            MemoryEvent::Gossip {
                message: message.to_owned(),
            },
        );
        for listener in nearby {
            self.remember(
                listener,
                MemoryEvent::GossipHeard {
                    message: message.to_owned(),
                    from: speaker.clone(),
                },
            );
        }
    }

    /// Raise an alarm: remembered as `alert` by the speaker; every nearby
    /// agent gains fear (10 by default). Listeners' memories are untouched.
    pub fn alert<I, T>(&mut self, id: impl Into<AgentId>, message: &str, nearby: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<AgentId>,
    {
        let fear_delta = self.config().alert_fear_delta;
        self.remember(
            id,
            MemoryEvent::Alert {
                message: message.to_owned(),
            },
        );
        for listener in nearby {
            self.modify_emotion(listener, Emotion::Fear, fear_delta);
        }
    }

    /// Make `leader` the leader of every member. Trust values are untouched;
    /// missing links are created at the default trust.
    pub fn form_hierarchy<I, T>(&mut self, leader: impl Into<AgentId>, members: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<AgentId>,
    {
        let leader = leader.into();
        for member in members {
            let (state, config) = self.ensure_with_config(member);
            state
                .social_links
                .entry(leader.clone())
                .or_insert_with(|| SocialLink::with_trust(config.default_trust))
                .leader = true;
        }
    }

    /// Social multiplier for `option` (1.0 when the agent knows no one).
    pub fn social_boost(&mut self, id: impl Into<AgentId>, option: &str) -> f64 {
        social_boost_of(self.ensure(id), option)
    }

    /// Mean trust across the agent's links, if it has any.
    pub fn average_trust(&mut self, id: impl Into<AgentId>) -> Option<f64> {
        average_trust_of(self.ensure(id))
    }

    /// The first agent this agent follows as leader, in id order.
    pub fn leader_of(&self, id: &str) -> Option<&AgentId> {
        self.get(id)?
            .social_links
            .iter()
            .find(|(_, link)| link.leader)
            .map(|(target, _)| target)
    }
}

pub(crate) fn average_trust_of(state: &AgentState) -> Option<f64> {
    let count = u32::try_from(state.social_links.len()).ok()?;
    if count == 0 {
        return None;
    }
    let total: u32 = state
        .social_links
        .values()
        .map(|link| u32::from(link.trust))
        .sum();
    Some(f64::from(total) / f64::from(count))
}

pub(crate) fn social_boost_of(state: &AgentState, option: &str) -> f64 {
    let Some(avg_trust) = average_trust_of(state) else {
        return 1.0;
    };
    let lowered = option.to_lowercase();
    if SOCIAL_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        1.0 + (avg_trust - NEUTRAL_TRUST) / 200.0
    } else {
        1.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facetie_types::EventKind;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn cooperate_twice_adds_ten() {
        let mut store = MindStore::default();
        assert_eq!(store.cooperate("v1", "v2"), 55);
        assert_eq!(store.cooperate("v1", "v2"), 60);
        let link = store.get("v1").unwrap().social_links().get("v2").unwrap();
        assert_eq!(link.trust, 60);
        assert!(link.last_interaction.is_some());
    }

    #[test]
    fn cooperate_caps_at_one_hundred() {
        let mut store = MindStore::default();
        for _ in 0..20 {
            store.cooperate("v1", "v2");
        }
        assert_eq!(store.cooperate("v1", "v2"), 100);
    }

    #[test]
    fn cooperation_is_directed() {
        let mut store = MindStore::default();
        store.cooperate("v1", "v2");
        assert!(store.get("v2").is_none());
    }

    #[test]
    fn gossip_reaches_every_listener() {
        let mut store = MindStore::default();
        store.gossip("v1", "Help!", ["v2", "v3"]);

        let own = store.recent("v1", |e| e.event.kind() == EventKind::Gossip);
        assert_eq!(own.len(), 1);

        for listener in ["v2", "v3"] {
            let heard = store.recent(listener, |e| e.event.kind() == EventKind::GossipHeard);
            assert_eq!(heard.len(), 1);
            assert_eq!(
                heard.first().and_then(|e| e.event.source_agent()),
                Some(&AgentId::from("v1"))
            );
        }
    }

    #[test]
    fn alert_raises_fear_of_listeners_only() {
        let mut store = MindStore::default();
        store.alert("v1", "Creeper!", ["v2"]);
        store.alert("v1", "Creeper!", ["v2"]);

        assert_eq!(store.emotions("v1").get(Emotion::Fear), 0);
        assert_eq!(store.emotions("v2").get(Emotion::Fear), 20);
        assert_eq!(
            store
                .recent("v1", |e| e.event.kind() == EventKind::Alert)
                .len(),
            2
        );
        assert!(store.get("v2").unwrap().short_term().is_empty());
    }

    #[test]
    fn alerts_do_not_evict_listener_memories() {
        let mut store = MindStore::default();
        store.remember("v2", MemoryEvent::Fire);
        for _ in 0..10 {
            store.alert("v1", "Zombies!", ["v2"]);
        }
        let fires = store.recent("v2", |e| e.event.kind() == EventKind::Fire);
        assert_eq!(fires.len(), 1);
        assert_eq!(store.get("v2").unwrap().short_term().len(), 1);
        assert_eq!(store.emotions("v2").get(Emotion::Fear), 100);
    }

    #[test]
    fn alert_fear_is_clamped() {
        let mut store = MindStore::default();
        store.set_emotion("v2", Emotion::Fear, 95);
        store.alert("v1", "Fire!", ["v2"]);
        assert_eq!(store.emotions("v2").get(Emotion::Fear), 100);
    }

    #[test]
    fn hierarchy_flags_leader_without_touching_trust() {
        let mut store = MindStore::default();
        store.cooperate("w2", "alpha");
        store.form_hierarchy("alpha", ["w1", "w2"]);

        assert_eq!(store.leader_of("w1"), Some(&AgentId::from("alpha")));
        let w2 = store.get("w2").unwrap().social_links().get("alpha").unwrap();
        assert!(w2.leader);
        assert_eq!(w2.trust, 55);
        let w1 = store.get("w1").unwrap().social_links().get("alpha").unwrap();
        assert_eq!(w1.trust, 50);
        assert!(store.get("alpha").is_none());
    }

    #[test]
    fn social_boost_without_links_is_neutral() {
        let mut store = MindStore::default();
        assert!(approx(store.social_boost("v1", "call_iron_golems_for_help"), 1.0));
        assert_eq!(store.average_trust("v1"), None);
    }

    #[test]
    fn social_boost_tracks_average_trust() {
        let mut store = MindStore::default();
        for _ in 0..10 {
            store.cooperate("v1", "v2");
        }
        // v2 at 100, v3 at 55: average 77.5.
        store.cooperate("v1", "v3");
        assert!(approx(store.average_trust("v1").unwrap(), 77.5));
        assert!(approx(
            store.social_boost("v1", "call_iron_golems_for_help"),
            1.0 + 27.5 / 200.0
        ));
        assert!(approx(store.social_boost("v1", "GOSSIP"), 1.0 + 27.5 / 200.0));
        assert!(approx(store.social_boost("v1", "panic_and_flee"), 1.0));
    }

    #[test]
    fn low_trust_penalizes_social_options() {
        let mut store = MindStore::default();
        let mut snapshot = store.snapshot("v1").unwrap_or_default();
        snapshot.id = AgentId::from("v1");
        snapshot
            .social_links
            .insert(AgentId::from("v2"), SocialLink::with_trust(10));
        assert!(store.restore(snapshot));
        assert!(approx(store.social_boost("v1", "help_animals_escape"), 0.8));
    }
}
