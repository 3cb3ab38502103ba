//! Core data structs: emotions, memory events, social links, snapshots.
//!
//! These are the serializable shapes the mind store hands to persistence
//! layers and presentation hosts. The live, mutable record is owned by the
//! store in `facetie-agents`; everything here is plain data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Emotion, EventKind};
use crate::ids::AgentId;

// ---------------------------------------------------------------------------
// Emotions
// ---------------------------------------------------------------------------

/// Lowest value any emotion can hold.
pub const EMOTION_MIN: u8 = 0;

/// Highest value any emotion can hold.
pub const EMOTION_MAX: u8 = 100;

/// Clamp an arbitrary integer into `[EMOTION_MIN, EMOTION_MAX]`.
///
/// Used for every emotion and trust write.
pub fn clamp_level(value: i32) -> u8 {
    let clamped = value.clamp(i32::from(EMOTION_MIN), i32::from(EMOTION_MAX));
    u8::try_from(clamped).unwrap_or(EMOTION_MAX)
}

/// The seven emotion scalars of one agent.
///
/// Fields are private so that every write goes through [`set`](Self::set)
/// or [`apply_delta`](Self::apply_delta), both of which clamp to `[0, 100]`.
/// Deserialized vectors may hold out-of-range values until passed through
/// [`clamped`](Self::clamped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct EmotionVector {
    fear: u8,
    curiosity: u8,
    anger: u8,
    sadness: u8,
    joy: u8,
    trust: u8,
    surprise: u8,
}

impl Default for EmotionVector {
    /// Starting disposition: mildly curious, neutral trust, nothing else.
    fn default() -> Self {
        Self {
            fear: 0,
            curiosity: 10,
            anger: 0,
            sadness: 0,
            joy: 0,
            trust: 50,
            surprise: 0,
        }
    }
}

impl EmotionVector {
    /// A vector with every emotion at zero.
    pub const fn zeroed() -> Self {
        Self {
            fear: 0,
            curiosity: 0,
            anger: 0,
            sadness: 0,
            joy: 0,
            trust: 0,
            surprise: 0,
        }
    }

    /// Read one emotion.
    pub const fn get(&self, emotion: Emotion) -> u8 {
        match emotion {
            Emotion::Fear => self.fear,
            Emotion::Curiosity => self.curiosity,
            Emotion::Anger => self.anger,
            Emotion::Sadness => self.sadness,
            Emotion::Joy => self.joy,
            Emotion::Trust => self.trust,
            Emotion::Surprise => self.surprise,
        }
    }

    const fn slot(&mut self, emotion: Emotion) -> &mut u8 {
        match emotion {
            Emotion::Fear => &mut self.fear,
            Emotion::Curiosity => &mut self.curiosity,
            Emotion::Anger => &mut self.anger,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Joy => &mut self.joy,
            Emotion::Trust => &mut self.trust,
            Emotion::Surprise => &mut self.surprise,
        }
    }

    /// Assign an absolute value, clamped to `[0, 100]`. Returns the stored value.
    pub fn set(&mut self, emotion: Emotion, value: i32) -> u8 {
        let stored = clamp_level(value);
        *self.slot(emotion) = stored;
        stored
    }

    /// Add `delta` (which may be negative), clamped to `[0, 100]`.
    /// Returns the stored value.
    pub fn apply_delta(&mut self, emotion: Emotion, delta: i32) -> u8 {
        let current = i32::from(self.get(emotion));
        self.set(emotion, current.saturating_add(delta))
    }

    /// Sum of all seven values.
    pub fn sum(&self) -> u32 {
        Emotion::ALL
            .iter()
            .map(|&e| u32::from(self.get(e)))
            .sum()
    }

    /// Share of `emotion` in the total, with the total floored at 1.
    pub fn fraction(&self, emotion: Emotion) -> f64 {
        let total = self.sum().max(1);
        f64::from(self.get(emotion)) / f64::from(total)
    }

    /// The strongest emotion; ties resolve to the latest in declaration order.
    pub fn dominant(&self) -> Emotion {
        let mut best = Emotion::Fear;
        for emotion in Emotion::ALL {
            if self.get(emotion) >= self.get(best) {
                best = emotion;
            }
        }
        best
    }

    /// Iterate `(emotion, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u8)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    /// Copy with every value forced into range.
    pub fn clamped(mut self) -> Self {
        for emotion in Emotion::ALL {
            let value = i32::from(self.get(emotion));
            self.set(emotion, value);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Memory events
// ---------------------------------------------------------------------------

/// Something an agent perceived, did, or was told.
///
/// Serialized with an internal `kind` tag, e.g. `{"kind":"fire"}` or
/// `{"kind":"gossip_heard","message":"Help!","from":"v1"}`. The recency
/// boost of the decision engine searches this JSON form for option names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoryEvent {
    /// Fire observed nearby.
    Fire,
    /// An item was spotted.
    FoundItem {
        /// Item identifier, e.g. `gold_ingot`.
        item: String,
    },
    /// Someone dropped an item.
    DroppedItem {
        /// Item identifier, when known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item: Option<String>,
    },
    /// The agent was rescued.
    Rescue {
        /// Long-term memory key; the kind name is used when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// The rescuer.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        by: Option<AgentId>,
    },
    /// The agent was attacked.
    Attack {
        /// Long-term memory key; the kind name is used when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// The attacker.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        by: Option<AgentId>,
    },
    /// A notable location was discovered.
    FoundLocation {
        /// Long-term memory key; the kind name is used when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// Description or coordinates of the place.
        location: String,
    },
    /// The agent spread a rumor.
    Gossip {
        /// The rumor text.
        message: String,
    },
    /// The agent heard a rumor.
    GossipHeard {
        /// The rumor text.
        message: String,
        /// Who spread it.
        from: AgentId,
    },
    /// The agent raised an alarm.
    Alert {
        /// The alarm text.
        message: String,
    },
    /// The agent made a decision.
    Decision {
        /// Name of the pool the decision came from.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pool: Option<String>,
        /// The selected option.
        decision: String,
    },
    /// Any other host-supplied observation.
    Observation {
        /// Short observation label.
        label: String,
        /// Free-form payload.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<serde_json::Value>,
    },
}

impl MemoryEvent {
    /// The event's discriminant.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Fire => EventKind::Fire,
            Self::FoundItem { .. } => EventKind::FoundItem,
            Self::DroppedItem { .. } => EventKind::DroppedItem,
            Self::Rescue { .. } => EventKind::Rescue,
            Self::Attack { .. } => EventKind::Attack,
            Self::FoundLocation { .. } => EventKind::FoundLocation,
            Self::Gossip { .. } => EventKind::Gossip,
            Self::GossipHeard { .. } => EventKind::GossipHeard,
            Self::Alert { .. } => EventKind::Alert,
            Self::Decision { .. } => EventKind::Decision,
            Self::Observation { .. } => EventKind::Observation,
        }
    }

    /// Long-term memory key, or `None` if the event is not important.
    ///
    /// Important events use their explicit `key` when present, otherwise
    /// the kind's wire name.
    pub fn long_term_key(&self) -> Option<String> {
        let explicit = match self {
            Self::Rescue { key, .. } | Self::Attack { key, .. } | Self::FoundLocation { key, .. } => {
                key.as_deref()
            }
            _ => return None,
        };
        Some(explicit.unwrap_or(self.kind().as_str()).to_owned())
    }

    /// The originating agent of a relayed `gossip_heard` event.
    pub const fn source_agent(&self) -> Option<&AgentId> {
        match self {
            Self::GossipHeard { from, .. } => Some(from),
            _ => None,
        }
    }

    /// The item named by item events.
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::FoundItem { item } => Some(item),
            Self::DroppedItem { item } => item.as_deref(),
            _ => None,
        }
    }
}

/// One timestamped entry in short-term memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// When the event was remembered.
    pub timestamp: DateTime<Utc>,
    /// What was remembered.
    pub event: MemoryEvent,
}

// ---------------------------------------------------------------------------
// Social links and thoughts
// ---------------------------------------------------------------------------

/// Default trust toward an agent seen for the first time.
pub const DEFAULT_TRUST: u8 = 50;

/// A directed relationship from one agent to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Trust in `[0, 100]`; 50 is neutral.
    pub trust: u8,
    /// Whether the target leads this agent's current group.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub leader: bool,
    /// Last cooperative interaction, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl SocialLink {
    /// A fresh link at the given trust.
    pub const fn with_trust(trust: u8) -> Self {
        Self {
            trust,
            leader: false,
            last_interaction: None,
        }
    }
}

impl Default for SocialLink {
    fn default() -> Self {
        Self::with_trust(DEFAULT_TRUST)
    }
}

/// One entry of an agent's thought history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtEntry {
    /// When the thought was produced.
    pub timestamp: DateTime<Utc>,
    /// The display text.
    pub thought: String,
}

/// The current thought of an agent, shaped for a display transport.
///
/// The core only produces this value; broadcasting it is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ThoughtBroadcast {
    /// Whose thought this is.
    pub agent_id: AgentId,
    /// The display text.
    pub thought: String,
    /// When it was produced.
    pub at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Deep copy of one agent's mental state, for external persistence.
///
/// Every section defaults when absent so that partial records written by
/// older hosts still load. A record without an `id` deserializes with an
/// empty id and is rejected on restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The agent this state belongs to.
    #[serde(default)]
    pub id: AgentId,
    /// Short-term memory, oldest first.
    #[serde(default)]
    pub short_term: Vec<MemoryEntry>,
    /// Long-term memory by key.
    #[serde(default)]
    pub long_term: BTreeMap<String, MemoryEvent>,
    /// Emotion vector.
    #[serde(default)]
    pub emotions: EmotionVector,
    /// Outgoing social links by target.
    #[serde(default)]
    pub social_links: BTreeMap<AgentId, SocialLink>,
    /// Thought history, oldest first.
    #[serde(default)]
    pub thought_history: Vec<ThoughtEntry>,
}

/// Every agent in a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// One snapshot per agent, ordered by id.
    #[serde(default)]
    pub agents: Vec<AgentSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_emotions_match_starting_disposition() {
        let emotions = EmotionVector::default();
        assert_eq!(emotions.get(Emotion::Curiosity), 10);
        assert_eq!(emotions.get(Emotion::Trust), 50);
        assert_eq!(emotions.sum(), 60);
    }

    #[test]
    fn writes_are_clamped() {
        let mut emotions = EmotionVector::zeroed();
        assert_eq!(emotions.apply_delta(Emotion::Fear, 250), 100);
        assert_eq!(emotions.apply_delta(Emotion::Fear, -1_000), 0);
        assert_eq!(emotions.set(Emotion::Joy, i32::MAX), 100);
        assert_eq!(emotions.apply_delta(Emotion::Joy, i32::MAX), 100);
        assert_eq!(emotions.set(Emotion::Anger, -5), 0);
    }

    #[test]
    fn fraction_floors_total_at_one() {
        let emotions = EmotionVector::zeroed();
        assert!(emotions.fraction(Emotion::Fear).abs() < f64::EPSILON);
    }

    #[test]
    fn dominant_prefers_last_on_tie() {
        let mut emotions = EmotionVector::zeroed();
        assert_eq!(emotions.dominant(), Emotion::Surprise);
        emotions.set(Emotion::Anger, 40);
        emotions.set(Emotion::Joy, 40);
        assert_eq!(emotions.dominant(), Emotion::Joy);
        emotions.set(Emotion::Curiosity, 41);
        assert_eq!(emotions.dominant(), Emotion::Curiosity);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let parsed: EmotionVector =
            serde_json::from_str(r#"{"fear":250,"joy":7}"#).unwrap_or_default();
        assert_eq!(parsed.get(Emotion::Fear), 250);
        let clamped = parsed.clamped();
        assert_eq!(clamped.get(Emotion::Fear), 100);
        assert_eq!(clamped.get(Emotion::Joy), 7);
        // Missing fields take the starting disposition.
        assert_eq!(clamped.get(Emotion::Trust), 50);
    }

    #[test]
    fn event_json_is_kind_tagged() {
        let event = MemoryEvent::GossipHeard {
            message: String::from("Help!"),
            from: AgentId::from("v1"),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert_eq!(json, r#"{"kind":"gossip_heard","message":"Help!","from":"v1"}"#);

        let fire = serde_json::to_string(&MemoryEvent::Fire).unwrap_or_default();
        assert_eq!(fire, r#"{"kind":"fire"}"#);
    }

    #[test]
    fn long_term_key_prefers_explicit_key() {
        let keyed = MemoryEvent::FoundLocation {
            key: Some(String::from("village_well")),
            location: String::from("12,64,-30"),
        };
        assert_eq!(keyed.long_term_key().as_deref(), Some("village_well"));

        let unkeyed = MemoryEvent::Attack { key: None, by: None };
        assert_eq!(unkeyed.long_term_key().as_deref(), Some("attack"));

        assert_eq!(MemoryEvent::Fire.long_term_key(), None);
    }

    #[test]
    fn snapshot_without_id_parses_empty() {
        let snapshot: AgentSnapshot =
            serde_json::from_str(r#"{"emotions":{"fear":3}}"#).unwrap_or_default();
        assert!(snapshot.id.is_empty());
        assert_eq!(snapshot.emotions.get(Emotion::Fear), 3);
    }
}
