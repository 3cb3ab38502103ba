//! Enumeration types for the FaceTie mind model.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Emotions
// ---------------------------------------------------------------------------

/// One of the seven emotion scalars every agent carries.
///
/// Declaration order is significant: it is the iteration order of
/// [`Emotion::ALL`], and the latest of several tied emotions is dominant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Emotion {
    /// Alarm at perceived danger.
    Fear,
    /// Drive to investigate the unfamiliar.
    Curiosity,
    /// Hostility toward a threat or rival.
    Anger,
    /// Grief or loss.
    Sadness,
    /// Contentment and play.
    Joy,
    /// General disposition to rely on others.
    Trust,
    /// Startle response to the unexpected.
    Surprise,
}

impl Emotion {
    /// Every emotion, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Fear,
        Self::Curiosity,
        Self::Anger,
        Self::Sadness,
        Self::Joy,
        Self::Trust,
        Self::Surprise,
    ];

    /// The lowercase wire name (`"fear"`, `"curiosity"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fear => "fear",
            Self::Curiosity => "curiosity",
            Self::Anger => "anger",
            Self::Sadness => "sadness",
            Self::Joy => "joy",
            Self::Trust => "trust",
            Self::Surprise => "surprise",
        }
    }

    /// Resolve a wire name. Matching is exact; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

impl core::fmt::Display for Emotion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Event kinds
// ---------------------------------------------------------------------------

/// The discriminant of a [`MemoryEvent`](crate::MemoryEvent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// Fire observed nearby.
    Fire,
    /// An item was spotted.
    FoundItem,
    /// Someone dropped an item.
    DroppedItem,
    /// The agent was rescued.
    Rescue,
    /// The agent was attacked.
    Attack,
    /// A notable location was discovered.
    FoundLocation,
    /// The agent spread a rumor.
    Gossip,
    /// The agent heard a rumor from someone else.
    GossipHeard,
    /// The agent raised an alarm.
    Alert,
    /// The agent made a decision.
    Decision,
    /// Any other host-supplied observation.
    Observation,
}

/// Event kinds that are also written to long-term memory.
pub const IMPORTANT_KINDS: [EventKind; 3] =
    [EventKind::Rescue, EventKind::Attack, EventKind::FoundLocation];

impl EventKind {
    /// The snake-case wire name, identical to the `kind` tag of the event.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::FoundItem => "found_item",
            Self::DroppedItem => "dropped_item",
            Self::Rescue => "rescue",
            Self::Attack => "attack",
            Self::FoundLocation => "found_location",
            Self::Gossip => "gossip",
            Self::GossipHeard => "gossip_heard",
            Self::Alert => "alert",
            Self::Decision => "decision",
            Self::Observation => "observation",
        }
    }

    /// Whether events of this kind are promoted to long-term memory.
    pub fn is_important(self) -> bool {
        IMPORTANT_KINDS.contains(&self)
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_names_round_trip() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_name(emotion.as_str()), Some(emotion));
        }
        assert_eq!(Emotion::from_name("boredom"), None);
        assert_eq!(Emotion::from_name("Fear"), None);
    }

    #[test]
    fn emotion_serde_matches_as_str() {
        let json = serde_json::to_string(&Emotion::Surprise).ok();
        assert_eq!(json.as_deref(), Some("\"surprise\""));
    }

    #[test]
    fn only_three_kinds_are_important() {
        assert!(EventKind::Rescue.is_important());
        assert!(EventKind::Attack.is_important());
        assert!(EventKind::FoundLocation.is_important());
        assert!(!EventKind::Fire.is_important());
        assert!(!EventKind::GossipHeard.is_important());
    }

    #[test]
    fn kind_serde_matches_as_str() {
        let json = serde_json::to_string(&EventKind::FoundLocation).ok();
        assert_eq!(json.as_deref(), Some("\"found_location\""));
    }
}
