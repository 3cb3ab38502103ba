//! Selecting and formatting thoughts for an on-screen overlay.
//!
//! An observer sees the latest thought of every agent within
//! [`ThoughtUiConfig::range`] blocks. Each visible thought also gets a
//! level of detail: the index of the first LOD distance band that contains
//! it, so renderers can shrink or fade far-away bubbles.

use std::collections::BTreeMap;

use serde::Deserialize;

use facetie_agents::MindStore;
use facetie_types::AgentId;

/// Overlay visibility settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThoughtUiConfig {
    /// Maximum distance at which thoughts are shown (default: 64).
    pub range: f64,
    /// Ascending distance bands for level of detail (default: 32, 48, 64).
    pub lod_levels: Vec<f64>,
}

impl Default for ThoughtUiConfig {
    fn default() -> Self {
        Self {
            range: 64.0,
            lod_levels: vec![32.0, 48.0, 64.0],
        }
    }
}

impl ThoughtUiConfig {
    /// Detail level for a distance: the index of the first band that is at
    /// least `distance`, or `None` beyond the last band.
    pub fn lod_for(&self, distance: f64) -> Option<usize> {
        self.lod_levels.iter().position(|band| distance <= *band)
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Position {
    /// East-west.
    pub x: f64,
    /// Height.
    pub y: f64,
    /// North-south.
    pub z: f64,
}

impl Position {
    /// Straight-line distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// One thought as the overlay should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleThought {
    /// Whose thought.
    pub agent_id: AgentId,
    /// Latest thought, empty if the agent has not thought yet.
    pub thought: String,
    /// Distance from the observer.
    pub distance: f64,
    /// Level of detail, see [`ThoughtUiConfig::lod_for`].
    pub lod: Option<usize>,
}

impl VisibleThought {
    /// `"id: thought"`, the plain overlay line.
    pub fn render(&self) -> String {
        format!("{}: {}", self.agent_id, self.thought)
    }
}

/// Latest thoughts of every positioned agent within range of `observer`,
/// including the observer itself, in id order.
///
/// Returns nothing if the observer has no position. Agents without a mind
/// record show an empty thought.
pub fn nearby_thoughts(
    store: &MindStore,
    observer: &str,
    positions: &BTreeMap<AgentId, Position>,
    config: &ThoughtUiConfig,
) -> Vec<VisibleThought> {
    let Some(center) = positions.get(observer) else {
        return Vec::new();
    };

    positions
        .iter()
        .filter_map(|(id, position)| {
            let distance = center.distance(position);
            if distance > config.range {
                return None;
            }
            let thought = store
                .get(id.as_str())
                .and_then(|state| state.thought_history().back())
                .map(|entry| entry.thought.clone())
                .unwrap_or_default();
            Some(VisibleThought {
                agent_id: id.clone(),
                thought,
                distance,
                lod: config.lod_for(distance),
            })
        })
        .collect()
}
