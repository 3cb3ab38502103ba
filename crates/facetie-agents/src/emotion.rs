//! Emotion reads and writes.
//!
//! Every write clamps to `[0, 100]` through [`EmotionVector`]. The typed
//! API takes an [`Emotion`]; the `_named` variants accept host strings and
//! silently ignore names that are not one of the seven emotions, returning
//! `None`. [`MindStore::try_modify_emotion`] is the strict alternative.

use tracing::debug;

use facetie_types::{AgentId, Emotion, EmotionVector};

use crate::error::AgentError;
use crate::store::MindStore;

impl MindStore {
    /// Add `delta` to one emotion. Returns the new value.
    pub fn modify_emotion(&mut self, id: impl Into<AgentId>, emotion: Emotion, delta: i32) -> u8 {
        self.ensure(id).emotions.apply_delta(emotion, delta)
    }

    /// Set one emotion to `value`. Returns the stored (clamped) value.
    pub fn set_emotion(&mut self, id: impl Into<AgentId>, emotion: Emotion, value: i32) -> u8 {
        self.ensure(id).emotions.set(emotion, value)
    }

    /// [`modify_emotion`](Self::modify_emotion) by name; unknown names are a no-op.
    pub fn modify_emotion_named(
        &mut self,
        id: impl Into<AgentId>,
        name: &str,
        delta: i32,
    ) -> Option<u8> {
        let state = self.ensure(id);
        let Some(emotion) = Emotion::from_name(name) else {
            debug!(emotion = name, "ignoring unknown emotion");
            return None;
        };
        Some(state.emotions.apply_delta(emotion, delta))
    }

    /// [`set_emotion`](Self::set_emotion) by name; unknown names are a no-op.
    pub fn set_emotion_named(
        &mut self,
        id: impl Into<AgentId>,
        name: &str,
        value: i32,
    ) -> Option<u8> {
        let state = self.ensure(id);
        let Some(emotion) = Emotion::from_name(name) else {
            debug!(emotion = name, "ignoring unknown emotion");
            return None;
        };
        Some(state.emotions.set(emotion, value))
    }

    /// Strict by-name modify.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownEmotion`] without touching state if
    /// `name` is not recognized.
    pub fn try_modify_emotion(
        &mut self,
        id: impl Into<AgentId>,
        name: &str,
        delta: i32,
    ) -> Result<u8, AgentError> {
        let emotion =
            Emotion::from_name(name).ok_or_else(|| AgentError::UnknownEmotion(name.to_owned()))?;
        Ok(self.modify_emotion(id, emotion, delta))
    }

    /// A copy of the agent's emotion vector.
    pub fn emotions(&mut self, id: impl Into<AgentId>) -> EmotionVector {
        *self.ensure(id).emotions()
    }

    /// The agent's strongest emotion.
    pub fn dominant_emotion(&mut self, id: impl Into<AgentId>) -> Emotion {
        self.ensure(id).emotions().dominant()
    }
}
