//! Tunable parameters for the mind store.
//!
//! [`MindConfig`] bundles every constant the memory, social, and decision
//! subsystems use so that hosts (and tests) can override them. Defaults
//! reproduce the stock behavior: 10 short-term entries, 5 thoughts, a
//! five-minute recency window, and a `[0.9, 1.1]` jitter band.

use serde::Deserialize;

use facetie_types::{DEFAULT_TRUST, EmotionVector};

use crate::error::AgentError;

/// Configuration for a [`MindStore`](crate::MindStore).
///
/// Deserializes from the `mind` section of `facetie-config.yaml`; every
/// field is optional there.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MindConfig {
    /// Short-term memory capacity per agent (default: 10).
    pub short_term_capacity: usize,

    /// Thought history capacity per agent (default: 5).
    pub thought_capacity: usize,

    /// Window over which the recency boost decays to zero, in milliseconds
    /// (default: 300 000).
    pub recency_window_ms: u32,

    /// Boost added for a memory that is brand new (default: 0.5).
    pub recency_max_boost: f64,

    /// Lower bound of the random jitter multiplier (default: 0.9).
    pub jitter_min: f64,

    /// Upper bound of the random jitter multiplier (default: 1.1).
    pub jitter_max: f64,

    /// Minimum weight any option can have (default: 0.01).
    pub weight_floor: f64,

    /// Trust toward an agent on first contact (default: 50).
    pub default_trust: u8,

    /// Trust gained per cooperation (default: 5).
    pub cooperate_trust_delta: i32,

    /// Fear added to each agent that hears an alert (default: 10).
    pub alert_fear_delta: i32,

    /// Emotion vector of newly created agents.
    pub initial_emotions: EmotionVector,

    /// Log every decision's weights at `info` instead of `debug`.
    pub debug_decisions: bool,
}

impl Default for MindConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: 10,
            thought_capacity: 5,
            recency_window_ms: 300_000,
            recency_max_boost: 0.5,
            jitter_min: 0.9,
            jitter_max: 1.1,
            weight_floor: 0.01,
            default_trust: DEFAULT_TRUST,
            cooperate_trust_delta: 5,
            alert_fear_delta: 10,
            initial_emotions: EmotionVector::default(),
            debug_decisions: false,
        }
    }
}

impl MindConfig {
    /// Check that the values can drive the decision engine.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] when a capacity or the recency
    /// window is zero, the jitter band is empty or non-positive, or the
    /// weight floor is not a positive finite number.
    pub fn validate(&self) -> Result<(), AgentError> {
        let fail = |reason: &str| {
            Err(AgentError::InvalidConfig {
                reason: reason.to_owned(),
            })
        };
        if self.short_term_capacity == 0 {
            return fail("short_term_capacity must be at least 1");
        }
        if self.thought_capacity == 0 {
            return fail("thought_capacity must be at least 1");
        }
        if self.recency_window_ms == 0 {
            return fail("recency_window_ms must be at least 1");
        }
        if !self.recency_max_boost.is_finite() || self.recency_max_boost < 0.0 {
            return fail("recency_max_boost must be a non-negative number");
        }
        if !(self.jitter_min.is_finite() && self.jitter_max.is_finite()) {
            return fail("jitter bounds must be finite");
        }
        if self.jitter_min <= 0.0 || self.jitter_min > self.jitter_max {
            return fail("jitter bounds must satisfy 0 < jitter_min <= jitter_max");
        }
        if !self.weight_floor.is_finite() || self.weight_floor <= 0.0 {
            return fail("weight_floor must be a positive number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use facetie_types::Emotion;

    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = MindConfig::default();
        assert_eq!(cfg.short_term_capacity, 10);
        assert_eq!(cfg.thought_capacity, 5);
        assert_eq!(cfg.recency_window_ms, 300_000);
        assert_eq!(cfg.default_trust, 50);
        assert_eq!(cfg.cooperate_trust_delta, 5);
        assert_eq!(cfg.alert_fear_delta, 10);
        assert_eq!(cfg.initial_emotions.get(Emotion::Curiosity), 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: MindConfig =
            serde_json::from_str(r#"{"thought_capacity": 3}"#).unwrap_or_default();
        assert_eq!(cfg.thought_capacity, 3);
        assert_eq!(cfg.short_term_capacity, 10);
    }

    #[test]
    fn rejects_inverted_jitter() {
        let cfg = MindConfig {
            jitter_min: 1.2,
            jitter_max: 1.1,
            ..MindConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(AgentError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_zero_capacity() {
        let cfg = MindConfig {
            short_term_capacity: 0,
            ..MindConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_floor() {
        let cfg = MindConfig {
            weight_floor: 0.0,
            ..MindConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
