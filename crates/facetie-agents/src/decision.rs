//! Weighted stochastic decisions.
//!
//! [`MindStore::decide`] turns a [`DecisionPool`] into one option name. Each
//! option's weight is the product of:
//!
//! 1. its base weight (default 1),
//! 2. the pool's emotion terms ([`SelectionLogic::multiplier`](crate::SelectionLogic::multiplier)),
//! 3. the cross-influence `1 + 0.5 * curiosity% - 0.2 * fear% + 0.2 * anger%`,
//!    where each `%` is that emotion's share of the emotion total,
//! 4. the recency boost and the social boost,
//! 5. a uniform jitter in `[jitter_min, jitter_max]`,
//!
//! floored at `weight_floor` and capped so the pool total stays finite.
//! Selection is roulette-wheel over pool order;
//! the first option is the fallback if rounding leaves no winner.
//!
//! Randomness is injected so callers can seed it.

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use facetie_types::{AgentId, Emotion};

use crate::config::MindConfig;
use crate::memory::recency_boost_of;
use crate::pool::DecisionPool;
use crate::social::social_boost_of;
use crate::state::AgentState;
use crate::store::MindStore;

/// The computed weight of one option for one decision.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionWeight {
    /// Option name.
    pub option: String,
    /// Final weight, never below the configured floor and always finite.
    pub weight: f64,
}

impl MindStore {
    /// Pick one option of `pool` for agent `id`.
    ///
    /// The result is always a member of `pool.options()`; a single-option
    /// pool always yields that option.
    pub fn decide(
        &mut self,
        id: impl Into<AgentId>,
        pool: &DecisionPool,
        rng: &mut impl Rng,
    ) -> String {
        let id = id.into();
        let weights = self.weigh_options(id.clone(), pool, rng);
        let index = roulette(&weights, rng);

        // Pool invariant: options are never empty.
        let decision = weights
            .get(index)
            .or_else(|| weights.first())
            .map(|w| w.option.clone())
            .unwrap_or_default();

        if self.config().debug_decisions {
            info!(agent = %id, pool = pool.name(), ?weights, %decision, "decision");
        } else {
            debug!(agent = %id, pool = pool.name(), ?weights, %decision, "decision");
        }
        decision
    }

    /// Compute every option's weight without selecting, in pool order.
    ///
    /// Consumes one jitter draw per option from `rng`.
    pub fn weigh_options(
        &mut self,
        id: impl Into<AgentId>,
        pool: &DecisionPool,
        rng: &mut impl Rng,
    ) -> Vec<OptionWeight> {
        let now = self.now();
        let (state, config) = self.ensure_with_config(id);
        let context = WeighContext::new(state, pool, now, config);

        pool.options()
            .iter()
            .map(|option| OptionWeight {
                option: option.clone(),
                weight: context.weight(option, rng),
            })
            .collect()
    }
}

/// Per-decision values that are the same for every option.
struct WeighContext<'a> {
    state: &'a AgentState,
    pool: &'a DecisionPool,
    now: DateTime<Utc>,
    config: &'a MindConfig,
    emotion_multiplier: f64,
    ceiling: f64,
}

impl<'a> WeighContext<'a> {
    fn new(
        state: &'a AgentState,
        pool: &'a DecisionPool,
        now: DateTime<Utc>,
        config: &'a MindConfig,
    ) -> Self {
        let emotions = state.emotions();
        let terms = pool.logic().multiplier(emotions);
        let cross = 1.0 + 0.5 * emotions.fraction(Emotion::Curiosity)
            - 0.2 * emotions.fraction(Emotion::Fear)
            + 0.2 * emotions.fraction(Emotion::Anger);
        let count = u32::try_from(pool.options().len()).unwrap_or(u32::MAX).max(1);
        Self {
            state,
            pool,
            now,
            config,
            emotion_multiplier: terms * cross,
            ceiling: f64::MAX / f64::from(count),
        }
    }

    fn weight(&self, option: &str, rng: &mut impl Rng) -> f64 {
        let jitter = rng.random_range(self.config.jitter_min..=self.config.jitter_max);
        let weight = self.pool.base_weight(option)
            * self.emotion_multiplier
            * recency_boost_of(self.state, option, self.now, self.config)
            * social_boost_of(self.state, option)
            * jitter;
        // Summing `ceiling` over every option must not overflow.
        weight.min(self.ceiling).max(self.config.weight_floor)
    }
}

/// Roulette-wheel selection: index of the first option whose cumulative
/// weight exceeds a uniform draw in `[0, total)`. Falls back to 0.
fn roulette(weights: &[OptionWeight], rng: &mut impl Rng) -> usize {
    let total: f64 = weights.iter().map(|w| w.weight).sum();
    let draw = rng.random::<f64>() * total;

    let mut cumulative = 0.0;
    for (index, entry) in weights.iter().enumerate() {
        cumulative += entry.weight;
        if cumulative > draw {
            return index;
        }
    }
    0
}
