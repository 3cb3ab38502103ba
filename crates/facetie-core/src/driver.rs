//! The per-agent tick: think, react, report.
//!
//! Each tick the [`TickDriver`] picks a thought for the agent from its
//! mob's thought list, then runs every [`ReactionRule`] for that mob. A
//! rule fires when the agent's short-term memory holds an event matching
//! its trigger (or unconditionally when it has none). A firing rule asks
//! the decision engine for an option from its pool, remembers the decision,
//! and applies the emotion effects configured for that option.
//!
//! Mapping decisions to animations or sounds is left to the host; the
//! [`TickReport`] carries everything it needs.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};

use facetie_agents::{AgentError, MindStore};
use facetie_types::{AgentId, Emotion, EventKind, MemoryEntry, MemoryEvent, ThoughtBroadcast};

use crate::catalog::PoolCatalog;

/// Errors raised while building or running the tick driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A reaction rule names a pool the catalog does not hold.
    #[error("reaction rule for {mob} references unknown pool {pool}")]
    UnknownPool {
        /// The first mob type the rule applies to.
        mob: String,
        /// The missing pool name.
        pool: String,
    },

    /// A reaction rule applies to no mob type.
    #[error("reaction rule for pool {pool} lists no mobs")]
    NoMobs {
        /// The rule's pool name.
        pool: String,
    },

    /// The mind store rejected an operation.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// The memory condition that makes a rule fire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trigger {
    /// Event kind to look for.
    pub kind: EventKind,
    /// Required item, for item events.
    #[serde(default)]
    pub item: Option<String>,
}

impl Trigger {
    /// Whether a short-term entry satisfies this trigger.
    pub fn matches(&self, entry: &MemoryEntry) -> bool {
        if entry.event.kind() != self.kind {
            return false;
        }
        self.item
            .as_deref()
            .is_none_or(|wanted| entry.event.item() == Some(wanted))
    }
}

/// A change applied to one emotion after a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EmotionEffect {
    /// The emotion to change.
    pub emotion: Emotion,
    /// Signed amount added (clamped by the store).
    pub delta: i32,
}

/// Decide from `pool` whenever `trigger` is in memory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionRule {
    /// Mob types the rule applies to.
    pub mobs: Vec<String>,
    /// Memory condition; `None` fires every tick.
    #[serde(default)]
    pub trigger: Option<Trigger>,
    /// Catalog name of the decision pool.
    pub pool: String,
    /// Emotion effects keyed by decided option.
    #[serde(default)]
    pub effects: BTreeMap<String, Vec<EmotionEffect>>,
}

impl ReactionRule {
    fn applies_to(&self, mob: &str) -> bool {
        self.mobs.iter().any(|m| m == mob)
    }
}

/// One decision taken during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRecord {
    /// Pool the decision came from.
    pub pool: String,
    /// Chosen option.
    pub decision: String,
}

/// Outcome of one agent's tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// The thought to display.
    pub broadcast: ThoughtBroadcast,
    /// Decisions taken, in rule order.
    pub decisions: Vec<DecisionRecord>,
    /// Strongest emotion after the tick.
    pub dominant: Emotion,
}

/// Runs thought selection and reaction rules for one agent at a time.
#[derive(Debug, Clone)]
pub struct TickDriver {
    catalog: PoolCatalog,
    rules: Vec<ReactionRule>,
}

impl TickDriver {
    /// Build a driver, checking that every rule's pool exists.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnknownPool`] or [`DriverError::NoMobs`] for
    /// the first bad rule.
    pub fn new(catalog: PoolCatalog, rules: Vec<ReactionRule>) -> Result<Self, DriverError> {
        for rule in &rules {
            let Some(mob) = rule.mobs.first() else {
                return Err(DriverError::NoMobs {
                    pool: rule.pool.clone(),
                });
            };
            if catalog.pool(&rule.pool).is_none() {
                return Err(DriverError::UnknownPool {
                    mob: mob.clone(),
                    pool: rule.pool.clone(),
                });
            }
        }
        Ok(Self { catalog, rules })
    }

    /// The catalog the driver draws from.
    pub const fn catalog(&self) -> &PoolCatalog {
        &self.catalog
    }

    /// The reaction rules, in evaluation order.
    pub fn rules(&self) -> &[ReactionRule] {
        &self.rules
    }

    /// Run one tick for `agent` of type `mob`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Agent`] if the mob's thought list is empty.
    pub fn tick(
        &self,
        store: &mut MindStore,
        agent: &AgentId,
        mob: &str,
        rng: &mut impl Rng,
    ) -> Result<TickReport, DriverError> {
        let thought = store.think(agent.clone(), self.catalog.thoughts_for_mob(mob), rng)?;

        let mut decisions = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.applies_to(mob)) {
            let dormant = rule.trigger.as_ref().is_some_and(|trigger| {
                store
                    .recent(agent.clone(), |e| trigger.matches(e))
                    .is_empty()
            });
            if dormant {
                continue;
            }
            // Checked in `new`.
            let Some(pool) = self.catalog.pool(&rule.pool) else {
                continue;
            };

            let decision = store.decide(agent.clone(), pool, rng);
            store.remember(
                agent.clone(),
                MemoryEvent::Decision {
                    pool: Some(rule.pool.clone()),
                    decision: decision.clone(),
                },
            );
            for effect in rule.effects.get(&decision).into_iter().flatten() {
                store.modify_emotion(agent.clone(), effect.emotion, effect.delta);
            }
            info!(agent = %agent, mob, pool = %rule.pool, %decision, "reaction");
            decisions.push(DecisionRecord {
                pool: rule.pool.clone(),
                decision,
            });
        }

        let dominant = store.dominant_emotion(agent.clone());
        debug!(agent = %agent, mob, %thought, ?dominant, "tick");
        Ok(TickReport {
            broadcast: ThoughtBroadcast {
                agent_id: agent.clone(),
                thought,
                at: store.now(),
            },
            decisions,
            dominant,
        })
    }
}
