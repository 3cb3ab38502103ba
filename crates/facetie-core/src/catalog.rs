//! Named decision pools and thought lists.
//!
//! The stock catalog ships the reference pools for villagers, piglins,
//! dragons, dolphins, and guardians together with per-mob thought lists.
//! Configuration files may add entries or replace stock ones by name.

use std::collections::BTreeMap;

use facetie_agents::{DecisionPool, ThoughtCandidate};

/// Thought list used when neither the mob nor villagers have one.
const FALLBACK_THOUGHT: &str = "...";

/// Thought list consulted when a mob has none of its own.
pub const DEFAULT_THOUGHTS: &str = "villager_thoughts";

/// A catalog entry, borrowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogEntry<'a> {
    /// A weighted decision pool.
    Pool(&'a DecisionPool),
    /// A uniform thought list.
    Thoughts(&'a [ThoughtCandidate]),
}

/// Registry of decision pools and thought lists, keyed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolCatalog {
    pools: BTreeMap<String, DecisionPool>,
    thoughts: BTreeMap<String, Vec<ThoughtCandidate>>,
    fallback: Vec<ThoughtCandidate>,
}

impl Default for PoolCatalog {
    /// The stock catalog.
    fn default() -> Self {
        let mut catalog = Self::empty();
        for (name, options, hint) in STOCK_POOLS {
            if let Ok(pool) = DecisionPool::new(options.iter().copied()) {
                catalog.insert_pool(*name, pool.named(*name).with_selection_hint(hint));
            }
        }
        for (name, lines) in STOCK_THOUGHTS {
            catalog.insert_thoughts(
                *name,
                lines.iter().copied().map(ThoughtCandidate::from).collect(),
            );
        }
        catalog
    }
}

impl PoolCatalog {
    /// A catalog with no entries.
    pub fn empty() -> Self {
        Self {
            pools: BTreeMap::new(),
            thoughts: BTreeMap::new(),
            fallback: vec![ThoughtCandidate::from(FALLBACK_THOUGHT)],
        }
    }

    /// Add or replace a decision pool. The pool takes `name` unless it
    /// already carries one.
    pub fn insert_pool(&mut self, name: impl Into<String>, pool: DecisionPool) {
        let name = name.into();
        let pool = if pool.name().is_some() {
            pool
        } else {
            pool.named(name.clone())
        };
        self.pools.insert(name, pool);
    }

    /// Add or replace a thought list.
    ///
    /// Empty lists are accepted here; [`MindStore::think`](facetie_agents::MindStore::think)
    /// reports them when used.
    pub fn insert_thoughts(&mut self, name: impl Into<String>, thoughts: Vec<ThoughtCandidate>) {
        self.thoughts.insert(name.into(), thoughts);
    }

    /// Look up any entry by name. Pools shadow thought lists of the same name.
    pub fn get(&self, name: &str) -> Option<CatalogEntry<'_>> {
        self.pools
            .get(name)
            .map(CatalogEntry::Pool)
            .or_else(|| {
                self.thoughts
                    .get(name)
                    .map(|t| CatalogEntry::Thoughts(t.as_slice()))
            })
    }

    /// A decision pool by name.
    pub fn pool(&self, name: &str) -> Option<&DecisionPool> {
        self.pools.get(name)
    }

    /// A thought list by name.
    pub fn thoughts(&self, name: &str) -> Option<&[ThoughtCandidate]> {
        self.thoughts.get(name).map(Vec::as_slice)
    }

    /// The thought list for a mob type: `{mob}_thoughts`, else
    /// `villager_thoughts`, else a single `"..."`.
    pub fn thoughts_for_mob(&self, mob: &str) -> &[ThoughtCandidate] {
        self.thoughts(&format!("{mob}_thoughts"))
            .or_else(|| self.thoughts(DEFAULT_THOUGHTS))
            .unwrap_or(&self.fallback)
    }

    /// A copy of pool `name` with `extra` options appended, or `None` if
    /// no pool has that name. Thought lists cannot be expanded.
    pub fn expand<I, S>(&self, name: &str, extra: I) -> Option<DecisionPool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pool(name).map(|pool| pool.expanded(extra))
    }

    /// Names ending in `_pool` or `_thoughts`, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .pools
            .keys()
            .chain(self.thoughts.keys())
            .map(String::as_str)
            .filter(|name| name.ends_with("_pool") || name.ends_with("_thoughts"))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Merge `pools` and `thoughts` over this catalog, replacing entries
    /// with the same name.
    pub fn extend(
        &mut self,
        pools: BTreeMap<String, DecisionPool>,
        thoughts: BTreeMap<String, Vec<ThoughtCandidate>>,
    ) {
        for (name, pool) in pools {
            self.insert_pool(name, pool);
        }
        for (name, list) in thoughts {
            self.insert_thoughts(name, list);
        }
    }
}

type StockPool = (&'static str, &'static [&'static str], &'static str);

const STOCK_POOLS: &[StockPool] = &[
    (
        "villager_fire_decision_pool",
        &[
            "run_to_water_and_fetch_bucket",
            "alert_nearby_villagers",
            "attempt_extinguish_directly",
            "panic_and_flee",
            "call_iron_golems_for_help",
            "help_animals_escape",
        ],
        "weighted by fear and curiosity",
    ),
    (
        "piglin_trade_pool",
        &[
            "inspect_gold_and_trade",
            "steal_item_and_run",
            "demand_gold_and_attack",
            "observe_player_cautiously",
        ],
        "weighted by curiosity and trust",
    ),
    (
        "dragon_strategy_pool",
        &[
            "flank_with_wings",
            "direct_breath_attack",
            "focus_crystals",
            "retreat_and_heal",
        ],
        "weighted by anger and health",
    ),
    (
        "aquatic_rescue_pool",
        &[
            "rescue_item_and_return",
            "alert_nearby_dolphins",
            "playful_investigate",
            "ignore_and_flee",
        ],
        "weighted by curiosity and trust",
    ),
    (
        "guardian_defense_pool",
        &[
            "patrol_perimeter",
            "focus_on_player",
            "retreat_to_home",
            "summon_help",
        ],
        "weighted by anger and trust",
    ),
];

const STOCK_THOUGHTS: &[(&str, &[&str])] = &[
    (
        "villager_thoughts",
        &[
            "Help! Fire!",
            "Curious traveler nearby",
            "Repairing barn",
            "Seeking water",
            "Alerting others",
        ],
    ),
    (
        "wolf_thoughts",
        &[
            "Hunting prey",
            "Following alpha",
            "Fleeing danger",
            "Curious about player",
        ],
    ),
    (
        "dragon_thoughts",
        &[
            "Attack strategy: flank",
            "Crystal under threat",
            "Player approaching",
            "Retreat if too damaged",
        ],
    ),
];
