//! Configuration loading and typed config structures for FaceTie.
//!
//! The canonical configuration lives in `facetie-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file.
//!
//! Every section is optional. Pools and thought lists under `pools` and
//! `thoughts` are merged over the stock [`PoolCatalog`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use facetie_agents::{AgentError, DecisionPool, MindConfig, ThoughtCandidate};
use facetie_types::{AgentId, MemoryEvent};

use crate::catalog::PoolCatalog;
use crate::driver::{DriverError, ReactionRule, TickDriver};
use crate::thought_ui::{Position, ThoughtUiConfig};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "facetie-config.yaml";

/// Environment variable selecting the configuration file.
pub const CONFIG_ENV: &str = "FACETIE_CONFIG";

/// Environment variable overriding `world.seed`.
pub const SEED_ENV: &str = "FACETIE_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The content parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },

    /// The `mind` section failed validation.
    #[error(transparent)]
    Mind(#[from] AgentError),

    /// A reaction rule does not fit the catalog.
    #[error(transparent)]
    Reaction(#[from] DriverError),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `facetie-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// World-level settings (name, seed, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Mind store tuning.
    #[serde(default)]
    pub mind: MindConfig,

    /// Thought overlay visibility.
    #[serde(default)]
    pub thought_ui: ThoughtUiConfig,

    /// Extra or replacement decision pools, by name.
    #[serde(default)]
    pub pools: BTreeMap<String, DecisionPool>,

    /// Extra or replacement thought lists, by name.
    #[serde(default)]
    pub thoughts: BTreeMap<String, Vec<ThoughtCandidate>>,

    /// Agents present at start.
    #[serde(default)]
    pub agents: Vec<AgentSpec>,

    /// Reaction rules, evaluated in order each tick.
    #[serde(default)]
    pub reactions: Vec<ReactionRule>,

    /// Events injected at fixed ticks.
    #[serde(default)]
    pub script: Vec<ScriptedEvent>,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `FACETIE_SEED`, when set to an integer, overrides `world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error (see [`validate`](Self::validate)).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.world.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// The file to load: `FACETIE_CONFIG` if set, else
    /// `facetie-config.yaml` in the working directory.
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
    }

    /// Check cross-section consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mind`] for a bad `mind` section,
    /// [`ConfigError::Invalid`] for empty thought lists, duplicate or empty
    /// agent ids, scripted events for unknown agents, or a zero tick
    /// interval, and [`ConfigError::Reaction`] for rules whose pool is not
    /// in the catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mind.validate()?;

        if self.world.tick_interval_ms == 0 {
            return Err(invalid("world.tick_interval_ms must be at least 1"));
        }
        if let Some((name, _)) = self.thoughts.iter().find(|(_, list)| list.is_empty()) {
            return Err(invalid(&format!("thought list {name} is empty")));
        }

        let mut ids = std::collections::BTreeSet::new();
        for agent in &self.agents {
            if agent.id.is_empty() {
                return Err(invalid("agent with empty id"));
            }
            if !ids.insert(agent.id.as_str()) {
                return Err(invalid(&format!("duplicate agent id {}", agent.id)));
            }
        }
        for scripted in &self.script {
            if !ids.contains(scripted.agent.as_str()) {
                return Err(invalid(&format!(
                    "script event at tick {} targets unknown agent {}",
                    scripted.tick, scripted.agent
                )));
            }
        }

        self.driver()?;
        Ok(())
    }

    /// The stock catalog with this file's pools and thoughts merged in.
    pub fn catalog(&self) -> PoolCatalog {
        let mut catalog = PoolCatalog::default();
        catalog.extend(self.pools.clone(), self.thoughts.clone());
        catalog
    }

    /// A tick driver over [`catalog`](Self::catalog) and the reaction rules.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnknownPool`] if a rule's pool is missing.
    pub fn driver(&self) -> Result<TickDriver, DriverError> {
        TickDriver::new(self.catalog(), self.reactions.clone())
    }

    /// Positions of every agent that has one.
    pub fn positions(&self) -> BTreeMap<AgentId, Position> {
        self.agents
            .iter()
            .filter_map(|agent| agent.position.map(|p| (agent.id.clone(), p)))
            .collect()
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks; run forever when absent.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: Option<u64>,
}

impl WorldConfig {
    /// Override the seed from `FACETIE_SEED` when it holds an integer.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV) {
            match val.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(err) => warn!(value = %val, error = %err, "ignoring non-numeric {SEED_ENV}"),
            }
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
        }
    }
}

/// One agent present at start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentSpec {
    /// Agent identifier.
    pub id: AgentId,

    /// Mob type, used to pick thought lists and reaction rules.
    pub mob: String,

    /// Starting emotion values by name; unknown names are ignored.
    #[serde(default)]
    pub emotions: BTreeMap<String, i32>,

    /// World position, for the thought overlay.
    #[serde(default)]
    pub position: Option<Position>,
}

/// An event delivered to one agent before a given tick runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptedEvent {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Receiving agent.
    pub agent: AgentId,
    /// What the agent observes.
    pub event: MemoryEvent,
}

fn default_world_name() -> String {
    String::from("FaceTie Village")
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    1_000
}

const fn default_max_ticks() -> Option<u64> {
    Some(20)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: EngineConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(config.world.tick_interval_ms, 1_000);
        assert_eq!(config.mind, MindConfig::default());
        assert_eq!(config.thought_ui, ThoughtUiConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_tick_interval_is_invalid() {
        let config: EngineConfig =
            serde_yml::from_str("world:\n  tick_interval_ms: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn bad_mind_section_is_reported() {
        let config: EngineConfig =
            serde_yml::from_str("mind:\n  short_term_capacity: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Mind(_))));
    }

    #[test]
    fn duplicate_agents_are_invalid() {
        let yaml = "agents:\n  - {id: v1, mob: villager}\n  - {id: v1, mob: wolf}\n";
        let config: EngineConfig = serde_yml::from_str(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn script_for_unknown_agent_is_invalid() {
        let yaml = "script:\n  - tick: 1\n    agent: ghost\n    event: {kind: fire}\n";
        let config: EngineConfig = serde_yml::from_str(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn empty_pool_fails_to_parse() {
        let yaml = "pools:\n  broken_pool:\n    options: []\n";
        assert!(matches!(
            EngineConfig::parse(yaml),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn positions_skip_unplaced_agents() {
        let yaml = "agents:\n  - {id: v1, mob: villager, position: {x: 1.0, y: 2.0, z: 3.0}}\n  - {id: w1, mob: wolf}\n";
        let config: EngineConfig = serde_yml::from_str(yaml).unwrap();
        let positions = config.positions();
        assert_eq!(positions.len(), 1);
        assert!(positions.contains_key("v1"));
    }
}
