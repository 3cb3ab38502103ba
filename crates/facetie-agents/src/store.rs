//! The mind store: single owner of every agent's mental state.
//!
//! A [`MindStore`] maps [`AgentId`]s to [`AgentState`] records. It is an
//! ordinary value, not a process-wide singleton, so independent worlds (or
//! tests) each hold their own. Every subsystem is an `impl MindStore` block
//! in its own module and works on the records in place:
//!
//! - [`memory`](crate::memory) -- remember, recent, recency boost
//! - [`emotion`](crate::emotion) -- modify, set, read
//! - [`social`](crate::social) -- cooperate, gossip, alert, hierarchy
//! - [`decision`](crate::decision) -- weighted option selection
//! - [`thought`](crate::thought) -- thought selection and history
//!
//! Records are created lazily with default state on first reference by any
//! of those operations. The snapshot/restore pair in this module is the
//! only place state is copied out or replaced wholesale.
//!
//! The store is single-writer. Hosts that run ticks in parallel must wrap
//! it in a mutex; `gossip` and `alert` touch several agents in one call.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use facetie_types::{AgentId, AgentSnapshot, StoreSnapshot};

use crate::clock::{Clock, SystemClock};
use crate::config::MindConfig;
use crate::error::AgentError;
use crate::state::AgentState;

/// Owner of all agent mental state in one simulation.
#[derive(Debug)]
pub struct MindStore {
    agents: BTreeMap<AgentId, AgentState>,
    config: MindConfig,
    clock: Box<dyn Clock>,
}

impl Default for MindStore {
    fn default() -> Self {
        Self {
            agents: BTreeMap::new(),
            config: MindConfig::default(),
            clock: Box::new(SystemClock),
        }
    }
}

impl MindStore {
    /// Create an empty store reading wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: MindConfig) -> Result<Self, AgentError> {
        Self::with_clock(config, SystemClock)
    }

    /// Create an empty store with a custom time source.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidConfig`] if `config` fails validation.
    pub fn with_clock(config: MindConfig, clock: impl Clock + 'static) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            agents: BTreeMap::new(),
            config,
            clock: Box::new(clock),
        })
    }

    /// The active configuration.
    pub const fn config(&self) -> &MindConfig {
        &self.config
    }

    /// The current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Return the agent's state, creating a default record if it is unknown.
    pub fn ensure(&mut self, id: impl Into<AgentId>) -> &mut AgentState {
        self.ensure_with_config(id).0
    }

    /// [`ensure`](Self::ensure), also handing back the configuration so
    /// subsystems can read it while holding the record.
    pub(crate) fn ensure_with_config(
        &mut self,
        id: impl Into<AgentId>,
    ) -> (&mut AgentState, &MindConfig) {
        let config = &self.config;
        let state = self.agents.entry(id.into()).or_insert_with_key(|id| {
            debug!(agent = %id, "creating agent mind");
            AgentState::new(config)
        });
        (state, config)
    }

    /// Look up an agent without creating it.
    pub fn get(&self, id: &str) -> Option<&AgentState> {
        self.agents.get(id)
    }

    /// Whether the agent has a record.
    pub fn contains(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    /// Number of agents with a record.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent has a record.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Known agent ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &AgentId> {
        self.agents.keys()
    }

    /// Drop one agent's record, returning it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<AgentState> {
        let removed = self.agents.remove(id);
        if removed.is_some() {
            debug!(agent = id, "removed agent mind");
        }
        removed
    }

    /// Drop every record.
    pub fn reset(&mut self) {
        info!(agents = self.agents.len(), "resetting mind store");
        self.agents.clear();
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Deep copy of one agent's state. Unknown agents yield `None` and are
    /// not created.
    pub fn snapshot(&self, id: &str) -> Option<AgentSnapshot> {
        self.agents
            .get_key_value(id)
            .map(|(id, state)| state.to_snapshot(id))
    }

    /// Replace an agent's full state from a snapshot.
    ///
    /// Returns `false` (and changes nothing) if the snapshot has no id.
    pub fn restore(&mut self, snapshot: AgentSnapshot) -> bool {
        if snapshot.id.is_empty() {
            debug!("ignoring snapshot without an agent id");
            return false;
        }
        let id = snapshot.id.clone();
        let state = AgentState::from_snapshot(snapshot, &self.config);
        self.agents.insert(id, state);
        true
    }

    /// Snapshot every agent, ordered by id.
    pub fn export(&self) -> StoreSnapshot {
        StoreSnapshot {
            agents: self
                .agents
                .iter()
                .map(|(id, state)| state.to_snapshot(id))
                .collect(),
        }
    }

    /// Replace the whole store with the agents in `snapshot`.
    ///
    /// Entries without an id are skipped. Returns the number restored.
    pub fn import(&mut self, snapshot: StoreSnapshot) -> usize {
        self.agents.clear();
        let mut restored: usize = 0;
        for agent in snapshot.agents {
            if self.restore(agent) {
                restored = restored.saturating_add(1);
            }
        }
        info!(agents = restored, "imported mind store");
        restored
    }

    /// Snapshot one agent and log it at `debug` as JSON.
    pub fn debug_dump(&self, id: &str) -> Option<AgentSnapshot> {
        let snapshot = self.snapshot(id)?;
        match serde_json::to_string(&snapshot) {
            Ok(json) => debug!(agent = id, state = %json, "agent mind dump"),
            Err(err) => debug!(agent = id, error = %err, "agent mind dump failed to serialize"),
        }
        Some(snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facetie_types::{Emotion, MemoryEvent};

    use super::*;

    #[test]
    fn ensure_is_idempotent() {
        let mut store = MindStore::default();
        store.ensure("v1").emotions.set(Emotion::Joy, 30);
        let again = store.ensure("v1");
        assert_eq!(again.emotions().get(Emotion::Joy), 30);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_of_unknown_agent_does_not_create() {
        let store = MindStore::default();
        assert!(store.snapshot("ghost").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn restore_rejects_missing_id() {
        let mut store = MindStore::default();
        assert!(!store.restore(AgentSnapshot::default()));
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_is_a_deep_copy() {
        let mut store = MindStore::default();
        store.remember("v1", MemoryEvent::Fire);
        let snapshot = store.snapshot("v1").unwrap();
        store.remember("v1", MemoryEvent::Fire);
        assert_eq!(snapshot.short_term.len(), 1);
        assert_eq!(store.get("v1").unwrap().short_term().len(), 2);
    }

    #[test]
    fn export_import_replaces_everything() {
        let mut source = MindStore::default();
        source.cooperate("v1", "v2");
        source.modify_emotion("v2", Emotion::Fear, 40);

        let mut target = MindStore::default();
        target.ensure("stale");
        let restored = target.import(source.export());

        assert_eq!(restored, 2);
        assert!(!target.contains("stale"));
        assert_eq!(target.export(), source.export());
    }

    #[test]
    fn import_skips_entries_without_id() {
        let mut store = MindStore::default();
        let snapshot = StoreSnapshot {
            agents: vec![
                AgentSnapshot::default(),
                AgentSnapshot {
                    id: AgentId::from("v9"),
                    ..AgentSnapshot::default()
                },
            ],
        };
        assert_eq!(store.import(snapshot), 1);
        assert!(store.contains("v9"));
    }

    #[test]
    fn remove_and_reset() {
        let mut store = MindStore::default();
        store.ensure("a");
        store.ensure("b");
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        store.reset();
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = MindConfig {
            thought_capacity: 0,
            ..MindConfig::default()
        };
        assert!(MindStore::new(config).is_err());
    }

    #[test]
    fn debug_dump_does_not_create() {
        let mut store = MindStore::default();
        assert!(store.debug_dump("v1").is_none());
        store.ensure("v1");
        assert!(store.debug_dump("v1").is_some());
    }
}
