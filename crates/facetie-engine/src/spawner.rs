//! Seeding agents and delivering scripted events.

use tracing::{debug, warn};

use facetie_agents::MindStore;
use facetie_core::{AgentSpec, ScriptedEvent};

/// Create a mind record for every configured agent and apply its starting
/// emotions. Returns the number of agents seeded.
pub fn seed_agents(store: &mut MindStore, agents: &[AgentSpec]) -> usize {
    for agent in agents {
        store.ensure(agent.id.clone());
        for (name, value) in &agent.emotions {
            if store
                .set_emotion_named(agent.id.clone(), name, *value)
                .is_none()
            {
                warn!(agent = %agent.id, emotion = %name, "unknown starting emotion ignored");
            }
        }
        debug!(agent = %agent.id, mob = %agent.mob, "agent seeded");
    }
    agents.len()
}

/// Remember every scripted event due at `tick`. Returns how many were
/// delivered.
pub fn deliver_script(store: &mut MindStore, script: &[ScriptedEvent], tick: u64) -> usize {
    let mut delivered: usize = 0;
    for scripted in script.iter().filter(|s| s.tick == tick) {
        debug!(tick, agent = %scripted.agent, kind = %scripted.event.kind(), "scripted event");
        store.remember(scripted.agent.clone(), scripted.event.clone());
        delivered = delivered.saturating_add(1);
    }
    delivered
}
