//! Engine binary for the FaceTie simulation.
//!
//! Wires configuration, the mind store, and the tick driver together and
//! replays the configured event script over a paced tick loop.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `facetie-config.yaml` (or `FACETIE_CONFIG`)
//! 3. Build the mind store and seed configured agents
//! 4. Build the tick driver from the pool catalog and reaction rules
//! 5. Run the tick loop until `max_ticks` or Ctrl-C
//! 6. Log a final summary of every agent's mind

mod error;
mod spawner;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use facetie_agents::MindStore;
use facetie_core::{EngineConfig, TickDriver, nearby_thoughts};

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a tick fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("facetie-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = ?config.world.max_ticks,
        "Configuration loaded"
    );

    // 3. Mind store and agents.
    let mut store = MindStore::new(config.mind.clone())?;
    let seeded = spawner::seed_agents(&mut store, &config.agents);
    info!(agents = seeded, "Agents seeded");

    // 4. Tick driver.
    let driver = config.driver()?;
    info!(
        pools = driver.catalog().list().len(),
        reactions = driver.rules().len(),
        "Tick driver ready"
    );

    // 5. Tick loop.
    let mut rng = StdRng::seed_from_u64(config.world.seed);
    let ticks = run(&config, &driver, &mut store, &mut rng).await?;

    // 6. Summary.
    let snapshot = store.export();
    for agent in &snapshot.agents {
        store.debug_dump(agent.id.as_str());
    }
    info!(ticks, agents = snapshot.agents.len(), "facetie-engine finished");
    Ok(())
}

/// Drive every agent once per tick until the limit or Ctrl-C. Returns the
/// number of ticks completed.
async fn run(
    config: &EngineConfig,
    driver: &TickDriver,
    store: &mut MindStore,
    rng: &mut StdRng,
) -> Result<u64, EngineError> {
    let mut interval = tokio::time::interval(Duration::from_millis(config.world.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let positions = config.positions();
    let observer = positions.keys().next().cloned();
    let mut tick: u64 = 0;

    loop {
        if config.world.max_ticks.is_some_and(|max| tick >= max) {
            break;
        }
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut shutdown => {
                info!(tick, "Interrupted, stopping");
                break;
            }
        }
        tick = tick.saturating_add(1);

        let delivered = spawner::deliver_script(store, &config.script, tick);
        debug!(tick, delivered, "tick start");

        for agent in &config.agents {
            let report = driver.tick(store, &agent.id, &agent.mob, rng)?;
            let decisions: Vec<&str> = report
                .decisions
                .iter()
                .map(|d| d.decision.as_str())
                .collect();
            info!(
                tick,
                agent = %report.broadcast.agent_id,
                thought = %report.broadcast.thought,
                dominant = %report.dominant.as_str(),
                ?decisions,
                "thought"
            );
        }

        if let Some(observer) = &observer {
            for visible in nearby_thoughts(store, observer.as_str(), &positions, &config.thought_ui) {
                debug!(tick, observer = %observer, lod = ?visible.lod, line = %visible.render(), "overlay");
            }
        }
    }
    Ok(tick)
}

/// Load configuration from the `FACETIE_CONFIG` path, falling back to
/// defaults when the file does not exist.
fn load_config() -> Result<EngineConfig, EngineError> {
    let path = EngineConfig::path_from_env();
    if path.exists() {
        Ok(EngineConfig::from_file(&path)?)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        let mut config = EngineConfig::default();
        config.world.apply_env_overrides();
        Ok(config)
    }
}
