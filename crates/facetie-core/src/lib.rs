//! Configuration, pool catalog, and tick orchestration for FaceTie.
//!
//! This crate connects the mind store in `facetie-agents` to a running
//! world: it loads `facetie-config.yaml`, holds the named decision pools
//! and thought lists, and drives one agent tick at a time.
//!
//! # Modules
//!
//! - [`catalog`] -- Named pools and thought lists ([`PoolCatalog`])
//! - [`config`] -- YAML configuration ([`EngineConfig`], [`ConfigError`])
//! - [`driver`] -- Reaction rules and the per-agent tick ([`TickDriver`])
//! - [`thought_ui`] -- Nearby-thought selection for overlays

pub mod catalog;
pub mod config;
pub mod driver;
pub mod thought_ui;

pub use catalog::{CatalogEntry, PoolCatalog};
pub use config::{AgentSpec, ConfigError, EngineConfig, ScriptedEvent, WorldConfig};
pub use driver::{
    DecisionRecord, DriverError, EmotionEffect, ReactionRule, TickDriver, TickReport, Trigger,
};
pub use thought_ui::{Position, ThoughtUiConfig, VisibleThought, nearby_thoughts};
