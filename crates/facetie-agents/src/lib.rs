//! Agent minds for the FaceTie simulation.
//!
//! This crate is the logic layer for NPC minds: everything that operates on
//! agent mental state without touching I/O. It sits between `facetie-types`
//! (the data shapes) and `facetie-core` (config files and the tick driver).
//!
//! All state lives in one [`MindStore`], keyed by [`AgentId`](facetie_types::AgentId).
//! Operations on an unknown agent create it with defaults first.
//!
//! # Modules
//!
//! - [`clock`] -- Time source for memory timestamps ([`Clock`], [`ManualClock`])
//! - [`config`] -- Tunable capacities and weights ([`MindConfig`])
//! - [`decision`] -- Weighted roulette selection over a pool
//! - [`emotion`] -- Clamped emotion reads and writes
//! - [`error`] -- Error types ([`AgentError`])
//! - [`memory`] -- Short/long-term memory and the recency boost
//! - [`pool`] -- Validated decision pools ([`DecisionPool`], [`SelectionLogic`])
//! - [`social`] -- Trust, gossip, alerts, and hierarchy
//! - [`state`] -- Per-agent state record ([`AgentState`])
//! - [`store`] -- The agent registry ([`MindStore`])
//! - [`thought`] -- Display thought selection ([`ThoughtCandidate`])

pub mod clock;
pub mod config;
pub mod decision;
pub mod emotion;
pub mod error;
pub mod memory;
pub mod pool;
pub mod social;
pub mod state;
pub mod store;
pub mod thought;

// Re-export primary types at crate root for convenience.
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::MindConfig;
pub use decision::OptionWeight;
pub use error::AgentError;
pub use pool::{DecisionPool, SelectionLogic};
pub use state::AgentState;
pub use store::MindStore;
pub use thought::ThoughtCandidate;
