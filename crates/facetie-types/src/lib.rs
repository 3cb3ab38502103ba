//! Shared type definitions for the FaceTie agent mind simulation.
//!
//! This crate holds the plain-data shapes exchanged between the mind store,
//! the tick driver, and embedding hosts. Presentation-facing types flow to
//! `TypeScript` via `ts-rs` for the thought HUD overlay.
//!
//! # Modules
//!
//! - [`ids`] -- The opaque [`AgentId`] wrapper
//! - [`enums`] -- [`Emotion`] and [`EventKind`]
//! - [`structs`] -- Emotion vectors, memory events, social links, snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Emotion, EventKind, IMPORTANT_KINDS};
pub use ids::AgentId;
pub use structs::{
    AgentSnapshot, DEFAULT_TRUST, EMOTION_MAX, EMOTION_MIN, EmotionVector, MemoryEntry,
    MemoryEvent, SocialLink, StoreSnapshot, ThoughtBroadcast, ThoughtEntry, clamp_level,
};
