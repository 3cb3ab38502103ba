//! Error types for the facetie-agents crate.
//!
//! Cosmetic input problems (unknown emotion names on the permissive API,
//! snapshots without an id) are ignored rather than reported. The variants
//! below cover programmer errors that must surface to the caller.

/// Errors that can occur when building pools or running the mind store.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A decision pool was built with no options.
    #[error("decision pool has no options")]
    EmptyPool,

    /// The same option name appears twice in one pool.
    #[error("duplicate option in decision pool: {0}")]
    DuplicateOption(String),

    /// A base weight is negative, NaN, or infinite.
    #[error("invalid weight {weight} for option {option}")]
    InvalidWeight {
        /// The option the weight was given for.
        option: String,
        /// The rejected weight.
        weight: f64,
    },

    /// A thought selection was requested from an empty candidate list.
    #[error("thought pool has no candidates")]
    EmptyThoughtPool,

    /// An emotion name did not match any of the seven emotions.
    #[error("unknown emotion: {0}")]
    UnknownEmotion(String),

    /// A [`MindConfig`](crate::MindConfig) value is out of range.
    #[error("invalid mind configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },
}
