//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the tick loop so
//! that `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: facetie_core::ConfigError,
    },

    /// The mind store rejected its configuration.
    #[error("mind store error: {source}")]
    Mind {
        /// The underlying agent error.
        #[from]
        source: facetie_agents::AgentError,
    },

    /// An agent tick failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying driver error.
        #[from]
        source: facetie_core::DriverError,
    },
}
