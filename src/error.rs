//! Typed errors for the routing engine.
//!
//! Library-level code returns `EngineError`; the CLI binary wraps these in
//! `anyhow` at the application boundary, matching the toolkit's convention
//! that typed errors live in library code and `anyhow` takes over for
//! top-level reporting.

use thiserror::Error;

/// Hard failures that abort a route-generation job with no partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The kept component has zero edges after filtering.
    #[error("kept component has zero edges after filtering")]
    EmptyNetwork,

    /// Degree balance could not be restored by the defensive Eulerization
    /// fallback. Only reachable if the Bidirectional Pairing invariant is
    /// relaxed upstream of the graph builder.
    #[error("graph could not be made Eulerian: {reason}")]
    NotEulerizable { reason: String },

    /// No node in the input has out-degree > 0.
    #[error("input has no node with out-degree greater than zero")]
    Disconnected,

    /// The supplied [`crate::config::Config`] failed validation before
    /// the pipeline ran at all. Not one of spec.md's own error kinds;
    /// this is the ambient guard around `Config::validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised by [`crate::config::Config::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("turn multipliers must satisfy right < straight < left < u_turn, got {0:?}")]
    TurnMultiplierOrdering(TurnMultipliers),

    #[error("ignore_oneway must be true in this version of the engine")]
    OnewayNotIgnored,

    #[error("straight_threshold_deg ({straight}) must be less than u_turn_threshold_deg ({u_turn})")]
    ThresholdOrdering { straight: f64, u_turn: f64 },

    #[error("turn multipliers and thresholds must be finite and non-negative")]
    NonFinite,
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-exported here so `ConfigError::TurnMultiplierOrdering` can carry the
// offending value without a dependency cycle with `config`.
pub use crate::config::TurnMultipliers;
