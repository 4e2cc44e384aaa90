//! Error types for the simulator.

use thiserror::Error;

use nierodka_core::EconomyError;

/// Simulator failure.
#[derive(Debug, Error)]
pub enum SimError {
    /// Run configuration is unusable.
    #[error("invalid run configuration: {0}")]
    Config(String),

    /// The economy refused its configuration or a snapshot.
    #[error(transparent)]
    Economy(#[from] EconomyError),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or report JSON was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
