//! Error types for the navigator and its host collaborators.

use thiserror::Error;

/// Failures reported by host collaborators (entity store, avatar).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("entity store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("avatar movement failed: {0}")]
    Movement(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised to callers of the plugin and its actions.
///
/// An empty selection is not an error; it surfaces as `None` and a warning.
#[derive(Debug, Error)]
pub enum PoiError {
    /// A required action value was not supplied
    #[error("{0}")]
    MissingValue(&'static str),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

pub type Result<T> = std::result::Result<T, PoiError>;
