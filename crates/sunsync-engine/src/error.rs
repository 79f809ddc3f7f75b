//! Error types for the sync engine.
//!
//! Collaborator failures are carried as messages rather than concrete
//! transport errors: the engine's contract is that no failure crosses into
//! UI code as anything but a sentinel or a sink notification, so the only
//! thing it needs from an error is something to log and display.

use thiserror::Error;

/// Failures reported by the engine's collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The persistence reader failed during hydration.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The persistence writer rejected or failed a save.
    #[error("write failed: {0}")]
    Write(String),

    /// A catalog or preferred-equipment request failed.
    #[error("catalog request failed: {0}")]
    Catalog(String),
}
