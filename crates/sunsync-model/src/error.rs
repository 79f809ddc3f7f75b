//! Error types for the model crate.

use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A project id was empty or whitespace.
    #[error("invalid project id: {0:?}")]
    InvalidProjectId(String),

    /// A company id was empty or whitespace.
    #[error("invalid company id: {0:?}")]
    InvalidCompanyId(String),

    /// A record id was empty or whitespace.
    #[error("invalid record id: {0:?}")]
    InvalidRecordId(String),
}
