//! Error types for the Shopbook engine.

use crate::ResourceKind;
use thiserror::Error;

/// All possible errors from the Shopbook engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid {kind} document: {message}")]
    InvalidDocument { kind: ResourceKind, message: String },

    #[error("unknown resource kind: {0}")]
    UnknownResourceKind(String),
}

impl Error {
    pub(crate) fn invalid_document(kind: ResourceKind, err: impl std::fmt::Display) -> Self {
        Error::InvalidDocument {
            kind,
            message: err.to_string(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
