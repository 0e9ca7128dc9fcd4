//! Error types for the sync client.

use shopbook_engine::ResourceKind;

/// A single resource could not be fetched or decoded.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("document store returned {status} for {collection}")]
    Status { status: u16, collection: String },

    #[error("stored document for {0} has no data")]
    MissingData(ResourceKind),

    #[error("decode error: {0}")]
    Decode(#[from] shopbook_engine::Error),

    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// The synchronization run as a whole failed.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("no user id given")]
    MissingUserId,

    #[error("resource fetching is unavailable: {0}")]
    Unavailable(#[source] FetchError),
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
