//! # Shopbook Client
//!
//! Fetches a user's stored documents and seeds local state from them.
//!
//! The [`SyncCoordinator`] runs one synchronization per sign-in: it asks a
//! [`ResourceFetcher`] for all five resource kinds at once, tolerates
//! individual failures, and hands each resolved document to a
//! [`StateSink`](shopbook_engine::StateSink). [`HttpDocumentStore`] is the
//! fetcher used against the real document database.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod http;

pub use config::{CollectionIds, Config, ConfigError};
pub use coordinator::{FailedResource, SyncCoordinator, SyncReport};
pub use error::{FetchError, SyncError};
pub use fetch::ResourceFetcher;
pub use http::HttpDocumentStore;
