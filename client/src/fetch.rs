//! The resource-fetch capability the coordinator depends on.

use crate::error::Result;
use shopbook_engine::ResourceKind;
use std::future::Future;

/// Fetches the stored document of one resource kind for one user.
pub trait ResourceFetcher {
    /// Stored text of the user's document for `kind`.
    ///
    /// `Ok(None)` means nothing is stored yet. When several documents match,
    /// only the first one is returned.
    fn fetch(
        &self,
        kind: ResourceKind,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Fails when fetching cannot work at all, before any resource is tried.
    fn check_available(&self) -> impl Future<Output = Result<()>> + Send {
        async { Ok(()) }
    }
}
