//! Sync coordinator - seeds local containers from the user's stored documents.
//!
//! One run fetches all five resource kinds concurrently, waits for every
//! fetch to settle, then dispatches each resolved document to its container.
//! A failing resource never stops the others; its container keeps whatever
//! it held before the run.

use crate::error::{FetchError, SyncError};
use crate::fetch::ResourceFetcher;
use futures::future::join_all;
use shopbook_engine::{ResourceDocument, ResourceKind, StateSink, UserId};

/// How one resource was resolved.
#[derive(Debug)]
enum Resolution {
    /// A stored document was found and decoded
    Stored(ResourceDocument),
    /// Nothing stored; the kind's default document applies
    Defaulted(ResourceDocument),
    /// A stored payload was present but null
    Empty,
}

/// A resource whose fetch failed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedResource {
    pub kind: ResourceKind,
    pub reason: String,
}

/// What a synchronization run did, per resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub user_id: UserId,
    /// Kinds updated from a stored document
    pub applied: Vec<ResourceKind>,
    /// Kinds updated with their default document
    pub defaulted: Vec<ResourceKind>,
    /// Kinds whose stored payload was null; not dispatched
    pub skipped: Vec<ResourceKind>,
    /// Kinds whose fetch failed; not dispatched
    pub failed: Vec<FailedResource>,
}

impl SyncReport {
    fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    /// Number of container updates issued.
    pub fn dispatched(&self) -> usize {
        self.applied.len() + self.defaulted.len()
    }

    /// Whether every kind was dispatched.
    pub fn is_complete(&self) -> bool {
        self.dispatched() == ResourceKind::ALL.len()
    }
}

/// Coordinates a synchronization run against a [`ResourceFetcher`].
#[derive(Debug, Clone)]
pub struct SyncCoordinator<F> {
    fetcher: F,
}

impl<F: ResourceFetcher> SyncCoordinator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Synchronize all resource kinds for `user_id` into `sink`.
    ///
    /// Returns `true` once every resolved resource has been dispatched, even
    /// if some resources failed. Returns `false` for an empty user id (with
    /// no fetches and no sink calls) or when the run as a whole fails.
    pub async fn synchronize<S: StateSink>(&self, user_id: &str, sink: &mut S) -> bool {
        self.synchronize_report(user_id, sink).await.is_ok()
    }

    /// Like [`synchronize`](Self::synchronize), returning per-kind detail.
    pub async fn synchronize_report<S: StateSink>(
        &self,
        user_id: &str,
        sink: &mut S,
    ) -> Result<SyncReport, SyncError> {
        if user_id.is_empty() {
            return Err(SyncError::MissingUserId);
        }

        sink.sync_started();
        let result = self.run(user_id, sink).await;

        match &result {
            Ok(report) => tracing::info!(
                user_id = %user_id,
                applied = report.applied.len(),
                defaulted = report.defaulted.len(),
                skipped = report.skipped.len(),
                failed = report.failed.len(),
                "User data synchronized"
            ),
            Err(e) => tracing::error!(user_id = %user_id, error = %e, "Error syncing user data"),
        }

        sink.sync_finished(result.is_ok());
        result
    }

    async fn run<S: StateSink>(
        &self,
        user_id: &str,
        sink: &mut S,
    ) -> Result<SyncReport, SyncError> {
        self.fetcher
            .check_available()
            .await
            .map_err(SyncError::Unavailable)?;

        let outcomes = join_all(ResourceKind::ALL.map(|kind| self.resolve(kind, user_id))).await;

        let mut report = SyncReport::new(user_id);
        for (kind, outcome) in outcomes {
            match outcome {
                Ok(Resolution::Stored(document)) => {
                    sink.apply_document(document);
                    report.applied.push(kind);
                }
                Ok(Resolution::Defaulted(document)) => {
                    sink.apply_document(document);
                    report.defaulted.push(kind);
                }
                Ok(Resolution::Empty) => {
                    tracing::debug!(kind = %kind, "Stored payload is null, skipping");
                    report.skipped.push(kind);
                }
                Err(e) => {
                    tracing::warn!(kind = %kind, user_id = %user_id, error = %e, "Error fetching resource");
                    report.failed.push(FailedResource {
                        kind,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Fetch and decode one kind. The result carries its kind explicitly.
    async fn resolve(
        &self,
        kind: ResourceKind,
        user_id: &str,
    ) -> (ResourceKind, Result<Resolution, FetchError>) {
        let outcome = async {
            let resolution = match self.fetcher.fetch(kind, user_id).await? {
                Some(text) => match ResourceDocument::decode(kind, &text)? {
                    Some(document) => Resolution::Stored(document),
                    None => Resolution::Empty,
                },
                None => Resolution::Defaulted(kind.default_document()),
            };
            Ok::<_, FetchError>(resolution)
        }
        .await;

        (kind, outcome)
    }
}
