//! Publish synchronizer.
//!
//! Replaces the published snapshot with the current content store before a
//! preview launches. Every stale key is deleted, then every store entry is
//! written under the virtual prefix. Deletes and writes each run concurrently
//! across keys; [`Publisher::publish`] settles only when the replacement is
//! complete, so a navigation issued afterwards never sees a half-written
//! snapshot.

use futures_util::future::try_join_all;
use html_viewer_core::{Error, Result};
use html_viewer_core::traits::{CachedResource, SnapshotStorage};
use html_viewer_vfs::{ContentStore, EntryPath};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Result of one publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Stale keys removed
    pub removed: usize,
    /// Entries written
    pub written: usize,
}

/// Copies content store state into snapshot storage.
pub struct Publisher {
    storage: Arc<dyn SnapshotStorage>,
    prefix: String,
    ready: OnceCell<()>,
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("prefix", &self.prefix)
            .field("ready", &self.ready.initialized())
            .finish_non_exhaustive()
    }
}

impl Publisher {
    /// Creates a publisher writing under `prefix` (e.g. `/__vfs__/`).
    #[must_use]
    pub fn new(storage: Arc<dyn SnapshotStorage>, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
            ready: OnceCell::new(),
        }
    }

    /// The virtual prefix keys are written under.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Snapshot key (and request path) for a bundle entry.
    #[must_use]
    pub fn key_for(&self, path: &EntryPath) -> String {
        format!("{}{path}", self.prefix)
    }

    /// Registers the interception layer once. Later calls return the memoized
    /// readiness; a failed registration is retried on the next call.
    ///
    /// # Errors
    ///
    /// Returns `Error::Capability` if interception is unavailable.
    pub async fn ensure_ready(&self) -> Result<()> {
        self.ready
            .get_or_try_init(|| async {
                self.storage.register().await?;
                info!(prefix = %self.prefix, "interception layer ready");
                Ok::<(), Error>(())
            })
            .await
            .map(|&()| ())
    }

    /// Replaces the snapshot with the store's current contents.
    ///
    /// # Errors
    ///
    /// Returns `Error::Capability` if interception is unavailable, or
    /// `Error::Storage` if a delete or write fails.
    pub async fn publish(&self, store: &ContentStore) -> Result<PublishReport> {
        self.ensure_ready().await?;

        let removed = self.remove_all().await?;

        let writes = store.entries().map(|entry| {
            let key = self.key_for(entry.path());
            let resource = CachedResource::new(entry.content().clone(), entry.media_type());
            debug!(key = %key, "publishing entry");
            self.storage.put(key, resource)
        });
        let written = try_join_all(writes).await?.len();

        info!(removed, written, "published snapshot");
        Ok(PublishReport { removed, written })
    }

    /// Empties the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if a delete fails.
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.remove_all().await?;
        info!(removed, "cleared snapshot");
        Ok(removed)
    }

    async fn remove_all(&self) -> Result<usize> {
        let stale = self.storage.keys().await?;
        let deletes = stale.iter().map(|key| self.storage.delete(key));
        let removed = try_join_all(deletes).await?;
        Ok(removed.into_iter().filter(|&existed| existed).count())
    }
}
