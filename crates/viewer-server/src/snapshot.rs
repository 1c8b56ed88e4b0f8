//! In-memory published snapshot.
//!
//! Backing storage for the interception layer. Registration succeeds only
//! once the server that answers from this storage is listening; until then
//! the publisher reports a capability error.

use async_trait::async_trait;
use html_viewer_core::traits::{CachedResource, SnapshotStorage};
use html_viewer_core::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Snapshot storage held in process memory.
///
/// # Examples
///
/// ```
/// use html_viewer_core::traits::{CachedResource, SnapshotStorage};
/// use html_viewer_server::MemorySnapshot;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> html_viewer_core::Result<()> {
/// let snapshot = MemorySnapshot::new();
/// assert!(snapshot.register().await.is_err());
///
/// snapshot.mark_listening();
/// snapshot.register().await?;
/// snapshot
///     .put("/__vfs__/a.css".to_string(), CachedResource::new("a{}", "text/css"))
///     .await?;
/// assert_eq!(snapshot.len().await, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemorySnapshot {
    entries: RwLock<HashMap<String, CachedResource>>,
    listening: AtomicBool,
}

impl MemorySnapshot {
    /// Creates an empty snapshot that is not yet serving.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the interception server as listening.
    pub fn mark_listening(&self) {
        self.listening.store(true, Ordering::Release);
    }

    /// Marks the interception server as stopped.
    pub fn mark_stopped(&self) {
        self.listening.store(false, Ordering::Release);
    }

    /// Returns `true` while the interception server is listening.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Number of stored resources.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStorage for MemorySnapshot {
    async fn register(&self) -> Result<()> {
        if self.is_listening() {
            Ok(())
        } else {
            Err(Error::Capability {
                reason: "the interception server is not listening".to_string(),
            })
        }
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<CachedResource>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: String, resource: CachedResource) -> Result<()> {
        debug!(key = %key, size = resource.body.len(), "snapshot put");
        self.entries.write().await.insert(key, resource);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }
}
