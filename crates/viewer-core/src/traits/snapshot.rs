//! Snapshot storage trait.
//!
//! This module defines the `SnapshotStorage` trait for the keyed resource
//! store that the interception layer answers requests from.

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// A stored response body together with its media type.
///
/// # Examples
///
/// ```
/// use html_viewer_core::traits::CachedResource;
///
/// let resource = CachedResource::new("body{}", "text/css; charset=utf-8");
/// assert_eq!(resource.body.as_ref(), b"body{}");
/// assert!(!resource.is_html());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResource {
    /// Response body
    pub body: Bytes,
    /// Value of the `Content-Type` header
    pub content_type: String,
}

impl CachedResource {
    /// Creates a resource from a body and media type.
    #[must_use]
    pub fn new(body: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.into(),
        }
    }

    /// Returns `true` if the media type marks this as an HTML document.
    #[must_use]
    pub fn is_html(&self) -> bool {
        self.content_type.contains("text/html")
    }
}

/// Provides the keyed storage behind the interception layer.
///
/// Keys are absolute request paths under the virtual prefix, e.g.
/// `/__vfs__/index.html`.
///
/// # Type Safety
///
/// All implementations must be `Send + Sync` to work with Tokio's async runtime.
///
/// # Examples
///
/// ```
/// use html_viewer_core::traits::{CachedResource, SnapshotStorage};
/// use html_viewer_core::Result;
/// use async_trait::async_trait;
/// use std::collections::HashMap;
/// use tokio::sync::RwLock;
///
/// #[derive(Default)]
/// struct MapStorage {
///     entries: RwLock<HashMap<String, CachedResource>>,
/// }
///
/// #[async_trait]
/// impl SnapshotStorage for MapStorage {
///     async fn register(&self) -> Result<()> {
///         Ok(())
///     }
///
///     async fn keys(&self) -> Result<Vec<String>> {
///         Ok(self.entries.read().await.keys().cloned().collect())
///     }
///
///     async fn get(&self, key: &str) -> Result<Option<CachedResource>> {
///         Ok(self.entries.read().await.get(key).cloned())
///     }
///
///     async fn put(&self, key: String, resource: CachedResource) -> Result<()> {
///         self.entries.write().await.insert(key, resource);
///         Ok(())
///     }
///
///     async fn delete(&self, key: &str) -> Result<bool> {
///         Ok(self.entries.write().await.remove(key).is_some())
///     }
/// }
/// ```
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Makes the interception layer ready to serve from this storage.
    ///
    /// Called once per application lifetime by the publisher; a successful
    /// result is memoized by the caller.
    ///
    /// # Errors
    ///
    /// Returns `Error::Capability` if interception is unavailable.
    async fn register(&self) -> Result<()>;

    /// Lists every stored key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` on a storage fault.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Looks up a resource by key.
    ///
    /// Returns `Ok(None)` on a miss.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` on a storage fault.
    async fn get(&self, key: &str) -> Result<Option<CachedResource>>;

    /// Stores a resource, overwriting any previous value for the key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` on a storage fault.
    async fn put(&self, key: String, resource: CachedResource) -> Result<()>;

    /// Removes a resource. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` on a storage fault.
    async fn delete(&self, key: &str) -> Result<bool>;
}
