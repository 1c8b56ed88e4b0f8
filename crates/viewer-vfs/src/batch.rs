//! Upload batches.
//!
//! A batch is what one user upload action hands to the content store: raw
//! files, each with a relative-path hint. Batches are assembled either
//! programmatically with the fluent builder or from paths on disk.
//!
//! # Examples
//!
//! ```
//! use html_viewer_vfs::UploadBatch;
//!
//! let batch = UploadBatch::new()
//!     .add_file("site/index.html", "<h1>hi</h1>")
//!     .add_file("site/style.css", "h1 { color: red }");
//!
//! assert_eq!(batch.len(), 2);
//! assert!(!batch.is_single_archive());
//! ```

use crate::path::{normalize, top_segment};
use crate::types::{Result, VfsError};
use bytes::Bytes;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// File extension that marks an upload as a compressed bundle.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// One raw uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Bare file name
    pub name: String,
    /// Relative path within a dropped folder, if any
    pub relative_path: Option<String>,
    /// File content
    pub content: Bytes,
    /// Media type declared by the source, if any
    pub declared_type: Option<String>,
}

impl UploadItem {
    /// Creates an item whose path hint is its name alone.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            relative_path: None,
            content: content.into(),
            declared_type: None,
        }
    }

    /// Sets the relative-path hint.
    #[must_use]
    pub fn with_relative_path(mut self, path: impl Into<String>) -> Self {
        self.relative_path = Some(path.into());
        self
    }

    /// Sets the declared media type.
    #[must_use]
    pub fn with_declared_type(mut self, media_type: impl Into<String>) -> Self {
        self.declared_type = Some(media_type.into());
        self
    }

    /// The path hint: relative path if present and non-empty, else the name.
    #[must_use]
    pub fn path_hint(&self) -> &str {
        self.relative_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.name)
    }

    /// Returns `true` if the name carries the archive extension.
    #[must_use]
    pub fn is_archive(&self) -> bool {
        self.name.to_lowercase().ends_with(ARCHIVE_EXTENSION)
    }
}

/// Ordered set of files from one upload action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadBatch {
    items: Vec<UploadItem>,
}

impl UploadBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a file addressed by a path hint. The name is the hint's last
    /// segment.
    #[must_use]
    pub fn add_file(self, path: &str, content: impl Into<Bytes>) -> Self {
        let normalized = normalize(path);
        let name = normalized.rsplit('/').next().unwrap_or_default().to_string();
        let item = if normalized.contains('/') {
            UploadItem::new(name, content).with_relative_path(normalized)
        } else {
            UploadItem::new(name, content)
        };
        self.add_item(item)
    }

    /// Adds a prepared item.
    #[must_use]
    pub fn add_item(mut self, item: UploadItem) -> Self {
        self.items.push(item);
        self
    }

    /// Loads files and folders from disk.
    ///
    /// A file contributes one item named after it. A folder is walked
    /// recursively; each file gets a relative path that starts with the
    /// folder's own name, the way a dropped folder reports its children.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::Io` if a path cannot be read.
    pub fn from_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let mut batch = Self::new();
        for path in paths {
            batch = batch.load_path(path.as_ref())?;
        }
        Ok(batch)
    }

    fn load_path(mut self, path: &Path) -> Result<Self> {
        let io_error = |source| VfsError::Io {
            path: path.display().to_string(),
            source,
        };

        let metadata = fs::metadata(path).map_err(io_error)?;
        if metadata.is_file() {
            let content = fs::read(path).map_err(io_error)?;
            let name = file_name_of(path);
            debug!(path = %path.display(), size = content.len(), "loaded file");
            return Ok(self.add_item(UploadItem::new(name, content)));
        }

        let root_name = file_name_of(path);
        for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| VfsError::Io {
                path: path.display().to_string(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(path)
                .unwrap_or_else(|_| entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            let content = fs::read(entry.path()).map_err(|source| VfsError::Io {
                path: entry.path().display().to_string(),
                source,
            })?;

            let item = UploadItem::new(entry.file_name().to_string_lossy(), content)
                .with_relative_path(format!("{root_name}/{relative}"));
            self.items.push(item);
        }

        debug!(folder = %path.display(), "loaded folder");
        Ok(self)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the batch has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items in upload order.
    #[must_use]
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    /// Consumes the batch, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<UploadItem> {
        self.items
    }

    /// Returns `true` if the batch is exactly one archive file.
    #[must_use]
    pub fn is_single_archive(&self) -> bool {
        matches!(self.items.as_slice(), [only] if only.is_archive())
    }

    /// The single top-level folder every item sits under, if there is one.
    ///
    /// Items without a folder in their path hint rule it out.
    #[must_use]
    pub fn shared_root(&self) -> Option<String> {
        let mut roots = self.items.iter().map(|item| {
            let normalized = normalize(item.path_hint());
            top_segment(&normalized).map(str::to_string)
        });

        let first = roots.next()??;
        roots
            .all(|root| root.as_deref() == Some(first.as_str()))
            .then_some(first)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
