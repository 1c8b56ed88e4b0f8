//! In-memory content store.
//!
//! Maps normalized bundle paths to file content and a media type. Entries
//! accumulate across upload batches; the store is only emptied by an explicit
//! [`ContentStore::clear`].
//!
//! # Examples
//!
//! ```
//! use html_viewer_vfs::ContentStore;
//!
//! let mut store = ContentStore::new();
//! store.put("/site\\index.html", "<h1>hi</h1>", None);
//! store.put("__MACOSX/._index.html", "junk", None);
//!
//! assert_eq!(store.len(), 1);
//! let entry = store.get("site/index.html").unwrap();
//! assert_eq!(entry.media_type(), "text/html; charset=utf-8");
//! ```

use crate::archive::{ArchiveIngestor, write_zip};
use crate::batch::UploadBatch;
use crate::media::{PreviewKind, guess_media_type};
use crate::path::{EntryPath, strip_top_segment};
use crate::types::{Result, VfsError};
use bytes::Bytes;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

/// One stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: EntryPath,
    content: Bytes,
    declared_type: Option<String>,
}

impl Entry {
    /// The normalized path.
    #[must_use]
    pub const fn path(&self) -> &EntryPath {
        &self.path
    }

    /// The file content.
    #[must_use]
    pub const fn content(&self) -> &Bytes {
        &self.content
    }

    /// Content size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// The declared media type, if the source supplied one.
    #[must_use]
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Declared media type, or the one inferred from the extension.
    #[must_use]
    pub fn media_type(&self) -> &str {
        self.declared_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| guess_media_type(&self.path))
    }

    /// Renderer for single-file inspection, if any.
    #[must_use]
    pub fn preview_kind(&self) -> Option<PreviewKind> {
        PreviewKind::classify(&self.path, self.media_type())
    }
}

/// A row of the file listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Normalized path
    pub path: EntryPath,
    /// Content size in bytes
    pub size: usize,
    /// Renderer for inspection, `None` when not previewable
    pub preview: Option<PreviewKind>,
}

/// Options for [`ContentStore::ingest_batch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Drop the wrapper folder when the batch is a single dropped folder.
    pub flatten_single_root: bool,
}

/// Outcome of one ingested batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Name of the archive that was expanded, if the batch was one
    pub extracted_from: Option<String>,
    /// Entries written to the store
    pub stored: usize,
    /// Entries dropped as ignorable or empty paths
    pub skipped: usize,
    /// Whether the wrapper folder was stripped
    pub flattened: bool,
}

/// The content store.
///
/// `revision` advances on every mutation, so listing observers can redraw by
/// comparing revisions instead of subscribing.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    files: HashMap<EntryPath, Entry>,
    revision: u64,
}

impl ContentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites an entry.
    ///
    /// The path is normalized first. Returns `false` (and stores nothing)
    /// when the path is ignorable or normalizes to nothing.
    pub fn put(
        &mut self,
        path: &str,
        content: impl Into<Bytes>,
        media_type: Option<&str>,
    ) -> bool {
        let path = EntryPath::new(path);
        if path.is_empty() || path.is_ignorable() {
            debug!(path = %path, "dropped ignorable entry");
            return false;
        }

        let entry = Entry {
            path: path.clone(),
            content: content.into(),
            declared_type: media_type.map(str::to_string),
        };
        debug!(path = %path, size = entry.size(), "stored entry");
        self.files.insert(path, entry);
        self.revision += 1;
        true
    }

    /// Looks up an entry by (unnormalized) path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.files.get(&EntryPath::new(path))
    }

    /// Looks up an entry, failing with `FileNotFound`.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::FileNotFound` if nothing is stored at the path.
    pub fn require(&self, path: &str) -> Result<&Entry> {
        let key = EntryPath::new(path);
        self.files.get(&key).ok_or_else(|| VfsError::FileNotFound {
            path: key.into_inner(),
        })
    }

    /// Returns `true` if an entry exists at the path.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the store holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Mutation counter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Iterates entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.files.values()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        let removed = self.files.len();
        self.files.clear();
        self.revision += 1;
        info!(removed, "cleared content store");
    }

    /// Entries for display, in collation order.
    #[must_use]
    pub fn list(&self) -> Vec<ListedEntry> {
        let mut listed: Vec<_> = self
            .files
            .values()
            .map(|entry| ListedEntry {
                path: entry.path.clone(),
                size: entry.size(),
                preview: entry.preview_kind(),
            })
            .collect();
        listed.sort_by(|a, b| collate(a.path.as_str(), b.path.as_str()));
        listed
    }

    /// Stores one upload batch.
    ///
    /// Exactly one `.zip` file uploaded into an empty store is expanded and
    /// its entries stored instead of the archive itself. Every other batch is
    /// stored item by item under its path hint, with the wrapper folder
    /// stripped when `flatten_single_root` is requested, the store is empty
    /// and all items share one top-level folder.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::InvalidArchive` if expansion fails; the store is
    /// left unchanged.
    pub async fn ingest_batch(
        &mut self,
        batch: UploadBatch,
        options: IngestOptions,
        ingestor: &dyn ArchiveIngestor,
    ) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        if self.is_empty() && batch.is_single_archive() {
            for item in batch.into_items() {
                let entries = ingestor.expand(&item.name, item.content).await?;
                for entry in entries {
                    if self.put(&entry.path, entry.content, None) {
                        report.stored += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
                info!(archive = %item.name, stored = report.stored, "expanded archive");
                report.extracted_from = Some(item.name);
            }
            return Ok(report);
        }

        report.flattened =
            options.flatten_single_root && self.is_empty() && batch.shared_root().is_some();

        for item in batch.into_items() {
            let path = if report.flattened {
                strip_top_segment(item.path_hint())
            } else {
                item.path_hint().to_string()
            };
            if self.put(&path, item.content, item.declared_type.as_deref()) {
                report.stored += 1;
            } else {
                report.skipped += 1;
            }
        }

        info!(
            stored = report.stored,
            skipped = report.skipped,
            flattened = report.flattened,
            "ingested upload batch"
        );
        Ok(report)
    }

    /// Packs every entry into a zip archive, in listing order.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::EmptyStore` if there is nothing to pack.
    pub fn export_archive(&self) -> Result<Vec<u8>> {
        if self.is_empty() {
            return Err(VfsError::EmptyStore);
        }

        let mut entries: Vec<_> = self.files.values().collect();
        entries.sort_by(|a, b| collate(a.path.as_str(), b.path.as_str()));
        write_zip(
            entries
                .into_iter()
                .map(|entry| (entry.path.as_str(), entry.content.as_ref())),
        )
    }
}

/// Case-folded comparison with a byte-order tie break.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
