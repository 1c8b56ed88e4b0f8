//! In-memory bundle storage for the HTML viewer.
//!
//! Uploaded files are normalized into bundle-relative paths and kept in a
//! [`ContentStore`]. Archives are expanded through an [`ArchiveIngestor`];
//! the zip implementation lives in [`archive`].
//!
//! # Examples
//!
//! ```
//! use html_viewer_vfs::{ContentStore, IngestOptions, UploadBatch, ZipIngestor};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> html_viewer_vfs::Result<()> {
//! let mut store = ContentStore::new();
//! let batch = UploadBatch::new()
//!     .add_file("site/index.html", "<html></html>")
//!     .add_file("site/app.js", "console.log(1)");
//!
//! let options = IngestOptions { flatten_single_root: true };
//! store.ingest_batch(batch, options, &ZipIngestor).await?;
//!
//! assert!(store.contains("index.html"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod archive;
pub mod batch;
pub mod media;
pub mod path;
pub mod store;
pub mod types;

pub use archive::{ArchiveEntry, ArchiveIngestor, ZipIngestor};
pub use batch::{UploadBatch, UploadItem};
pub use media::PreviewKind;
pub use path::EntryPath;
pub use store::{ContentStore, Entry, IngestOptions, IngestReport, ListedEntry};
pub use types::{Result, VfsError};
