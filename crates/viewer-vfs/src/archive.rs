//! Archive expansion and export.
//!
//! The ingestor boundary turns a compressed bundle into `(path, content)`
//! pairs. Directory entries never come out of it. The default implementation
//! reads zip archives on the blocking pool so large bundles do not stall the
//! runtime.

use crate::types::{Result, VfsError};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::{Cursor, Read, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// One file read out of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path as recorded in the archive (not yet normalized)
    pub path: String,
    /// File content
    pub content: Bytes,
}

/// Expands compressed bundles.
///
/// Implementations must either return every file entry or fail; the store
/// relies on this to discard a batch without partial ingestion.
#[async_trait]
pub trait ArchiveIngestor: Send + Sync {
    /// Expands `content`, named `name` for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::InvalidArchive` if the content is not a readable
    /// archive.
    async fn expand(&self, name: &str, content: Bytes) -> Result<Vec<ArchiveEntry>>;
}

/// Zip archive ingestor.
///
/// # Examples
///
/// ```
/// use html_viewer_vfs::archive::{ArchiveIngestor, ZipIngestor, write_zip};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> html_viewer_vfs::Result<()> {
/// let bytes = write_zip([("index.html", b"<html></html>".as_slice())])?;
/// let entries = ZipIngestor.expand("site.zip", bytes.into()).await?;
/// assert_eq!(entries[0].path, "index.html");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipIngestor;

#[async_trait]
impl ArchiveIngestor for ZipIngestor {
    async fn expand(&self, name: &str, content: Bytes) -> Result<Vec<ArchiveEntry>> {
        let archive = name.to_string();
        tokio::task::spawn_blocking(move || read_zip(&archive, content))
            .await
            .map_err(|e| VfsError::InvalidArchive {
                archive: name.to_string(),
                message: format!("expansion task failed: {e}"),
            })?
    }
}

fn read_zip(name: &str, content: Bytes) -> Result<Vec<ArchiveEntry>> {
    let invalid = |e: &dyn std::fmt::Display| VfsError::InvalidArchive {
        archive: name.to_string(),
        message: e.to_string(),
    };

    let mut archive = ZipArchive::new(Cursor::new(content)).map_err(|e| invalid(&e))?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|e| invalid(&e))?;
        if file.is_dir() {
            continue;
        }

        let path = file.name().to_string();
        let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
        file.read_to_end(&mut buf).map_err(|e| invalid(&e))?;

        debug!(archive = name, path = %path, size = buf.len(), "expanded entry");
        entries.push(ArchiveEntry {
            path,
            content: Bytes::from(buf),
        });
    }

    Ok(entries)
}

/// Writes `(path, content)` pairs into a deflate-compressed zip archive.
///
/// # Errors
///
/// Returns `VfsError::InvalidArchive` if the writer fails.
pub fn write_zip<'a>(files: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Result<Vec<u8>> {
    let invalid = |e: &dyn std::fmt::Display| VfsError::InvalidArchive {
        archive: "(export)".to_string(),
        message: e.to_string(),
    };

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (path, content) in files {
        writer.start_file(path, options).map_err(|e| invalid(&e))?;
        writer.write_all(content).map_err(|e| invalid(&e))?;
    }

    let cursor = writer.finish().map_err(|e| invalid(&e))?;
    Ok(cursor.into_inner())
}
