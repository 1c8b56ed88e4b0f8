//! Implements the `list` command.
//!
//! Loads the inputs the way `serve` would and prints the resulting store in
//! display order, marking which files can be inspected.

use anyhow::{Context, Result};
use html_viewer_core::cli::{ExitCode, OutputFormat};
use html_viewer_vfs::ListedEntry;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{load_store, report_error};
use crate::formatters::format_output;

/// One row of the listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileRow {
    /// Normalized path
    pub path: String,
    /// Size in bytes
    pub size: usize,
    /// Renderer label, `None` when the file cannot be inspected
    pub preview: Option<&'static str>,
}

impl From<&ListedEntry> for FileRow {
    fn from(entry: &ListedEntry) -> Self {
        Self {
            path: entry.path.to_string(),
            size: entry.size,
            preview: entry.preview.map(|kind| kind.as_str()),
        }
    }
}

/// Runs the list command.
///
/// # Errors
///
/// Returns an error if output formatting fails. Load failures are reported
/// and mapped to an exit code.
pub async fn run(paths: &[PathBuf], output_format: OutputFormat) -> Result<ExitCode> {
    let store = match load_store(paths).await {
        Ok((store, _)) => store,
        Err(e) => return Ok(report_error(&e)),
    };

    let rows: Vec<FileRow> = store.list().iter().map(FileRow::from).collect();
    let formatted = format_output(&rows, output_format).context("failed to format listing")?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use html_viewer_vfs::ContentStore;

    #[test]
    fn test_file_row_marks_previewable() {
        let mut store = ContentStore::new();
        store.put("index.html", "<p>hi</p>", None);
        store.put("blob.bin", vec![0_u8, 1, 2], None);

        let rows: Vec<FileRow> = store.list().iter().map(FileRow::from).collect();
        let bin = rows.iter().find(|r| r.path == "blob.bin").unwrap();
        assert_eq!(bin.preview, None);
        assert_eq!(bin.size, 3);

        let html = rows.iter().find(|r| r.path == "index.html").unwrap();
        assert_eq!(html.preview, Some("text"));
    }
}
