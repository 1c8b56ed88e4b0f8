//! Common utilities shared across CLI commands.

use colored::Colorize;
use html_viewer_core::Error;
use html_viewer_core::cli::ExitCode;
use html_viewer_vfs::{ContentStore, IngestOptions, IngestReport, UploadBatch, ZipIngestor};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Summary of one loaded batch, for display.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    /// Entries written to the store
    pub stored: usize,
    /// Entries dropped as ignorable
    pub skipped: usize,
    /// Archive the bundle was expanded from
    pub extracted_from: Option<String>,
    /// Whether the wrapper folder was dropped
    pub flattened: bool,
}

impl From<IngestReport> for LoadSummary {
    fn from(report: IngestReport) -> Self {
        Self {
            stored: report.stored,
            skipped: report.skipped,
            extracted_from: report.extracted_from,
            flattened: report.flattened,
        }
    }
}

/// Reads files, folders and archives from disk into a fresh store.
///
/// A single folder is flattened, so `site/index.html` lands at `index.html`.
///
/// # Errors
///
/// Returns `Error::Io` if an input cannot be read and `Error::Ingest` if
/// an archive is corrupt.
///
/// # Examples
///
/// ```no_run
/// use html_viewer_cli::commands::common::load_store;
///
/// # async fn example() -> html_viewer_core::Result<()> {
/// let (store, summary) = load_store(&["site"]).await?;
/// assert_eq!(store.len(), summary.stored);
/// # Ok(())
/// # }
/// ```
pub async fn load_store<P: AsRef<Path>>(paths: &[P]) -> Result<(ContentStore, LoadSummary), Error> {
    let batch = UploadBatch::from_paths(paths)?;
    debug!(items = batch.len(), "loaded inputs from disk");

    let mut store = ContentStore::new();
    let options = IngestOptions {
        flatten_single_root: true,
    };
    let report = store.ingest_batch(batch, options, &ZipIngestor).await?;
    Ok((store, report.into()))
}

/// Prints a user-facing failure.
pub fn print_error(error: &Error) {
    eprintln!("{} {error}", "✗".red().bold());
}

/// Prints a user-facing failure and returns the exit code that classifies it.
#[must_use]
pub fn report_error(error: &Error) -> ExitCode {
    print_error(error);
    ExitCode::for_error(error)
}
