//! Implements the `pack` command.
//!
//! Loads the inputs into one store and writes it out as a single zip
//! archive, the same archive a "download all" produces.

use anyhow::{Context, Result};
use html_viewer_core::Error;
use html_viewer_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::common::{load_store, report_error};
use crate::formatters::format_output;

/// Result of a pack run.
#[derive(Debug, Clone, Serialize)]
pub struct PackResult {
    /// Archive path
    pub output: String,
    /// Files packed
    pub files: usize,
    /// Archive size in bytes
    pub bytes: usize,
}

/// Runs the pack command.
///
/// # Errors
///
/// Returns an error if the archive cannot be written or output formatting
/// fails.
pub async fn run(paths: &[PathBuf], output: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let (store, _) = match load_store(paths).await {
        Ok(loaded) => loaded,
        Err(e) => return Ok(report_error(&e)),
    };

    let archive = match store.export_archive() {
        Ok(archive) => archive,
        Err(e) => return Ok(report_error(&Error::from(e))),
    };

    tokio::fs::write(output, &archive)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), files = store.len(), "packed bundle");

    let result = PackResult {
        output: output.display().to_string(),
        files: store.len(),
        bytes: archive.len(),
    };
    let formatted = format_output(&result, output_format).context("failed to format result")?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}
