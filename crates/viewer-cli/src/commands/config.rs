//! Implements the `config` command.
//!
//! Reads and writes the persisted preferences file.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use html_viewer_core::Preferences;
use html_viewer_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::common::report_error;
use crate::actions::ConfigAction;
use crate::formatters::format_output;

/// A single preference value.
#[derive(Debug, Clone, Serialize)]
struct PreferenceValue {
    key: String,
    value: Option<String>,
}

/// Resolves the preferences file: an explicit path wins over the platform
/// default.
///
/// # Errors
///
/// Returns an error if no explicit path is given and the platform config
/// directory cannot be determined.
pub fn preferences_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Preferences::default_path().context("failed to locate preferences file"),
    }
}

/// Runs the config command.
///
/// # Errors
///
/// Returns an error for unknown keys and if output formatting fails.
pub async fn run(
    action: ConfigAction,
    preferences: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let path = preferences_path(preferences)?;

    match action {
        ConfigAction::Show => show_preferences(&path, output_format),
        ConfigAction::Get { key } => get_preference(&path, key, output_format),
        ConfigAction::Set { key, value } => set_preference(&path, &key, &value),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show_preferences(path: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let prefs = match Preferences::load(path) {
        Ok(prefs) => prefs,
        Err(e) => return Ok(report_error(&e)),
    };

    let formatted = format_output(&prefs, output_format).context("failed to format preferences")?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

fn get_preference(path: &Path, key: String, output_format: OutputFormat) -> Result<ExitCode> {
    if !Preferences::keys().contains(&key.as_str()) {
        bail!(
            "preference key '{key}' not found\n\nAvailable keys:\n  {}",
            Preferences::keys().join("\n  ")
        );
    }

    let prefs = match Preferences::load(path) {
        Ok(prefs) => prefs,
        Err(e) => return Ok(report_error(&e)),
    };

    let result = PreferenceValue {
        value: prefs.get(&key),
        key,
    };
    let formatted = format_output(&result, output_format).context("failed to format value")?;
    println!("{formatted}");

    Ok(ExitCode::SUCCESS)
}

fn set_preference(path: &Path, key: &str, value: &str) -> Result<ExitCode> {
    let mut prefs = match Preferences::load(path) {
        Ok(prefs) => prefs,
        Err(e) => return Ok(report_error(&e)),
    };

    if let Err(e) = prefs.set(key, value).and_then(|()| prefs.save(path)) {
        return Ok(report_error(&e));
    }
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);

    Ok(ExitCode::SUCCESS)
}
