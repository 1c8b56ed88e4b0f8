//! Command execution and runtime logic.
//!
//! Contains the command dispatcher and logging initialization.

use anyhow::Result;
use html_viewer_core::cli::{ExitCode, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Commands, LogFormat};
use crate::commands;
use crate::commands::serve::ServeOptions;

/// Initializes logging infrastructure.
///
/// Verbose mode forces the debug level; otherwise `RUST_LOG` is honored
/// with `info` as the fallback. Logs always go to stderr so they never mix
/// with command output.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool, log_format: LogFormat) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match log_format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if command execution fails in a way that has no
/// dedicated exit code.
pub async fn execute_command(
    command: Commands,
    output_format: OutputFormat,
    preferences: Option<PathBuf>,
) -> Result<ExitCode> {
    match command {
        Commands::Serve {
            paths,
            port,
            bind,
            base_path,
            entry,
            proxy,
        } => {
            let options = ServeOptions {
                paths,
                port,
                bind,
                base_path,
                entry,
                proxy,
                preferences,
            };
            commands::serve::run(options, output_format).await
        }
        Commands::List { paths } => commands::list::run(&paths, output_format).await,
        Commands::Pack { paths, output } => {
            commands::pack::run(&paths, &output, output_format).await
        }
        Commands::Config { action } => {
            commands::config::run(action, preferences, output_format).await
        }
    }
}
