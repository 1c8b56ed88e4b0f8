//! HTML Viewer CLI.
//!
//! Previews HTML bundles (loose files, folders or zip archives) entirely
//! from memory through a local interception server.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `serve` - Start the preview server and the interactive shell
//! - `list` - Show what a set of inputs would load
//! - `pack` - Bundle inputs into one zip archive
//! - `config` - Manage persisted preferences
//!
//! # Examples
//!
//! ```bash
//! # Preview a folder and open its index page
//! html-viewer serve ./site --entry ""
//!
//! # Hide the fullscreen hint for good
//! html-viewer config set hide_fullscreen_hint true
//! ```

use anyhow::Result;
use clap::Parser;
use html_viewer_cli::Cli;
use html_viewer_cli::runner::{execute_command, init_logging};
use html_viewer_core::cli::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_format)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = execute_command(cli.command, output_format, cli.preferences).await?;

    std::process::exit(exit_code.as_i32());
}

#[cfg(test)]
mod tests {
    use super::*;
    use html_viewer_cli::Commands;

    #[test]
    fn test_cli_parsing_serve() {
        let cli = Cli::parse_from(["html-viewer", "serve", "site"]);
        assert!(matches!(cli.command, Commands::Serve { .. }));
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::parse_from(["html-viewer", "list", "site"]);
        assert_eq!(cli.format, "pretty");
        assert_eq!(cli.format.parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
    }

    #[test]
    fn test_cli_preferences_flag() {
        let cli = Cli::parse_from([
            "html-viewer",
            "--preferences",
            "/tmp/prefs.toml",
            "config",
            "show",
        ]);
        assert_eq!(
            cli.preferences.as_deref(),
            Some(std::path::Path::new("/tmp/prefs.toml"))
        );
    }

    #[test]
    fn test_output_format_parsing_invalid() {
        assert!("invalid".parse::<OutputFormat>().is_err());
    }
}
