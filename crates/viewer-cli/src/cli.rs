//! CLI argument definitions.
//!
//! Contains the main CLI structure and subcommand definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::actions::ConfigAction;

/// HTML Viewer - preview HTML bundles entirely from memory.
///
/// Loads files, folders and zip archives into an in-memory store, serves
/// them through a local interception server and drives the preview from an
/// interactive shell.
#[derive(Parser, Debug)]
#[command(name = "html-viewer")]
#[command(version, about, long_about = None)]
#[command(author = "HTML Viewer Team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Log line format
    #[arg(long = "log-format", global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Preferences file (defaults to the platform config directory)
    #[arg(long, global = true, env = "HTML_VIEWER_PREFERENCES")]
    pub preferences: Option<PathBuf>,
}

/// Log line format written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the preview server and the interactive shell.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Preview a folder, starting at its index page
    /// html-viewer serve ./site --entry ""
    ///
    /// # Preview a zip archive on a fixed port
    /// html-viewer serve bundle.zip --port 8080
    /// ```
    Serve {
        /// Files, folders or zip archives to load
        paths: Vec<PathBuf>,

        /// Port to bind; 0 picks an ephemeral port
        #[arg(short, long, env = "HTML_VIEWER_PORT", default_value_t = 0)]
        port: u16,

        /// Address to bind
        #[arg(long, env = "HTML_VIEWER_BIND", default_value = "127.0.0.1")]
        bind: IpAddr,

        /// Application base path, starting and ending with '/'
        #[arg(long, env = "HTML_VIEWER_BASE_PATH", default_value = "/")]
        base_path: String,

        /// Address to open once loaded (empty for the index page)
        #[arg(short, long)]
        entry: Option<String>,

        /// Route external sites through the configured proxy template
        #[arg(long)]
        proxy: bool,
    },

    /// List the files a set of inputs would load.
    ///
    /// # Examples
    ///
    /// ```bash
    /// html-viewer list ./site bundle.zip --format json
    /// ```
    List {
        /// Files, folders or zip archives to load
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Pack a set of inputs into one zip archive.
    ///
    /// # Examples
    ///
    /// ```bash
    /// html-viewer pack ./site -o site.zip
    /// ```
    Pack {
        /// Files, folders or zip archives to load
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Archive to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Manage persisted preferences.
    Config {
        /// Config action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_serve_defaults() {
        let cli = Cli::parse_from(["html-viewer", "serve"]);
        if let Commands::Serve {
            paths,
            port,
            base_path,
            entry,
            proxy,
            ..
        } = cli.command
        {
            assert!(paths.is_empty());
            assert_eq!(port, 0);
            assert_eq!(base_path, "/");
            assert_eq!(entry, None);
            assert!(!proxy);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_cli_parsing_serve_with_args() {
        let cli = Cli::parse_from([
            "html-viewer",
            "serve",
            "site",
            "extra.zip",
            "--port",
            "8080",
            "--entry",
            "about.html",
            "--proxy",
        ]);
        if let Commands::Serve {
            paths,
            port,
            entry,
            proxy,
            ..
        } = cli.command
        {
            assert_eq!(paths, vec![PathBuf::from("site"), PathBuf::from("extra.zip")]);
            assert_eq!(port, 8080);
            assert_eq!(entry.as_deref(), Some("about.html"));
            assert!(proxy);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_cli_parsing_list_requires_paths() {
        assert!(Cli::try_parse_from(["html-viewer", "list"]).is_err());
        let cli = Cli::parse_from(["html-viewer", "list", "site"]);
        assert!(matches!(cli.command, Commands::List { .. }));
    }

    #[test]
    fn test_cli_parsing_pack() {
        let cli = Cli::parse_from(["html-viewer", "pack", "site", "-o", "out.zip"]);
        if let Commands::Pack { paths, output } = cli.command {
            assert_eq!(paths, vec![PathBuf::from("site")]);
            assert_eq!(output, PathBuf::from("out.zip"));
        } else {
            panic!("Expected Pack command");
        }
    }

    #[test]
    fn test_cli_parsing_config_set() {
        let cli = Cli::parse_from(["html-viewer", "config", "set", "user_agent", "Test/1.0"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "user_agent");
            assert_eq!(value, "Test/1.0");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from([
            "html-viewer",
            "--verbose",
            "--log-format",
            "json",
            "list",
            "site",
            "--format",
            "json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.format, "json");
    }
}
