//! Implements the `serve` command.
//!
//! Starts the interception server, builds a session around a console
//! surface and a terminal prompter, and reads shell commands until `quit`
//! or end of input. Failures inside the shell are printed and the shell
//! carries on; only startup failures end the command.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use html_viewer_core::cli::{ExitCode, OutputFormat};
use html_viewer_core::{Preferences, ViewerConfig};
use html_viewer_server::{BroadcastPauseChannel, MemorySnapshot, PreviewServer, Publisher};
use html_viewer_session::{AddressResolver, Mode, Outcome, RunButton, Session, SessionObservers};
use html_viewer_vfs::UploadBatch;
use serde::Serialize;
use std::io::IsTerminal;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use super::common::{LoadSummary, print_error, report_error};
use super::config::preferences_path;
use super::list::FileRow;
use super::shell::{HELP, ShellCommand};
use crate::console::{ConsoleSurface, DialoguerPrompter};
use crate::formatters::format_output;

const PROMPT: &str = "html-viewer";

const FULLSCREEN_ON: &str = "Fullscreen on. Tap any corner 4 times to exit.";
const FULLSCREEN_OFF: &str = "Fullscreen off.";

/// Options for the serve command.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Inputs loaded before the shell starts
    pub paths: Vec<PathBuf>,
    /// Port to bind
    pub port: u16,
    /// Address to bind
    pub bind: IpAddr,
    /// Application base path
    pub base_path: String,
    /// Address opened once the inputs are loaded
    pub entry: Option<String>,
    /// Route external sites through the proxy template
    pub proxy: bool,
    /// Explicit preferences file
    pub preferences: Option<PathBuf>,
}

/// Session status, as printed by `status`.
#[derive(Debug, Clone, Serialize)]
struct StatusView {
    mode: &'static str,
    address: String,
    control: &'static str,
    fullscreen: bool,
    progress: Option<u8>,
    history: String,
    files: usize,
    inspecting: Option<String>,
    advisory: Option<&'static str>,
}

/// Runs the serve command.
///
/// # Errors
///
/// Returns an error if the preview URL cannot be built. Startup failures
/// with a dedicated exit code are reported and mapped instead.
pub async fn run(options: ServeOptions, output_format: OutputFormat) -> Result<ExitCode> {
    let prefs_path = preferences_path(options.preferences)?;
    let prefs = match Preferences::load(&prefs_path) {
        Ok(prefs) => prefs,
        Err(e) => return Ok(report_error(&e)),
    };

    let config = ViewerConfig::builder()
        .bind_addr(options.bind)
        .port(options.port)
        .base_path(options.base_path)
        .build();

    let snapshot = Arc::new(MemorySnapshot::new());
    let pause = Arc::new(BroadcastPauseChannel::default());
    let mut server = match PreviewServer::start(&config, snapshot.clone(), pause.clone()).await {
        Ok(server) => server,
        Err(e) => return Ok(report_error(&e)),
    };

    let vfs_base = Url::parse(&format!("{}{}", server.origin(), config.virtual_prefix()))
        .context("failed to build preview base URL")?;
    let proxy = options
        .proxy
        .then(|| prefs.effective_proxy_template().to_string());
    let resolver = AddressResolver::new(vfs_base).with_proxy(proxy);

    let surface = Arc::new(ConsoleSurface::new());
    let session = Session::builder(
        Publisher::new(snapshot, config.virtual_prefix()),
        resolver,
        surface.clone(),
        pause,
        Arc::new(DialoguerPrompter),
    )
    .preferences(prefs)
    .preferences_path(prefs_path)
    .build();

    println!(
        "{} Preview server listening on {}",
        "✓".green().bold(),
        server.base_url().bold()
    );

    let shell = Shell {
        surface,
        output_format,
    };
    let session = Arc::new(Mutex::new(session));

    {
        let mut session = session.lock().await;
        if !options.paths.is_empty() {
            shell
                .dispatch(&mut session, ShellCommand::Add(options.paths))
                .await;
        }
        if let Some(entry) = options.entry {
            shell.dispatch(&mut session, ShellCommand::Go(entry)).await;
        }
    }

    let mut observers = SessionObservers::spawn(&session, &config);
    let interactive = std::io::stdin().is_terminal();
    if interactive {
        println!("{}", "Type 'help' for commands.".dimmed());
    }

    while let Some(line) = read_line(interactive).await {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                print_error(&e);
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        shell.dispatch(&mut *session.lock().await, command).await;
    }

    observers.stop();
    server.shutdown();
    info!("shell closed");

    Ok(ExitCode::SUCCESS)
}

/// Reads one shell line. Returns `None` at end of input.
async fn read_line(interactive: bool) -> Option<String> {
    tokio::task::spawn_blocking(move || {
        if interactive {
            return Input::<String>::new()
                .with_prompt(PROMPT)
                .allow_empty(true)
                .interact_text()
                .ok();
        }
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    })
    .await
    .ok()
    .flatten()
}

/// Executes shell commands against a session.
#[derive(Debug)]
struct Shell {
    surface: Arc<ConsoleSurface>,
    output_format: OutputFormat,
}

impl Shell {
    /// Runs one command and prints its failure, if any.
    async fn dispatch(&self, session: &mut Session, command: ShellCommand) {
        let navigations = self.surface.navigations();
        debug!(?command, "shell command");

        if let Err(e) = self.execute(session, command).await {
            eprintln!("{} {e:#}", "✗".red().bold());
        }

        if self.surface.navigations() != navigations {
            session.on_surface_loaded();
            println!("{}", session.address().bold());
            if let Some(advisory) = session.advisory() {
                println!("{} {advisory}", "⚠".yellow().bold());
            }
        }
    }

    async fn execute(&self, session: &mut Session, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Go(address) => report_outcome(session.navigate(&address).await?),
            ShellCommand::Replace(address) => {
                report_outcome(session.navigate_replacing(&address).await?);
            }
            ShellCommand::Back => {
                if !session.go_back().await? {
                    println!("{}", "Nothing to go back to.".dimmed());
                }
            }
            ShellCommand::Forward => {
                if !session.go_forward().await? {
                    println!("{}", "Nothing to go forward to.".dimmed());
                }
            }
            ShellCommand::Run => report_outcome(session.run().await?),
            ShellCommand::Pause => report_pause(session.set_paused(true), "Paused."),
            ShellCommand::Resume => report_pause(session.set_paused(false), "Resumed."),
            ShellCommand::Stop => {
                if session.stop().await? == Outcome::Completed {
                    println!("{}", "Stopped.".dimmed());
                } else {
                    report_outcome(Outcome::Cancelled);
                }
            }
            ShellCommand::Inspect(path) => {
                if session.inspect(&path).await? == Outcome::Completed {
                    print_inspected(session);
                } else {
                    report_outcome(Outcome::Cancelled);
                }
            }
            ShellCommand::Edit => {
                session.begin_edit()?;
                println!(
                    "{}",
                    "Editing. Use 'write <text>', then 'save' or 'cancel'.".dimmed()
                );
            }
            ShellCommand::Write(text) => session.edit_text(text)?,
            ShellCommand::Save => {
                session.save_text()?;
                if let Some(file) = session.inspected() {
                    println!("{} Saved {}", "✓".green().bold(), file.path);
                }
            }
            ShellCommand::Cancel => {
                session.cancel_edit()?;
                println!("{}", "Edits discarded.".dimmed());
            }
            ShellCommand::Show => print_inspected(session),
            ShellCommand::Download(dir) => {
                let (name, content) = session.download_current()?;
                let dest = dir.unwrap_or_else(|| PathBuf::from(".")).join(name);
                write_file(&dest, &content).await?;
            }
            ShellCommand::Export(dest) => {
                let archive = session.export_all()?;
                write_file(&dest, &archive).await?;
            }
            ShellCommand::List => {
                let rows: Vec<FileRow> = session.list().iter().map(FileRow::from).collect();
                println!("{}", format_output(&rows, self.output_format)?);
            }
            ShellCommand::Add(paths) => {
                let batch = UploadBatch::from_paths(&paths)?;
                let flatten = session.store().is_empty();
                let summary = LoadSummary::from(session.upload(batch, flatten).await?);
                println!("{}", format_output(&summary, self.output_format)?);
            }
            ShellCommand::Clear => {
                session.clear_all().await?;
                println!("{} Cleared all files", "✓".green().bold());
            }
            ShellCommand::Fullscreen => {
                let was_fullscreen = session.is_fullscreen();
                let now_fullscreen = session.toggle_fullscreen().await;
                if let Some(message) = fullscreen_message(was_fullscreen, now_fullscreen) {
                    println!("{}", message.dimmed());
                }
            }
            ShellCommand::Corner(corner) => {
                if session.tap_corner(corner) {
                    println!("{}", FULLSCREEN_OFF.dimmed());
                }
            }
            ShellCommand::Link(href) => {
                if !session.follow_link(&href).await? {
                    println!("{}", "Link ignored.".dimmed());
                }
            }
            ShellCommand::Drift(location) => self.surface.drift_to(location),
            ShellCommand::Loaded => session.on_surface_loaded(),
            ShellCommand::Status => {
                println!("{}", format_output(&status(session), self.output_format)?);
            }
            ShellCommand::History => print_history(session),
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => {}
        }
        Ok(())
    }
}

async fn write_file(dest: &Path, content: &[u8]) -> Result<()> {
    tokio::fs::write(dest, content)
        .await
        .with_context(|| format!("failed to write {}", dest.display()))?;
    println!(
        "{} Wrote {} ({} bytes)",
        "✓".green().bold(),
        dest.display(),
        content.len()
    );
    Ok(())
}

/// Message for a fullscreen toggle; `None` when nothing changed (hint
/// declined, or no preview running).
const fn fullscreen_message(was_fullscreen: bool, now_fullscreen: bool) -> Option<&'static str> {
    match (was_fullscreen, now_fullscreen) {
        (false, true) => Some(FULLSCREEN_ON),
        (true, false) => Some(FULLSCREEN_OFF),
        _ => None,
    }
}

fn report_outcome(outcome: Outcome) {
    if outcome == Outcome::Cancelled {
        println!("{}", "Cancelled.".yellow());
    }
}

fn report_pause(applied: bool, message: &str) {
    if applied {
        println!("{}", message.dimmed());
    } else {
        println!("{}", "No site is running.".dimmed());
    }
}

fn print_inspected(session: &Session) {
    let Some(file) = session.inspected() else {
        println!("{}", "No file is open.".dimmed());
        return;
    };

    let modified = if file.has_unsaved_edits() {
        " (modified)"
    } else {
        ""
    };
    println!(
        "{}{} {}",
        file.path.to_string().bold(),
        modified.yellow(),
        format!("[{}, {}, {} bytes]", file.kind.as_str(), file.media_type, file.content.len())
            .dimmed()
    );
    match &file.text {
        Some(buffer) => println!("{}", buffer.text()),
        None => println!("{}", "Binary content; use 'download' to save it.".dimmed()),
    }
}

fn print_history(session: &Session) {
    let history = session.history();
    if history.is_empty() {
        println!("{}", "History is empty.".dimmed());
        return;
    }
    for (i, location) in history.entries().iter().enumerate() {
        let display = session.resolver().display(location);
        if history.index() == Some(i) {
            println!("{} {}", "*".green().bold(), display.bold());
        } else {
            println!("  {display}");
        }
    }
}

fn status(session: &Session) -> StatusView {
    let affordances = session.affordances();
    let history = session.history();
    StatusView {
        mode: match session.mode() {
            Mode::Inactive => "inactive",
            Mode::Site => "site",
            Mode::FileInspect => "file",
        },
        address: session.address().to_string(),
        control: match affordances.run_button {
            RunButton::Run => "run",
            RunButton::Pause => "pause",
            RunButton::Resume => "resume",
        },
        fullscreen: session.is_fullscreen(),
        progress: session
            .progress()
            .visible()
            .then(|| session.progress().percent()),
        history: history
            .index()
            .map_or_else(|| "-".to_string(), |i| format!("{}/{}", i + 1, history.len())),
        files: session.store().len(),
        inspecting: session.inspected().map(|file| file.path.to_string()),
        advisory: session.advisory(),
    }
}
