//! Interactive shell command grammar.
//!
//! Each line typed at the `serve` prompt parses into a [`ShellCommand`].
//! The first word selects the command; the rest of the line is its
//! argument, taken verbatim so addresses and edited text keep their spaces.

use html_viewer_core::Error;
use html_viewer_session::Corner;
use std::path::PathBuf;
use std::str::FromStr;

/// One shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Navigate to an address (blank opens the index page)
    Go(String),
    /// Navigate, replacing the current history entry
    Replace(String),
    /// Step back in history
    Back,
    /// Step forward in history
    Forward,
    /// The run/pause/resume control
    Run,
    /// Pause the running site
    Pause,
    /// Resume the running site
    Resume,
    /// Stop the preview
    Stop,
    /// Inspect a stored file
    Inspect(String),
    /// Start editing the inspected text file
    Edit,
    /// Replace the edit buffer; `\n` is a line break
    Write(String),
    /// Save the edit buffer
    Save,
    /// Discard the edit buffer
    Cancel,
    /// Print the inspected file
    Show,
    /// Save the inspected file to a directory (default: current)
    Download(Option<PathBuf>),
    /// Save the whole bundle as a zip archive
    Export(PathBuf),
    /// List stored files
    List,
    /// Load more files, folders or archives
    Add(Vec<PathBuf>),
    /// Remove every file and stop the preview
    Clear,
    /// Enter or leave fullscreen
    Fullscreen,
    /// Tap a screen corner
    Corner(Corner),
    /// Follow a link from the loaded page
    Link(String),
    /// Simulate the page navigating by itself
    Drift(String),
    /// Report that the surface finished loading
    Loaded,
    /// Print the session status
    Status,
    /// Print the navigation history
    History,
    /// Print the command list
    Help,
    /// Leave the shell
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
go <address>        open a bundle path or URL (blank: index.html)
replace <address>   open, replacing the current history entry
back | forward      move through history
run                 run / pause / resume
pause | resume      pause or resume the running site
stop                stop the preview
inspect <path>      preview a single file
edit | write <text> | save | cancel
show                print the inspected file
download [dir]      save the inspected file
export <file.zip>   save the whole bundle
ls | add <paths..> | clear
fullscreen          toggle fullscreen
corner <tl|tr|bl|br>  tap a corner (4 taps exit fullscreen)
link <href>         follow a link from the page
drift <url>         simulate an in-page navigation
loaded              report the page finished loading
status | history | help | quit";

impl FromStr for ShellCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word.to_lowercase().as_str() {
            "go" | "open" => Self::Go(rest.to_string()),
            "replace" => Self::Replace(rest.to_string()),
            "back" => Self::Back,
            "forward" => Self::Forward,
            "run" => Self::Run,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "stop" => Self::Stop,
            "inspect" => Self::Inspect(required(word, rest)?),
            "edit" => Self::Edit,
            "write" => Self::Write(rest.replace("\\n", "\n")),
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "show" | "cat" => Self::Show,
            "download" => Self::Download((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "export" => Self::Export(PathBuf::from(required(word, rest)?)),
            "ls" | "list" => Self::List,
            "add" => {
                let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
                if paths.is_empty() {
                    return Err(missing_argument(word));
                }
                Self::Add(paths)
            }
            "clear" => Self::Clear,
            "fullscreen" | "fs" => Self::Fullscreen,
            "corner" => Self::Corner(
                required(word, rest)?
                    .parse()
                    .map_err(Error::InvalidArgument)?,
            ),
            "link" => Self::Link(rest.to_string()),
            "drift" => Self::Drift(required(word, rest)?),
            "loaded" => Self::Loaded,
            "status" => Self::Status,
            "history" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "" => return Err(Error::InvalidArgument("empty command".to_string())),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unknown command '{other}' (type 'help')"
                )));
            }
        };
        Ok(command)
    }
}

fn required(word: &str, rest: &str) -> Result<String, Error> {
    if rest.is_empty() {
        Err(missing_argument(word))
    } else {
        Ok(rest.to_string())
    }
}

fn missing_argument(word: &str) -> Error {
    Error::InvalidArgument(format!("'{word}' needs an argument (type 'help')"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        line.parse().unwrap()
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse("go"), ShellCommand::Go(String::new()));
        assert_eq!(
            parse("go  docs/a page.html "),
            ShellCommand::Go("docs/a page.html".to_string())
        );
        assert_eq!(
            parse("OPEN example.com"),
            ShellCommand::Go("example.com".to_string())
        );
        assert_eq!(parse("back"), ShellCommand::Back);
        assert_eq!(parse("link #top"), ShellCommand::Link("#top".to_string()));
    }

    #[test]
    fn test_parse_editing() {
        assert_eq!(
            parse("write line one\\nline two"),
            ShellCommand::Write("line one\nline two".to_string())
        );
        assert_eq!(parse("write"), ShellCommand::Write(String::new()));
        assert_eq!(parse("download"), ShellCommand::Download(None));
        assert_eq!(
            parse("download out"),
            ShellCommand::Download(Some(PathBuf::from("out")))
        );
    }

    #[test]
    fn test_parse_required_arguments() {
        assert!("inspect".parse::<ShellCommand>().is_err());
        assert!("export".parse::<ShellCommand>().is_err());
        assert!("add".parse::<ShellCommand>().is_err());
        assert!("corner".parse::<ShellCommand>().is_err());
        assert!("corner middle".parse::<ShellCommand>().is_err());
        assert_eq!(parse("corner tl"), ShellCommand::Corner(Corner::TopLeft));
        assert_eq!(
            parse("add a.zip site"),
            ShellCommand::Add(vec![PathBuf::from("a.zip"), PathBuf::from("site")])
        );
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert!("".parse::<ShellCommand>().is_err());
        assert!("   ".parse::<ShellCommand>().is_err());
        assert!("launch".parse::<ShellCommand>().is_err());
    }
}
