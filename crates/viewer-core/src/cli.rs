//! CLI-specific types and utilities.
//!
//! Strong types for the shell's output format and process exit codes.
//!
//! # Examples
//!
//! ```
//! use html_viewer_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format.as_str(), "json");
//!
//! assert!(ExitCode::SUCCESS.is_success());
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// All formats carry the same information with different presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Pretty-printed output with colors for human reading
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// CLI exit code with semantic meaning.
///
/// Only the non-interactive subcommands exit with these; inside the
/// interactive shell every failure is a message, not an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid input or arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Requested file missing from the bundle (exit code 3).
    pub const NOT_FOUND: Self = Self(3);

    /// Archive could not be read (exit code 4).
    pub const INGEST_ERROR: Self = Self(4);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Maps an error to the exit code that classifies it.
    ///
    /// # Examples
    ///
    /// ```
    /// use html_viewer_core::Error;
    /// use html_viewer_core::cli::ExitCode;
    ///
    /// let err = Error::NotFound { path: "index.html".to_string() };
    /// assert_eq!(ExitCode::for_error(&err), ExitCode::NOT_FOUND);
    /// ```
    #[must_use]
    pub const fn for_error(error: &Error) -> Self {
        match error {
            Error::NotFound { .. } => Self::NOT_FOUND,
            Error::Ingest { .. } => Self::INGEST_ERROR,
            Error::InvalidArgument(_) | Error::ConfigError { .. } => Self::INVALID_INPUT,
            _ => Self::ERROR,
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
