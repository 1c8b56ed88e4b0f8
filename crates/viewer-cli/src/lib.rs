//! HTML viewer CLI library.
//!
//! Exposes the argument definitions, command implementations, terminal
//! collaborators and formatters so they can be tested without the binary.

#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]

pub mod actions;
pub mod cli;
pub mod commands;
pub mod console;
pub mod formatters;
pub mod runner;

pub use actions::ConfigAction;
pub use cli::{Cli, Commands, LogFormat};
pub use console::{ConsoleSurface, DialoguerPrompter};
