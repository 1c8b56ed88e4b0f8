//! Command implementations for the HTML viewer CLI.
//!
//! Each command module loads its inputs, runs the operation, and formats
//! output according to the requested format.

pub mod common;
pub mod config;
pub mod list;
pub mod pack;
pub mod serve;
pub mod shell;
