//! Core types, traits, and errors for the HTML bundle viewer.
//!
//! This crate provides the foundational types and abstractions used across
//! all other crates in the viewer workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Error hierarchy with contextual information
//! - Runtime configuration and persisted preferences
//! - Collaborator traits for snapshot storage, pause signaling, the
//!   navigating surface and user dialogs
//! - CLI strong types

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod preferences;

pub mod cli;
pub mod traits;

pub use config::{CONTROL_SEGMENT, VIRTUAL_SEGMENT, ViewerConfig, ViewerConfigBuilder};
pub use error::{Error, Result};
pub use preferences::{DEFAULT_PROXY_TEMPLATE, Preferences, URL_PLACEHOLDER};
