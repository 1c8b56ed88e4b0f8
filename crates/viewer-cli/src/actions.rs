//! Action types for CLI subcommands.

use clap::Subcommand;

/// Preferences management actions.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show all preferences
    Show,

    /// Get a preference value
    Get {
        /// Preference key (`hide_fullscreen_hint`, `user_agent`, `proxy_template`)
        key: String,
    },

    /// Set a preference value; `none` or an empty value unsets it
    Set {
        /// Preference key
        key: String,
        /// New value
        value: String,
    },

    /// Print the preferences file path
    Path,
}
