//! Persisted user preferences.
//!
//! Preferences live outside the content store's lifecycle and survive across
//! runs. They are stored in TOML format at:
//! - Linux: `~/.config/html-viewer/preferences.toml`
//! - macOS: `~/Library/Application Support/html-viewer/preferences.toml`
//! - Windows: `%APPDATA%\html-viewer\preferences.toml`
//!
//! # Examples
//!
//! ```toml
//! hide_fullscreen_hint = true
//! user_agent = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
//! proxy_template = "https://relay.example/?target={url}"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Placeholder substituted with the percent-encoded target URL.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Public CORS relay used when no custom proxy template is configured.
pub const DEFAULT_PROXY_TEMPLATE: &str = "https://corsproxy.io/?url={url}";

/// User preferences that persist across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Skip the fullscreen exit-gesture hint.
    #[serde(default)]
    pub hide_fullscreen_hint: bool,

    /// Custom user agent applied to the navigating surface (best effort).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Custom request-rewriting template for external URLs.
    ///
    /// Must contain the `{url}` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_template: Option<String>,
}

impl Preferences {
    /// Returns the default preferences file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the platform config directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| Error::ConfigError {
            message: "failed to determine config directory".to_string(),
        })?;

        Ok(config_dir.join("html-viewer").join("preferences.toml"))
    }

    /// Loads preferences from `path`, returning defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file exists but cannot be read, and
    /// `Error::ConfigError` if it cannot be parsed or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Preferences file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        let prefs: Self = toml::from_str(&content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;

        prefs.validate()?;
        Ok(prefs)
    }

    /// Saves preferences to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let toml_str = toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize preferences: {e}"),
        })?;

        fs::write(path, toml_str).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Validates the preferences.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the proxy template lacks the `{url}`
    /// placeholder.
    pub fn validate(&self) -> Result<()> {
        if let Some(template) = &self.proxy_template
            && !template.contains(URL_PLACEHOLDER)
        {
            return Err(Error::ConfigError {
                message: format!("proxy_template must contain {URL_PLACEHOLDER}: {template}"),
            });
        }
        Ok(())
    }

    /// The configured proxy template, or the default relay.
    #[must_use]
    pub fn effective_proxy_template(&self) -> &str {
        self.proxy_template
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_PROXY_TEMPLATE)
    }

    /// The custom user agent, if one is set and non-blank.
    #[must_use]
    pub fn custom_user_agent(&self) -> Option<&str> {
        self.user_agent
            .as_deref()
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
    }

    /// Gets a preference value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "hide_fullscreen_hint" => Some(self.hide_fullscreen_hint.to_string()),
            "user_agent" => self.user_agent.clone(),
            "proxy_template" => self.proxy_template.clone(),
            _ => None,
        }
    }

    /// Sets a preference value by key. An empty value or `none` unsets
    /// optional keys.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for unknown keys or malformed values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let optional = || {
            if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.to_string())
            }
        };

        match key {
            "hide_fullscreen_hint" => {
                self.hide_fullscreen_hint = value.parse().map_err(|_| {
                    Error::InvalidArgument(format!(
                        "invalid value for hide_fullscreen_hint, must be true or false: {value}"
                    ))
                })?;
            }
            "user_agent" => self.user_agent = optional(),
            "proxy_template" => self.proxy_template = optional(),
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "unknown preference key: {key}"
                )));
            }
        }
        self.validate()
    }

    /// Keys accepted by [`Preferences::get`] and [`Preferences::set`].
    #[must_use]
    pub const fn keys() -> &'static [&'static str] {
        &["hide_fullscreen_hint", "user_agent", "proxy_template"]
    }
}
