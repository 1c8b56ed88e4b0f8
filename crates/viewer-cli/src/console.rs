//! Terminal implementations of the session collaborators.
//!
//! [`ConsoleSurface`] stands in for an embedded browser view: it records
//! where it was sent and prints the URL so it can be opened in a real
//! browser. [`DialoguerPrompter`] asks the session's questions on the
//! terminal.

use async_trait::async_trait;
use colored::Colorize;
use dialoguer::{Confirm, Select};
use html_viewer_core::traits::{HintResponse, Prompter, Surface, UnsavedChoice};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

const UNSAVED_CHOICES: [&str; 3] = ["Save", "Discard", "Cancel"];

const FULLSCREEN_HINT: &str = "Fullscreen hides the toolbar. Tap any corner 4 times to exit. Continue?";

/// Surface that prints navigations and remembers its location.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    location: Mutex<Option<String>>,
    user_agent: Mutex<Option<String>>,
    navigations: AtomicUsize,
}

impl ConsoleSurface {
    /// Creates a blank surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the surface without the session asking, as an in-page link
    /// or script navigation would.
    pub fn drift_to(&self, location: impl Into<String>) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = Some(location.into());
    }

    /// Number of navigations requested so far.
    ///
    /// A console surface loads instantly, so a changed count means a load
    /// just finished.
    #[must_use]
    pub fn navigations(&self) -> usize {
        self.navigations.load(Ordering::SeqCst)
    }

    /// The user agent last applied, if any.
    #[must_use]
    pub fn user_agent(&self) -> Option<String> {
        self.user_agent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Surface for ConsoleSurface {
    fn navigate(&self, url: &str) {
        println!("{} {}", "→".cyan().bold(), url.underline());
        self.navigations.fetch_add(1, Ordering::SeqCst);
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.to_string());
    }

    fn current_location(&self) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn blank(&self) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) =
            Some("about:blank".to_string());
    }

    fn apply_user_agent(&self, user_agent: &str) {
        debug!(user_agent, "user agent applied");
        *self.user_agent.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(user_agent.to_string());
    }
}

/// Prompter backed by `dialoguer`.
///
/// Prompts run on the blocking pool. When the terminal is unavailable
/// every question resolves to its cautious answer: cancel, decline.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn unsaved_changes(&self, message: &str) -> UnsavedChoice {
        let prompt = message.to_string();
        let picked = tokio::task::spawn_blocking(move || {
            Select::new()
                .with_prompt(prompt)
                .items(&UNSAVED_CHOICES)
                .default(0)
                .interact()
        })
        .await;

        match picked {
            Ok(Ok(0)) => UnsavedChoice::Save,
            Ok(Ok(1)) => UnsavedChoice::Discard,
            _ => UnsavedChoice::Cancel,
        }
    }

    async fn fullscreen_hint(&self) -> HintResponse {
        tokio::task::spawn_blocking(|| {
            let confirmed = Confirm::new()
                .with_prompt(FULLSCREEN_HINT)
                .default(true)
                .interact()
                .unwrap_or(false);
            let dont_remind = confirmed
                && Confirm::new()
                    .with_prompt("Don't remind me again?")
                    .default(false)
                    .interact()
                    .unwrap_or(false);
            HintResponse {
                confirmed,
                dont_remind,
            }
        })
        .await
        .unwrap_or_default()
    }

    async fn confirm(&self, message: &str) -> bool {
        let prompt = message.to_string();
        tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }
}
