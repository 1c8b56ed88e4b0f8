//! User dialog trait.

use async_trait::async_trait;

/// Answer to the unsaved-edit guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    /// Save the edited text, then proceed
    Save,
    /// Drop the edits, then proceed
    Discard,
    /// Abort the switch and stay on the current file
    Cancel,
}

/// Answer to the fullscreen exit-gesture hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HintResponse {
    /// User chose to enter fullscreen
    pub confirmed: bool,
    /// User asked not to see the hint again
    pub dont_remind: bool,
}

/// Confirmation dialogs shown by the shell on behalf of the session.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Asks how to handle unsaved edits before switching away.
    async fn unsaved_changes(&self, message: &str) -> UnsavedChoice;

    /// Explains the fullscreen exit gesture and asks for confirmation.
    async fn fullscreen_hint(&self) -> HintResponse;

    /// Asks a yes/no question.
    async fn confirm(&self, message: &str) -> bool;
}
