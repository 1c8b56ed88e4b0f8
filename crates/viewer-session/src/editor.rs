//! Text buffer for the inspected file.

/// Edited text plus the baseline it is compared against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    baseline: String,
    text: String,
    editing: bool,
}

impl TextBuffer {
    /// Opens a read-only buffer over `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            baseline: text.clone(),
            text,
            editing: false,
        }
    }

    /// Switches to editing.
    pub const fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Replaces the working text. Ignored unless editing.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.editing {
            self.text = text.into();
        }
    }

    /// Drops edits and leaves editing.
    pub fn cancel_edit(&mut self) {
        self.text.clone_from(&self.baseline);
        self.editing = false;
    }

    /// Adopts the working text as the new baseline. Editing stays on.
    pub fn commit(&mut self) -> &str {
        self.baseline.clone_from(&self.text);
        &self.text
    }

    /// Returns `true` while editing with text that differs from the baseline.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.editing && self.text != self.baseline
    }

    /// Returns `true` while editing.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// The working text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_only_while_editing() {
        let mut buffer = TextBuffer::new("a");
        buffer.set_text("b");
        assert_eq!(buffer.text(), "a");
        assert!(!buffer.is_dirty());

        buffer.begin_edit();
        assert!(!buffer.is_dirty());
        buffer.set_text("b");
        assert!(buffer.is_dirty());
        buffer.set_text("a");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_cancel_restores_baseline() {
        let mut buffer = TextBuffer::new("a");
        buffer.begin_edit();
        buffer.set_text("b");
        buffer.cancel_edit();
        assert_eq!(buffer.text(), "a");
        assert!(!buffer.is_editing());
    }

    #[test]
    fn test_commit_moves_baseline() {
        let mut buffer = TextBuffer::new("a");
        buffer.begin_edit();
        buffer.set_text("b");
        assert_eq!(buffer.commit(), "b");
        assert!(!buffer.is_dirty());
        assert!(buffer.is_editing());
    }
}
