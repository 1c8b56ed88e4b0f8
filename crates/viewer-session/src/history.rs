//! Navigation history.
//!
//! Browser-style back/forward list. Pushing a new location anywhere but the
//! tail discards the forward entries first; pushing the current location
//! again changes nothing.
//!
//! # Examples
//!
//! ```
//! use html_viewer_session::NavigationHistory;
//!
//! let mut history = NavigationHistory::new();
//! history.push("a");
//! history.push("b");
//! history.push("c");
//!
//! assert_eq!(history.go_back(), Some("b"));
//! history.push("d");
//! assert_eq!(history.entries(), ["a", "b", "d"]);
//! assert_eq!(history.index(), Some(2));
//! ```

/// Ordered visited locations with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: Option<usize>,
}

impl NavigationHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
        }
    }

    /// Records a visit. Returns `false` if `location` is already current.
    pub fn push(&mut self, location: impl Into<String>) -> bool {
        let location = location.into();
        if self.current() == Some(location.as_str()) {
            return false;
        }

        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(location);
        self.index = Some(self.entries.len() - 1);
        true
    }

    /// Overwrites the current entry, or records a first visit.
    pub fn replace_current(&mut self, location: impl Into<String>) {
        match self.index {
            Some(i) => self.entries[i] = location.into(),
            None => {
                self.push(location);
            }
        }
    }

    /// Steps back, returning the location to load.
    pub fn go_back(&mut self) -> Option<&str> {
        let i = self.index.filter(|&i| i > 0)? - 1;
        self.index = Some(i);
        Some(&self.entries[i])
    }

    /// Steps forward, returning the location to load.
    pub fn go_forward(&mut self) -> Option<&str> {
        let i = self.index.filter(|&i| i + 1 < self.entries.len())? + 1;
        self.index = Some(i);
        Some(&self.entries[i])
    }

    /// The location at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.index.map(|i| self.entries[i].as_str())
    }

    /// Returns `true` if [`go_back`](Self::go_back) would move.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    /// Returns `true` if [`go_forward`](Self::go_forward) would move.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// The cursor position.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// All recorded locations, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of recorded locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }
}
