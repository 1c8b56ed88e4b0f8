//! Path normalization for bundle entries.
//!
//! Every path that reaches the content store, whether typed by the user,
//! taken from a browser file list, or read out of an archive, is brought into
//! one canonical form: rootless, slash-separated, no empty segments.
//!
//! Normalization is total. Garbage in yields a degenerate (possibly empty)
//! path, never an error.
//!
//! # Examples
//!
//! ```
//! use html_viewer_vfs::path::{is_ignorable, normalize, strip_top_segment};
//!
//! assert_eq!(normalize("//site\\css//main.css/"), "site/css/main.css");
//! assert!(is_ignorable("__MACOSX/._index.html"));
//! assert_eq!(strip_top_segment("site/index.html"), "index.html");
//! ```

use std::fmt;

/// Folder name that archive tools add for platform metadata.
pub const IGNORED_SEGMENT: &str = "__MACOSX";

/// Canonicalizes a raw path.
///
/// Converts backslashes to forward slashes, then drops leading, trailing and
/// repeated separators. Applying it twice gives the same result as once.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns `true` if any segment of the path is the metadata folder.
#[must_use]
pub fn is_ignorable(path: &str) -> bool {
    normalize(path).split('/').any(|s| s == IGNORED_SEGMENT)
}

/// Removes the first segment of a path.
///
/// Single-segment paths are returned unchanged (normalized).
#[must_use]
pub fn strip_top_segment(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.split_once('/') {
        Some((_, rest)) => rest.to_string(),
        None => normalized,
    }
}

/// Returns the first segment of a normalized path, if it has more than one.
#[must_use]
pub fn top_segment(path: &str) -> Option<&str> {
    path.split_once('/').map(|(top, _)| top)
}

/// A normalized bundle-relative path.
///
/// Construction always succeeds; the path is normalized on the way in.
///
/// # Examples
///
/// ```
/// use html_viewer_vfs::EntryPath;
///
/// let path = EntryPath::new("/assets\\Logo.PNG");
/// assert_eq!(path.as_str(), "assets/Logo.PNG");
/// assert_eq!(path.file_name(), "Logo.PNG");
/// assert_eq!(path.extension(), "png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath(String);

impl EntryPath {
    /// Creates a path by normalizing `raw`.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if normalization left nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the path contains the metadata folder.
    #[must_use]
    pub fn is_ignorable(&self) -> bool {
        self.0.split('/').any(|s| s == IGNORED_SEGMENT)
    }

    /// The last segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Lowercased text after the last '.' of the file name, or empty.
    #[must_use]
    pub fn extension(&self) -> String {
        self.file_name()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default()
    }

    /// Consumes the path, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_and_trailing() {
        assert_eq!(normalize("/index.html"), "index.html");
        assert_eq!(normalize("///a/b///"), "a/b");
    }

    #[test]
    fn test_normalize_backslashes_and_repeats() {
        assert_eq!(normalize("a\\\\b//c\\d.txt"), "a/b/c/d.txt");
        assert_eq!(normalize("\\root\\file"), "root/file");
    }

    #[test]
    fn test_normalize_degenerate() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("////"), "");
        assert_eq!(normalize("\\/\\"), "");
    }

    #[test]
    fn test_normalize_is_projection() {
        let samples = [
            "/a//b\\c/",
            "\\\\x\\y",
            "plain.txt",
            "//",
            "a/ /b",
            "dir\\/\\sub//file.js",
            "  spaced  /name ",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_is_ignorable() {
        assert!(is_ignorable("__MACOSX"));
        assert!(is_ignorable("site/__MACOSX/._a.png"));
        assert!(is_ignorable("\\__MACOSX\\x"));
        assert!(!is_ignorable("site/__MACOSX_notes.txt"));
        assert!(!is_ignorable("index.html"));
    }

    #[test]
    fn test_strip_top_segment() {
        assert_eq!(strip_top_segment("site/index.html"), "index.html");
        assert_eq!(strip_top_segment("/site/css/a.css"), "css/a.css");
        assert_eq!(strip_top_segment("index.html"), "index.html");
        assert_eq!(strip_top_segment(""), "");
    }

    #[test]
    fn test_top_segment() {
        assert_eq!(top_segment("site/index.html"), Some("site"));
        assert_eq!(top_segment("index.html"), None);
    }

    #[test]
    fn test_entry_path_accessors() {
        let path = EntryPath::new("docs/readme.MD");
        assert_eq!(path.file_name(), "readme.MD");
        assert_eq!(path.extension(), "md");
        assert!(!path.is_empty());
        assert!(!path.is_ignorable());
        assert_eq!(path.to_string(), "docs/readme.MD");
    }
}
