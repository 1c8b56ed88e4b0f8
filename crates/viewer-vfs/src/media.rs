//! Media type inference and preview classification.
//!
//! A plain ordered lookup table maps file extensions to media types. Unknown
//! extensions map to `application/octet-stream`.

use crate::path::EntryPath;

/// Media type for content with no known extension.
pub const OCTET_STREAM: &str = "application/octet-stream";

const MEDIA_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("js", "text/javascript; charset=utf-8"),
    ("mjs", "text/javascript; charset=utf-8"),
    ("jsx", "text/javascript; charset=utf-8"),
    ("ts", "text/plain; charset=utf-8"),
    ("tsx", "text/plain; charset=utf-8"),
    ("json", "application/json; charset=utf-8"),
    ("map", "application/json; charset=utf-8"),
    ("md", "text/plain; charset=utf-8"),
    ("txt", "text/plain; charset=utf-8"),
    ("csv", "text/csv; charset=utf-8"),
    ("xml", "text/plain; charset=utf-8"),
    ("yaml", "text/plain; charset=utf-8"),
    ("yml", "text/plain; charset=utf-8"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("bmp", "image/bmp"),
    ("ico", "image/x-icon"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("wasm", "application/wasm"),
];

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "html", "htm", "css", "js", "jsx", "ts", "tsx", "json", "xml", "svg", "yaml",
    "yml", "py", "java", "c", "cpp", "h", "hpp", "go", "rs", "php", "sh",
];

/// Infers a media type from the path's extension.
///
/// # Examples
///
/// ```
/// use html_viewer_vfs::{EntryPath, media};
///
/// assert_eq!(media::guess_media_type(&EntryPath::new("logo.PNG")), "image/png");
/// assert_eq!(media::guess_media_type(&EntryPath::new("blob.xyz")), media::OCTET_STREAM);
/// ```
#[must_use]
pub fn guess_media_type(path: &EntryPath) -> &'static str {
    let ext = path.extension();
    MEDIA_TYPES
        .iter()
        .find(|&&(known, _)| known == ext)
        .map_or(OCTET_STREAM, |&(_, media)| media)
}

/// Returns `true` if the media type denotes an HTML document.
#[must_use]
pub fn is_html(media_type: &str) -> bool {
    media_type.contains("text/html")
}

/// Built-in renderer used to inspect a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    /// Rendered as an image
    Image,
    /// Rendered in a video player
    Video,
    /// Rendered in an audio player
    Audio,
    /// Rendered as (editable) text
    Text,
}

impl PreviewKind {
    /// Classifies content by media type, falling back to known text
    /// extensions. Returns `None` when no renderer applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use html_viewer_vfs::{EntryPath, media::PreviewKind};
    ///
    /// let kind = PreviewKind::classify(&EntryPath::new("main.rs"), "application/octet-stream");
    /// assert_eq!(kind, Some(PreviewKind::Text));
    ///
    /// let kind = PreviewKind::classify(&EntryPath::new("clip.mp4"), "video/mp4");
    /// assert_eq!(kind, Some(PreviewKind::Video));
    /// ```
    #[must_use]
    pub fn classify(path: &EntryPath, media_type: &str) -> Option<Self> {
        if media_type.starts_with("image/") {
            return Some(Self::Image);
        }
        if media_type.starts_with("video/") {
            return Some(Self::Video);
        }
        if media_type.starts_with("audio/") {
            return Some(Self::Audio);
        }
        if is_text_media(media_type) || TEXT_EXTENSIONS.contains(&path.extension().as_str()) {
            return Some(Self::Text);
        }
        None
    }

    /// Lowercase label for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }
}

fn is_text_media(media_type: &str) -> bool {
    media_type.starts_with("text/")
        || ["json", "javascript", "xml"]
            .iter()
            .any(|marker| media_type.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(path: &str) -> &'static str {
        guess_media_type(&EntryPath::new(path))
    }

    #[test]
    fn test_guess_web_types() {
        assert_eq!(guess("index.html"), "text/html; charset=utf-8");
        assert_eq!(guess("style.css"), "text/css; charset=utf-8");
        assert_eq!(guess("app.mjs"), "text/javascript; charset=utf-8");
        assert_eq!(guess("fonts/a.woff2"), "font/woff2");
    }

    #[test]
    fn test_guess_is_case_insensitive() {
        assert_eq!(guess("PHOTO.JPEG"), "image/jpeg");
    }

    #[test]
    fn test_guess_unknown_and_missing_extension() {
        assert_eq!(guess("archive.tar.zst"), OCTET_STREAM);
        assert_eq!(guess("Makefile"), OCTET_STREAM);
        assert_eq!(guess("v1.2/LICENSE"), OCTET_STREAM);
    }

    #[test]
    fn test_classify_media() {
        let path = EntryPath::new("a.svg");
        assert_eq!(
            PreviewKind::classify(&path, guess("a.svg")),
            Some(PreviewKind::Image)
        );
        let path = EntryPath::new("song.flac");
        assert_eq!(
            PreviewKind::classify(&path, guess("song.flac")),
            Some(PreviewKind::Audio)
        );
    }

    #[test]
    fn test_classify_text_by_media_type() {
        let path = EntryPath::new("data");
        assert_eq!(
            PreviewKind::classify(&path, "application/xml"),
            Some(PreviewKind::Text)
        );
    }

    #[test]
    fn test_classify_unsupported() {
        let path = EntryPath::new("program.exe");
        assert_eq!(PreviewKind::classify(&path, OCTET_STREAM), None);
        let path = EntryPath::new("font.woff2");
        assert_eq!(PreviewKind::classify(&path, "font/woff2"), None);
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html; charset=utf-8"));
        assert!(!is_html("text/css"));
    }
}
