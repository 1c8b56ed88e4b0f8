//! Runtime pause agent injection.
//!
//! Served HTML documents get the pause agent script inserted right before the
//! first `</head>`, or prepended when there is no head. Documents that already
//! contain the agent's marker are left alone, so injection is idempotent.
//!
//! Injection works on raw bytes; documents in encodings other than UTF-8 pass
//! through unchanged apart from the inserted script.

use html_viewer_core::traits::PAUSE_MESSAGE_TYPE;

const AGENT_SOURCE: &str = include_str!("agent/pause_agent.js");
const HEAD_CLOSE: &[u8] = b"</head>";

/// Signature marker whose presence suppresses injection.
pub const AGENT_MARKER: &str = PAUSE_MESSAGE_TYPE;

/// The agent script source.
#[must_use]
pub const fn agent_source() -> &'static str {
    AGENT_SOURCE
}

/// The agent wrapped in a `<script>` element.
#[must_use]
pub fn agent_snippet() -> String {
    format!("<script>{}</script>", agent_source())
}

/// Injects the agent into an HTML body.
///
/// Returns `None` when the body already carries the marker.
///
/// # Examples
///
/// ```
/// use html_viewer_server::agent::inject_agent;
///
/// let html = b"<html><head><title>t</title></head><body></body></html>";
/// let injected = inject_agent(html).unwrap();
/// let text = String::from_utf8(injected).unwrap();
/// assert!(text.contains("<script>"));
/// assert!(text.find("<script>").unwrap() < text.find("</head>").unwrap());
///
/// // A served document never gets a second copy.
/// assert!(inject_agent(text.as_bytes()).is_none());
/// ```
#[must_use]
pub fn inject_agent(body: &[u8]) -> Option<Vec<u8>> {
    if find(body, AGENT_MARKER.as_bytes()).is_some() {
        return None;
    }

    let snippet = agent_snippet();
    let mut out = Vec::with_capacity(body.len() + snippet.len());
    match find(body, HEAD_CLOSE) {
        Some(at) => {
            out.extend_from_slice(&body[..at]);
            out.extend_from_slice(snippet.as_bytes());
            out.extend_from_slice(&body[at..]);
        }
        None => {
            out.extend_from_slice(snippet.as_bytes());
            out.extend_from_slice(body);
        }
    }
    Some(out)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
