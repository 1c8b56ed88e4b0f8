//! Address bar grammar.
//!
//! Typed input resolves to one of two targets:
//!
//! - an absolute `http`/`https` URL, or a bare host such as `example.com` or
//!   `localhost:3000` (prefixed with `https://`), is an external site; a bare
//!   host never carries a path, query or fragment
//! - anything else is a bundle-relative path; blank input means `index.html`
//!
//! Bundle locations are served at `{vfs base}{path}`. The address display
//! strips that base again, so the user only ever sees bundle paths.

use html_viewer_core::URL_PLACEHOLDER;
use html_viewer_vfs::EntryPath;
use html_viewer_vfs::batch::ARCHIVE_EXTENSION;
use html_viewer_vfs::media::{OCTET_STREAM, PreviewKind, guess_media_type};
use html_viewer_vfs::path::normalize;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// Entry point loaded when the address is left blank.
pub const DEFAULT_ENTRY: &str = "index.html";

static BARE_DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(localhost|[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,63})(:\d{1,5})?$")
        .expect("valid regex")
});

/// What an address resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A site outside the bundle
    External(Url),
    /// A file in the content store
    Bundle(EntryPath),
}

impl Target {
    /// Returns `true` for external targets.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External(url) => write!(f, "{url}"),
            Self::Bundle(path) => write!(f, "{path}"),
        }
    }
}

/// Resolves typed addresses and maps between bundle paths and URLs.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    vfs_base: Url,
    proxy: Option<String>,
}

impl AddressResolver {
    /// Creates a resolver for bundle content served under `vfs_base`
    /// (e.g. `http://127.0.0.1:40123/__vfs__/`).
    #[must_use]
    pub fn new(mut vfs_base: Url) -> Self {
        if !vfs_base.path().ends_with('/') {
            let path = format!("{}/", vfs_base.path());
            vfs_base.set_path(&path);
        }
        Self {
            vfs_base,
            proxy: None,
        }
    }

    /// Routes external loads through a `{url}` request-rewriting template.
    /// Templates without the placeholder are ignored.
    #[must_use]
    pub fn with_proxy(mut self, template: Option<String>) -> Self {
        self.proxy = template.filter(|t| t.contains(URL_PLACEHOLDER));
        self
    }

    /// The base URL bundle content is served under.
    #[must_use]
    pub const fn vfs_base(&self) -> &Url {
        &self.vfs_base
    }

    /// The active proxy template, if any.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Resolves typed input.
    ///
    /// `is_known` reports whether a normalized path exists in the content
    /// store; a known entry wins over the bare-domain rule. Hosts ending in
    /// a known file extension (`index.html`, `site.zip`) are never taken for
    /// domains.
    ///
    /// # Examples
    ///
    /// ```
    /// use html_viewer_session::{AddressResolver, Target};
    /// use url::Url;
    ///
    /// let resolver = AddressResolver::new(Url::parse("http://127.0.0.1:8080/__vfs__/").unwrap());
    /// let none = |_: &str| false;
    ///
    /// assert!(matches!(resolver.parse("", none), Target::Bundle(p) if p.as_str() == "index.html"));
    /// assert!(matches!(resolver.parse("example.com", none), Target::External(u) if u.as_str() == "https://example.com/"));
    /// assert!(matches!(resolver.parse("docs/", none), Target::Bundle(p) if p.as_str() == "docs"));
    /// ```
    #[must_use]
    pub fn parse(&self, raw: &str, is_known: impl Fn(&str) -> bool) -> Target {
        let input = raw.trim();
        if input.is_empty() {
            return Target::Bundle(EntryPath::new(DEFAULT_ENTRY));
        }

        if let Some(url) = parse_http(input) {
            return self
                .bundle_path(url.as_str())
                .map_or(Target::External(url), Target::Bundle);
        }

        let normalized = normalize(input);
        if normalized.is_empty() {
            return Target::Bundle(EntryPath::new(DEFAULT_ENTRY));
        }
        if !is_known(&normalized)
            && let Some(caps) = BARE_DOMAIN_REGEX.captures(input)
            && !looks_like_file_name(&caps[1])
            && let Ok(url) = Url::parse(&format!("https://{input}"))
        {
            return Target::External(url);
        }

        Target::Bundle(EntryPath::new(&normalized))
    }

    /// Served URL of a bundle entry, each segment percent-encoded.
    #[must_use]
    pub fn bundle_url(&self, path: &EntryPath) -> String {
        let encoded: Vec<_> = path
            .as_str()
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}{}", self.vfs_base, encoded.join("/"))
    }

    /// Location a target is shown at.
    #[must_use]
    pub fn location_of(&self, target: &Target) -> String {
        match target {
            Target::External(url) => url.to_string(),
            Target::Bundle(path) => self.bundle_url(path),
        }
    }

    /// URL the surface actually loads: external locations go through the
    /// proxy when one is configured.
    #[must_use]
    pub fn surface_url(&self, location: &str) -> String {
        match &self.proxy {
            Some(template) if self.is_external(location) => {
                template.replace(URL_PLACEHOLDER, &urlencoding::encode(location))
            }
            _ => location.to_string(),
        }
    }

    /// Maps an observed surface location back to the logical location,
    /// unwrapping the proxy.
    #[must_use]
    pub fn canonical(&self, observed: &str) -> String {
        if let Some(template) = &self.proxy
            && let Some((head, tail)) = template.split_once(URL_PLACEHOLDER)
            && let Some(rest) = observed.strip_prefix(head)
        {
            let encoded = if tail.is_empty() {
                Some(rest)
            } else {
                rest.strip_suffix(tail)
            };
            if let Some(encoded) = encoded
                && let Ok(decoded) = urlencoding::decode(encoded)
            {
                return decoded.into_owned();
            }
        }
        observed.to_string()
    }

    /// Text for the address bar: bundle locations lose the vfs base and are
    /// percent-decoded, everything else is shown as is.
    #[must_use]
    pub fn display(&self, location: &str) -> String {
        location
            .strip_prefix(self.vfs_base.as_str())
            .map_or_else(
                || location.to_string(),
                |rest| {
                    urlencoding::decode(rest)
                        .map_or_else(|_| rest.to_string(), |d| d.into_owned())
                },
            )
    }

    /// The bundle entry a location points at, if it is under the vfs base.
    ///
    /// Query and fragment are ignored. The bare base maps to `index.html`.
    #[must_use]
    pub fn bundle_path(&self, location: &str) -> Option<EntryPath> {
        let url = Url::parse(location).ok()?;
        if url.origin() != self.vfs_base.origin() {
            return None;
        }
        let rest = url.path().strip_prefix(self.vfs_base.path())?;
        let decoded = urlencoding::decode(rest).ok()?;
        let path = EntryPath::new(&decoded);
        Some(if path.is_empty() {
            EntryPath::new(DEFAULT_ENTRY)
        } else {
            path
        })
    }

    /// Returns `true` for `http(s)` locations outside the bundle.
    #[must_use]
    pub fn is_external(&self, location: &str) -> bool {
        parse_http(location).is_some() && self.bundle_path(location).is_none()
    }
}

fn looks_like_file_name(host: &str) -> bool {
    let path = EntryPath::new(host);
    path.extension() == ARCHIVE_EXTENSION.trim_start_matches('.')
        || guess_media_type(&path) != OCTET_STREAM
        || PreviewKind::classify(&path, OCTET_STREAM).is_some()
}

fn parse_http(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
