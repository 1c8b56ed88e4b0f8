//! Interception layer.
//!
//! A middleware in front of the whole router. Requests under the virtual
//! prefix are answered from the published snapshot and never reach the
//! routes behind it; everything else passes through untouched.
//!
//! Per request:
//! - miss: 404
//! - non-HTML hit: stored bytes and media type verbatim
//! - HTML hit: pause agent injected unless already present
//! - storage fault: 500, logged; the layer keeps serving

use crate::agent::inject_agent;
use crate::error::ApiError;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use html_viewer_core::traits::{CachedResource, SnapshotStorage};
use html_viewer_vfs::path::normalize;
use std::sync::Arc;
use tracing::{debug, warn};

/// State shared by every intercepted request.
#[derive(Clone)]
pub struct InterceptState {
    snapshot: Arc<dyn SnapshotStorage>,
    prefix: Arc<str>,
}

impl std::fmt::Debug for InterceptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptState")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl InterceptState {
    /// Creates interception state answering `prefix` from `snapshot`.
    ///
    /// `prefix` is the virtual prefix including both slashes, e.g.
    /// `/__vfs__/`.
    #[must_use]
    pub fn new(snapshot: Arc<dyn SnapshotStorage>, prefix: impl Into<Arc<str>>) -> Self {
        Self {
            snapshot,
            prefix: prefix.into(),
        }
    }

    /// Snapshot key for a request path, or `None` outside the prefix.
    ///
    /// The path is percent-decoded and its bundle-relative part normalized,
    /// matching how the publisher writes keys.
    #[must_use]
    pub fn key_for(&self, request_path: &str) -> Option<String> {
        let rest = request_path.strip_prefix(&*self.prefix)?;
        let decoded = urlencoding::decode(rest).map_or_else(|_| rest.to_string(), |d| d.into_owned());
        Some(format!("{}{}", self.prefix, normalize(&decoded)))
    }
}

/// Middleware entry point, installed with `from_fn_with_state`.
pub async fn intercept(
    State(state): State<InterceptState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(key) = state.key_for(request.uri().path()) else {
        return next.run(request).await;
    };

    match state.snapshot.get(&key).await {
        Ok(Some(resource)) => {
            debug!(key = %key, content_type = %resource.content_type, "snapshot hit");
            serve(resource)
        }
        Ok(None) => {
            debug!(key = %key, "snapshot miss");
            ApiError::not_found().into_response()
        }
        Err(e) => {
            warn!(key = %key, error = %e, "snapshot lookup failed");
            ApiError::from(e).into_response()
        }
    }
}

fn serve(resource: CachedResource) -> Response {
    let is_html = resource.is_html();
    let CachedResource { body, content_type } = resource;

    let body = if is_html {
        inject_agent(&body).map_or(body, Into::into)
    } else {
        body
    };

    let mut response = Body::from(body).into_response();
    match HeaderValue::from_str(&content_type) {
        Ok(value) => {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        Err(_) => warn!(content_type = %content_type, "unrepresentable content type dropped"),
    }
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySnapshot;

    fn state() -> InterceptState {
        InterceptState::new(Arc::new(MemorySnapshot::new()), "/__vfs__/")
    }

    #[test]
    fn test_key_for_outside_prefix() {
        let state = state();
        assert_eq!(state.key_for("/index.html"), None);
        assert_eq!(state.key_for("/__vfs__"), None);
        assert_eq!(state.key_for("/app/__vfs__/a"), None);
    }

    #[test]
    fn test_key_for_decodes_and_normalizes() {
        let state = state();
        assert_eq!(
            state.key_for("/__vfs__/my%20site//index.html").as_deref(),
            Some("/__vfs__/my site/index.html")
        );
        assert_eq!(state.key_for("/__vfs__/").as_deref(), Some("/__vfs__/"));
    }

    #[test]
    fn test_serve_keeps_media_type() {
        let response = serve(CachedResource::new("x", "image/png"));
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    }
}
