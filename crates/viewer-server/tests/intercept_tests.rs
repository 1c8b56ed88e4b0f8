//! Integration tests for the interception layer.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot` against a
//! published snapshot.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use html_viewer_core::traits::{CachedResource, SnapshotStorage};
use html_viewer_core::{Error, Result, ViewerConfig};
use html_viewer_server::agent::AGENT_MARKER;
use html_viewer_server::{BroadcastPauseChannel, MemorySnapshot, Publisher, router};
use html_viewer_vfs::ContentStore;
use std::sync::Arc;
use tower::ServiceExt;

const INDEX: &str = r#"<!doctype html><html><head><link rel="stylesheet" href="style.css"></head><body><img src="logo.png"></body></html>"#;

struct Fixture {
    app: Router,
    snapshot: Arc<MemorySnapshot>,
    publisher: Publisher,
}

fn fixture(config: &ViewerConfig) -> Fixture {
    let snapshot = Arc::new(MemorySnapshot::new());
    snapshot.mark_listening();
    let app = router(
        config,
        snapshot.clone(),
        Arc::new(BroadcastPauseChannel::default()),
    );
    let publisher = Publisher::new(snapshot.clone(), config.virtual_prefix());
    Fixture {
        app,
        snapshot,
        publisher,
    }
}

fn site() -> ContentStore {
    let mut store = ContentStore::new();
    store.put("index.html", INDEX, None);
    store.put("style.css", "body { color: red }", None);
    store.put("logo.png", vec![0x89, b'P', b'N', b'G'], None);
    store
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_fresh_preview_serves_bundle() {
    let fx = fixture(&ViewerConfig::default());
    fx.publisher.publish(&site()).await.unwrap();

    let (status, content_type, body) = get(&fx.app, "/__vfs__/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    let html = String::from_utf8(body).unwrap();
    let agent_at = html.find(AGENT_MARKER).unwrap();
    assert!(agent_at < html.find("</head>").unwrap());
    assert!(html.ends_with("<img src=\"logo.png\"></body></html>"));

    let (status, content_type, body) = get(&fx.app, "/__vfs__/style.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/css; charset=utf-8"));
    assert_eq!(body, b"body { color: red }");

    let (_, content_type, body) = get(&fx.app, "/__vfs__/logo.png").await;
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert_eq!(body, [0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_miss_is_not_found() {
    let fx = fixture(&ViewerConfig::default());
    fx.publisher.publish(&site()).await.unwrap();

    let (status, _, body) = get(&fx.app, "/__vfs__/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Not Found");
}

#[tokio::test]
async fn test_requests_outside_prefix_fall_through() {
    let fx = fixture(&ViewerConfig::default());
    fx.publisher.publish(&site()).await.unwrap();

    let (status, _, body) = get(&fx.app, "/__viewer__/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    // The bundle is only reachable under the prefix.
    let (status, _, _) = get(&fx.app, "/index.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_percent_encoded_paths() {
    let fx = fixture(&ViewerConfig::default());
    let mut store = ContentStore::new();
    store.put("my docs/read me.txt", "hello", None);
    fx.publisher.publish(&store).await.unwrap();

    let (status, _, body) = get(&fx.app, "/__vfs__/my%20docs/read%20me.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello");
}

#[tokio::test]
async fn test_already_instrumented_document_is_served_verbatim() {
    let fx = fixture(&ViewerConfig::default());
    let page = format!("<head><script>var t='{AGENT_MARKER}';</script></head>");
    let mut store = ContentStore::new();
    store.put("index.html", page.clone(), None);
    fx.publisher.publish(&store).await.unwrap();

    let (_, _, body) = get(&fx.app, "/__vfs__/index.html").await;
    assert_eq!(body, page.as_bytes());
}

#[tokio::test]
async fn test_publish_twice_is_idempotent() {
    let fx = fixture(&ViewerConfig::default());
    let store = site();

    fx.publisher.publish(&store).await.unwrap();
    let mut first = fx.snapshot.keys().await.unwrap();
    first.sort();
    let first_css = fx.snapshot.get("/__vfs__/style.css").await.unwrap();

    fx.publisher.publish(&store).await.unwrap();
    let mut second = fx.snapshot.keys().await.unwrap();
    second.sort();

    assert_eq!(first, second);
    assert_eq!(fx.snapshot.get("/__vfs__/style.css").await.unwrap(), first_css);
}

#[tokio::test]
async fn test_republish_serves_edited_content() {
    let fx = fixture(&ViewerConfig::default());
    let mut store = site();
    fx.publisher.publish(&store).await.unwrap();

    store.put("style.css", "body { color: blue }", None);
    let (_, _, stale) = get(&fx.app, "/__vfs__/style.css").await;
    assert_eq!(stale, b"body { color: red }");

    fx.publisher.publish(&store).await.unwrap();
    let (_, _, fresh) = get(&fx.app, "/__vfs__/style.css").await;
    assert_eq!(fresh, b"body { color: blue }");
}

#[tokio::test]
async fn test_custom_base_path() {
    let config = ViewerConfig::builder().base_path("/viewer/").build();
    let fx = fixture(&config);
    fx.publisher.publish(&site()).await.unwrap();

    let (status, _, _) = get(&fx.app, "/viewer/__vfs__/style.css").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = get(&fx.app, "/__vfs__/style.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, _, body) = get(&fx.app, "/viewer/__viewer__/health").await;
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_pause_stream_is_event_stream() {
    let fx = fixture(&ViewerConfig::default());
    let response = fx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/__viewer__/pause")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );
}

struct FaultyStorage;

#[async_trait]
impl SnapshotStorage for FaultyStorage {
    async fn register(&self) -> Result<()> {
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn get(&self, _key: &str) -> Result<Option<CachedResource>> {
        Err(Error::storage("get", "backing store unavailable"))
    }

    async fn put(&self, _key: String, _resource: CachedResource) -> Result<()> {
        Err(Error::storage("put", "backing store unavailable"))
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn test_storage_fault_is_internal_error_and_layer_survives() {
    let app = router(
        &ViewerConfig::default(),
        Arc::new(FaultyStorage),
        Arc::new(BroadcastPauseChannel::default()),
    );

    let (status, _, _) = get(&app, "/__vfs__/index.html").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _, _) = get(&app, "/__vfs__/index.html").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _, body) = get(&app, "/__viewer__/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_failed_write_fails_publish() {
    let publisher = Publisher::new(Arc::new(FaultyStorage), "/__vfs__/");
    let err = publisher.publish(&site()).await.unwrap_err();
    assert!(err.is_storage_error());
}
