//! Integration tests for upload ingestion.
//!
//! Covers the rule that decides whether a lone `.zip` upload is expanded or
//! stored as a literal file, and loading bundles from disk.

use html_viewer_vfs::archive::write_zip;
use html_viewer_vfs::{ContentStore, IngestOptions, UploadBatch, VfsError, ZipIngestor};
use std::fs;
use tempfile::TempDir;

fn site_zip() -> Vec<u8> {
    write_zip([
        ("index.html", b"<html><head></head></html>".as_slice()),
        ("css/style.css", b"body {}".as_slice()),
        ("__MACOSX/._index.html", b"meta".as_slice()),
    ])
    .unwrap()
}

const FLATTEN: IngestOptions = IngestOptions {
    flatten_single_root: true,
};

#[tokio::test]
async fn test_single_archive_into_empty_store_is_extracted() {
    let mut store = ContentStore::new();
    let batch = UploadBatch::new().add_file("site.zip", site_zip());

    let report = store
        .ingest_batch(batch, FLATTEN, &ZipIngestor)
        .await
        .unwrap();

    assert_eq!(report.extracted_from.as_deref(), Some("site.zip"));
    assert_eq!(report.stored, 2);
    assert_eq!(report.skipped, 1);
    assert!(!store.contains("site.zip"));
    assert!(store.contains("index.html"));
    assert!(store.contains("css/style.css"));
}

#[tokio::test]
async fn test_archive_with_sibling_is_stored_literally() {
    let mut store = ContentStore::new();
    let batch = UploadBatch::new()
        .add_file("site.zip", site_zip())
        .add_file("notes.txt", "hello");

    let report = store
        .ingest_batch(batch, FLATTEN, &ZipIngestor)
        .await
        .unwrap();

    assert_eq!(report.extracted_from, None);
    assert!(store.contains("site.zip"));
    assert!(store.contains("notes.txt"));
    assert!(!store.contains("index.html"));
}

#[tokio::test]
async fn test_archive_into_populated_store_is_stored_literally() {
    let mut store = ContentStore::new();
    store.put("existing.html", "<p></p>", None);
    let batch = UploadBatch::new().add_file("site.zip", site_zip());

    store
        .ingest_batch(batch, FLATTEN, &ZipIngestor)
        .await
        .unwrap();

    assert!(store.contains("site.zip"));
    assert_eq!(
        store.get("site.zip").unwrap().media_type(),
        "application/octet-stream"
    );
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_corrupt_archive_leaves_store_unchanged() {
    let mut store = ContentStore::new();
    let batch = UploadBatch::new().add_file("broken.zip", "definitely not a zip");

    let err = store
        .ingest_batch(batch, FLATTEN, &ZipIngestor)
        .await
        .unwrap_err();

    assert!(matches!(err, VfsError::InvalidArchive { .. }));
    assert!(store.is_empty());
    assert_eq!(store.revision(), 0);
}

#[tokio::test]
async fn test_batches_merge_additively() {
    let mut store = ContentStore::new();
    store
        .ingest_batch(
            UploadBatch::new().add_file("a.html", "1"),
            FLATTEN,
            &ZipIngestor,
        )
        .await
        .unwrap();
    store
        .ingest_batch(
            UploadBatch::new()
                .add_file("b.css", "2")
                .add_file("a.html", "3"),
            FLATTEN,
            &ZipIngestor,
        )
        .await
        .unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("a.html").unwrap().content().as_ref(), b"3");
}

#[tokio::test]
async fn test_dropped_folder_from_disk_is_flattened() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("my-site");
    fs::create_dir_all(site.join("img")).unwrap();
    fs::write(site.join("index.html"), "<html></html>").unwrap();
    fs::write(site.join("style.css"), "h1 {}").unwrap();
    fs::write(site.join("img").join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();

    let mut store = ContentStore::new();
    let batch = UploadBatch::from_paths([&site]).unwrap();
    let report = store
        .ingest_batch(batch, FLATTEN, &ZipIngestor)
        .await
        .unwrap();

    assert!(report.flattened);
    let paths: Vec<_> = store
        .list()
        .into_iter()
        .map(|e| e.path.into_inner())
        .collect();
    assert_eq!(paths, ["img/logo.png", "index.html", "style.css"]);
}

#[tokio::test]
async fn test_export_then_reimport() {
    let mut source = ContentStore::new();
    source.put("index.html", "<html></html>", None);
    source.put("js/app.js", "run()", None);
    let packed = source.export_archive().unwrap();

    let mut target = ContentStore::new();
    target
        .ingest_batch(
            UploadBatch::new().add_file("html-files.zip", packed),
            FLATTEN,
            &ZipIngestor,
        )
        .await
        .unwrap();

    assert_eq!(target.len(), 2);
    assert_eq!(target.get("js/app.js").unwrap().content().as_ref(), b"run()");
}
