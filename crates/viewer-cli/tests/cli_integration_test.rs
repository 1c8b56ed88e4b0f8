//! Integration tests for the CLI commands over on-disk inputs.

use html_viewer_cli::ConfigAction;
use html_viewer_cli::commands::{common, config, list, pack};
use html_viewer_core::Preferences;
use html_viewer_core::cli::{ExitCode, OutputFormat};
use html_viewer_vfs::{ContentStore, IngestOptions, UploadBatch, ZipIngestor};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_site(root: &Path) {
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("index.html"), "<link href=\"assets/app.css\">").unwrap();
    fs::write(root.join("assets/app.css"), "body { margin: 0 }").unwrap();
    fs::create_dir_all(root.join("__MACOSX")).unwrap();
    fs::write(root.join("__MACOSX/._index.html"), "junk").unwrap();
}

/// Tests that listing a folder reports its files without the wrapper folder.
#[tokio::test]
async fn test_list_folder() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");
    write_site(&site);

    let code = list::run(&[site.clone()], OutputFormat::Json).await.unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let (store, summary) = common::load_store(&[site]).await.unwrap();
    assert!(summary.flattened);
    assert_eq!(summary.skipped, 1);
    let paths: Vec<String> = store.list().iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["assets/app.css", "index.html"]);
}

/// Tests that a missing input maps to an error exit code instead of failing.
#[tokio::test]
async fn test_list_missing_input() {
    let dir = TempDir::new().unwrap();
    let code = list::run(&[dir.path().join("nope")], OutputFormat::Text)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::ERROR);
}

/// Tests that a packed folder expands back into the same bundle.
#[tokio::test]
async fn test_pack_round_trip() {
    let dir = TempDir::new().unwrap();
    let site = dir.path().join("site");
    write_site(&site);
    let output = dir.path().join("site.zip");

    let code = pack::run(&[site], &output, OutputFormat::Json).await.unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(output.exists());

    let batch = UploadBatch::from_paths([&output]).unwrap();
    let mut store = ContentStore::new();
    let report = store
        .ingest_batch(batch, IngestOptions::default(), &ZipIngestor)
        .await
        .unwrap();
    assert_eq!(report.extracted_from.as_deref(), Some("site.zip"));
    assert_eq!(
        store.get("assets/app.css").unwrap().content().as_ref(),
        b"body { margin: 0 }"
    );
    assert!(store.contains("index.html"));
}

/// Tests that packing a corrupt archive reports an ingest failure.
#[tokio::test]
async fn test_pack_corrupt_archive() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.zip");
    fs::write(&bad, "definitely not a zip").unwrap();

    let code = pack::run(&[bad], &dir.path().join("out.zip"), OutputFormat::Text)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::INGEST_ERROR);
    assert!(!dir.path().join("out.zip").exists());
}

/// Tests that packing an empty folder reports nothing to download.
#[tokio::test]
async fn test_pack_empty_folder() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    let code = pack::run(&[empty], &dir.path().join("out.zip"), OutputFormat::Text)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::NOT_FOUND);
}

/// Tests the config set / get / path cycle against an explicit file.
#[tokio::test]
async fn test_config_set_get() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs").join("preferences.toml");

    let set = ConfigAction::Set {
        key: "user_agent".to_string(),
        value: "TestAgent/2.0".to_string(),
    };
    let code = config::run(set, Some(path.clone()), OutputFormat::Text)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert_eq!(
        Preferences::load(&path).unwrap().custom_user_agent(),
        Some("TestAgent/2.0")
    );

    let get = ConfigAction::Get {
        key: "user_agent".to_string(),
    };
    let code = config::run(get, Some(path.clone()), OutputFormat::Json)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let code = config::run(ConfigAction::Path, Some(path), OutputFormat::Text)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

/// Tests that a corrupt preferences file is reported as invalid input.
#[tokio::test]
async fn test_config_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "hide_fullscreen_hint = [").unwrap();

    let code = config::run(ConfigAction::Show, Some(path), OutputFormat::Pretty)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::INVALID_INPUT);
}
