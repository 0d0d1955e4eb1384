use std::io::Write;
use std::path::Path;

use newsroom::application::import::{ImportError, import_file, sample_items, seed_samples};
use newsroom::application::news::NewsService;
use newsroom::domain::types::NewsStatus;
use newsroom::infra::NewsStore;
use tempfile::NamedTempFile;

fn service() -> NewsService {
    NewsStore::memory().news_service(10)
}

fn write_export(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write export");
    file
}

#[tokio::test]
async fn imports_valid_items_and_reports_invalid_ones() {
    let news = service();
    let export = write_export(
        r#"[
            {"title": "Semester starts", "date": "2025-09-01", "link": "https://example.com/a"},
            {"title": "", "date": "2025-09-02", "link": ""},
            {"title": "Bad date", "date": "yesterday"},
            {"title": "Holiday notice", "date": "2025-10-01", "link": "", "status": "draft"}
        ]"#,
    );

    let report = import_file(&news, export.path(), false)
        .await
        .expect("import succeeds");

    assert!(!report.was_skipped());
    assert_eq!(report.inserted, 2);
    let skipped: Vec<usize> = report.skipped.iter().map(|item| item.index).collect();
    assert_eq!(skipped, vec![1, 2]);

    let stored = news.all().await.expect("list");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|item| item.status == NewsStatus::Published));
    assert!(stored.iter().any(|item| item.link.is_none()));
}

#[tokio::test]
async fn non_empty_store_is_left_untouched() {
    let news = service();
    seed_samples(&news).await.expect("seed");

    let export = write_export(r#"[{"title": "Late entry", "date": "2025-11-01"}]"#);
    let report = import_file(&news, export.path(), false)
        .await
        .expect("import succeeds");

    assert!(report.was_skipped());
    assert_eq!(report.inserted, 0);
    assert_eq!(report.existing, Some(sample_items().len() as u64));
    assert_eq!(news.all().await.expect("list").len(), sample_items().len());
}

#[tokio::test]
async fn missing_file_can_fall_back_to_samples() {
    let news = service();
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("news_data.json");

    let err = import_file(&news, &missing, false)
        .await
        .expect_err("missing file fails");
    assert!(matches!(err, ImportError::Read { .. }));

    let report = import_file(&news, &missing, true)
        .await
        .expect("seed fallback");
    assert_eq!(report.inserted, sample_items().len() as u64);
}

#[tokio::test]
async fn malformed_documents_are_rejected() {
    let news = service();
    let export = write_export(r#"{"title": "not an array"}"#);

    let err = import_file(&news, export.path(), false)
        .await
        .expect_err("object is rejected");
    assert!(matches!(err, ImportError::Parse { .. }));
    assert!(news.all().await.expect("list").is_empty());

    let err = import_file(&news, Path::new("/definitely/not/here.json"), false)
        .await
        .expect_err("unreadable path");
    assert!(err.to_string().contains("failed to read"));
}
