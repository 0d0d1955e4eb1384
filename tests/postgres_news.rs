use newsroom::application::import::{sample_items, seed_samples};
use newsroom::application::news::{CreateNewsCommand, NewsError, UpdateNewsCommand};
use newsroom::application::query::NewsListParams;
use newsroom::domain::types::NewsStatus;
use newsroom::infra::NewsStore;
use newsroom::infra::db::PostgresRepositories;
use sqlx::PgPool;

fn command(title: &str, date: &str, status: &str) -> CreateNewsCommand {
    CreateNewsCommand {
        title: Some(title.to_string()),
        content: Some(format!("{title} details")),
        date: Some(date.to_string()),
        link: None,
        status: Some(status.to_string()),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn postgres_listing_matches_query_rules(pool: PgPool) {
    let news = NewsStore::postgres(PostgresRepositories::new(pool)).news_service(10);
    news.create(command("100% attendance", "2025-09-01", "published"))
        .await
        .expect("create");
    news.create(command("Exam results", "2025-09-10", "published"))
        .await
        .expect("create");
    news.create(command("Exam draft", "2025-09-05", "draft"))
        .await
        .expect("create");

    let query = news.query_from(&NewsListParams {
        search: Some("exam".into()),
        ..Default::default()
    });
    let page = news.list(&query).await.expect("list");
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.items[0].title, "Exam results");

    let literal = news.query_from(&NewsListParams {
        search: Some("100%".into()),
        ..Default::default()
    });
    assert_eq!(news.list(&literal).await.expect("list").meta.total, 1);

    let drafts = news.query_from(&NewsListParams {
        status: Some("draft".into()),
        date_from: Some("2025-09-02".into()),
        ..Default::default()
    });
    let page = news.list(&drafts).await.expect("list");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].status, NewsStatus::Draft);

    let counts = news.status_counts().await.expect("counts");
    assert_eq!(counts.total, 3);
    assert_eq!(counts.published, 2);
    assert_eq!(counts.draft, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn postgres_updates_refresh_timestamps(pool: PgPool) {
    let news = NewsStore::postgres(PostgresRepositories::new(pool)).news_service(10);
    let created = news
        .create(command("Timetable", "2025-09-01", "published"))
        .await
        .expect("create");

    let update: UpdateNewsCommand =
        serde_json::from_str(r#"{"link": "https://example.com/t"}"#).expect("payload");
    let updated = news.update(created.id, update).await.expect("update");
    assert_eq!(updated.link.as_deref(), Some("https://example.com/t"));
    assert_eq!(updated.title, "Timetable");
    assert!(updated.updated_at >= created.created_at);

    let archived = news
        .update_status(created.id, Some("archived"))
        .await
        .expect("status");
    assert_eq!(archived.status, NewsStatus::Archived);

    news.delete(created.id).await.expect("delete");
    assert!(matches!(
        news.find(created.id).await,
        Err(NewsError::NotFound { .. })
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a Postgres DATABASE_URL"]
async fn postgres_import_runs_once(pool: PgPool) {
    let news = NewsStore::postgres(PostgresRepositories::new(pool)).news_service(10);

    let first = seed_samples(&news).await.expect("seed");
    assert_eq!(first.inserted, sample_items().len() as u64);

    let second = seed_samples(&news).await.expect("second seed");
    assert!(second.was_skipped());
    assert_eq!(news.all().await.expect("all").len(), sample_items().len());
}
