use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use time::OffsetDateTime;
use tower::ServiceExt;

use newsroom::application::admin::{chrome::AdminChromeService, dashboard::AdminDashboardService};
use newsroom::application::news::{CreateNewsCommand, NewsService};
use newsroom::domain::news::format_news_date;
use newsroom::domain::types::NewsStatus;
use newsroom::infra::NewsStore;
use newsroom::infra::http::{AdminState, build_admin_router};

fn app() -> (Router, Arc<NewsService>) {
    let store = NewsStore::memory();
    let news = Arc::new(store.news_service(10));
    let state = AdminState {
        news: news.clone(),
        health: store.health.clone(),
        chrome: Arc::new(AdminChromeService::new("Newsroom", "testing")),
        dashboard: Arc::new(AdminDashboardService::new(news.clone())),
    };
    (build_admin_router(state), news)
}

async fn seed(news: &NewsService, title: &str, date: &str, status: &str) -> i64 {
    news.create(CreateNewsCommand {
        title: Some(title.to_string()),
        date: Some(date.to_string()),
        status: Some(status.to_string()),
        ..Default::default()
    })
    .await
    .expect("seed item")
    .id
}

async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn post_form(router: &Router, uri: &str, form: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request");
    router.clone().oneshot(request).await.expect("response")
}

async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn flash_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("newsroom_flash="))
        .and_then(|value| value.split(';').next())
        .expect("flash cookie set")
        .to_string()
}

#[tokio::test]
async fn dashboard_lists_recent_items() {
    let (router, news) = app();
    seed(&news, "Graduation ceremony", "2025-09-01", "published").await;
    seed(&news, "Draft notice", "2025-09-02", "draft").await;

    let response = get(&router, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Dashboard"));
    assert!(html.contains("Graduation ceremony"));
    assert!(html.contains("Draft notice"));
}

#[tokio::test]
async fn news_list_applies_filters() {
    let (router, news) = app();
    seed(&news, "Published notice", "2025-09-01", "published").await;
    seed(&news, "Archived notice", "2025-08-01", "archived").await;

    let html = body_text(get(&router, "/news", None).await).await;
    assert!(html.contains("Published notice"));
    assert!(html.contains("Archived notice"));

    let response = get(&router, "/news?status=archived", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Archived notice"));
    assert!(!html.contains("Published notice"));

    let response = get(&router, "/news?status=archived&status=published&page=1&page=2", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Archived notice"));
    assert!(!html.contains("Published notice"));
}

#[tokio::test]
async fn new_form_is_prefilled_with_today() {
    let (router, _) = app();
    let today = format_news_date(OffsetDateTime::now_utc().date());

    let response = get(&router, "/news/new", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&format!(r#"value="{today}""#)));
}

#[tokio::test]
async fn create_redirects_with_flash() {
    let (router, news) = app();

    let response = post_form(
        &router,
        "/news/new",
        "title=Open+day&date=2025-10-01&link=&content=All+welcome&status=draft",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/news"));
    let cookie = flash_cookie(&response);

    let stored = news.all().await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Open day");
    assert_eq!(stored[0].status, NewsStatus::Draft);

    let response = get(&router, "/news", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Created"));
    assert!(html.contains("Open day"));
}

#[tokio::test]
async fn invalid_create_rerenders_form() {
    let (router, news) = app();

    let response = post_form(&router, "/news/new", "title=&date=2025-10-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("title is required"));
    assert!(html.contains("2025-10-01"));

    assert!(news.all().await.expect("list").is_empty());
}

#[tokio::test]
async fn edit_form_saves_changes() {
    let (router, news) = app();
    let id = seed(&news, "Before", "2025-09-01", "published").await;

    let response = get(&router, &format!("/news/{id}/edit"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Before"));

    let response = post_form(
        &router,
        &format!("/news/{id}/edit"),
        "title=After&date=2025-09-03&status=archived",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let record = news.find(id).await.expect("record");
    assert_eq!(record.title, "After");
    assert_eq!(record.status, NewsStatus::Archived);
}

#[tokio::test]
async fn unknown_items_render_not_found() {
    let (router, _) = app();

    let response = get(&router, "/news/404/edit", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("News item not found"));

    let response = get(&router, "/news/abc/edit", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_form(&router, "/news/404/delete", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&router, "/nowhere", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_change_keeps_item_on_invalid_value() {
    let (router, news) = app();
    let id = seed(&news, "Workflow", "2025-09-01", "published").await;
    let uri = format!("/news/{id}/status");

    let response = post_form(&router, &uri, "status=hidden").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = flash_cookie(&response);
    assert_eq!(
        news.find(id).await.expect("record").status,
        NewsStatus::Published
    );
    let html = body_text(get(&router, "/news", Some(&cookie)).await).await;
    assert!(html.contains(r#"class="flash flash-error""#));

    let response = post_form(&router, &uri, "status=draft").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(news.find(id).await.expect("record").status, NewsStatus::Draft);
}

#[tokio::test]
async fn delete_removes_item() {
    let (router, news) = app();
    let id = seed(&news, "Temporary", "2025-09-01", "published").await;

    let response = post_form(&router, &format!("/news/{id}/delete"), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/news"));
    assert!(news.all().await.expect("list").is_empty());
}

#[tokio::test]
async fn database_health_probe_returns_no_content() {
    let (router, _) = app();
    let response = get(&router, "/_health/db", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
