use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::Response,
};

use crate::{
    application::{error::HttpError, news::NewsError},
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::super::repo_error_to_http;
use super::AdminState;

pub(super) fn admin_news_error(source: &'static str, err: NewsError) -> HttpError {
    match err {
        NewsError::Repo(repo) => repo_error_to_http(source, repo),
        other => HttpError::from(other),
    }
}

/// Render `err` as a full admin page with the matching status code.
pub(super) fn render_error_page(state: &AdminState, active_path: &str, err: HttpError) -> Response {
    let status = err.status();
    let message = if status.is_server_error() {
        "The request could not be completed. Details were written to the server log.".to_string()
    } else {
        err.detail().to_string()
    };

    let content = admin_views::AdminErrorView {
        status_code: status.as_u16(),
        title: err.public_message().to_string(),
        message,
        back_href: active_path.to_string(),
    };

    let view = admin_views::AdminLayout::new(state.chrome.load(active_path), content);
    let mut response = render_template_response(admin_views::AdminErrorTemplate { view }, status);
    if response.status() == status {
        err.into_report().attach(&mut response);
    }
    response
}

pub(super) async fn admin_not_found(State(state): State<AdminState>, uri: Uri) -> Response {
    let err = HttpError::new(
        "infra::http::admin_not_found",
        StatusCode::NOT_FOUND,
        "Page not found",
        format!("No admin page lives at `{}`", uri.path()),
    );
    render_error_page(&state, "/", err)
}
