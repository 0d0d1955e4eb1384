mod dashboard;
mod errors;
mod flash;
mod health;
mod news;
mod state;

pub use state::AdminState;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(dashboard::admin_dashboard))
        .route("/news", get(news::admin_news_list))
        .route(
            "/news/new",
            get(news::admin_news_new).post(news::admin_news_create),
        )
        .route(
            "/news/{id}/edit",
            get(news::admin_news_edit).post(news::admin_news_update),
        )
        .route("/news/{id}/delete", post(news::admin_news_delete))
        .route("/news/{id}/status", post(news::admin_news_status))
        .route("/_health/db", get(health::admin_health))
        .fallback(errors::admin_not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
