pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware as axum_middleware,
    routing::{get, patch},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsSettings;
use crate::infra::error::InfraError;
use crate::infra::http::middleware::{log_responses, set_request_context};

pub fn build_api_router(state: ApiState, cors: &CorsSettings) -> Result<Router, InfraError> {
    let cors = cors_layer(cors)?;

    let router = Router::new()
        .route(
            "/api/news",
            get(handlers::list_news).post(handlers::create_news),
        )
        .route(
            "/api/news/{id}",
            get(handlers::get_news)
                .put(handlers::update_news)
                .delete(handlers::delete_news),
        )
        .route(
            "/api/news/{id}/status",
            patch(handlers::update_news_status),
        )
        .route("/api/test", get(handlers::probe))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(cors)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context));

    Ok(router)
}

fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer, InfraError> {
    let origin = if settings.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = settings
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|err| InfraError::CorsOrigin {
                    origin: origin.clone(),
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]))
}
