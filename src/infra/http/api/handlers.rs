use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::application::news::{
    CreateNewsCommand, FullNewsView, NewsProjection, ProjectedNews, UpdateNewsCommand,
};
use crate::application::pagination::PageMeta;
use crate::application::query::NewsListParams;
use crate::domain::types::NewsStatus;

use super::error::ApiError;
use super::models::{
    ApiEnvelope, HealthResponse, ProbeResponse, StatusChangeRequest, ViewQuery,
};
use super::state::ApiState;

type ApiResult<T> = Result<T, ApiError>;
type ObjectPayload = Result<Json<Map<String, Value>>, JsonRejection>;

/// -------- News --------
pub async fn list_news(
    State(state): State<ApiState>,
    params: Result<Query<NewsListParams>, QueryRejection>,
    view: Result<Query<ViewQuery>, QueryRejection>,
) -> ApiResult<Json<ApiEnvelope<Vec<ProjectedNews>>>> {
    let Query(params) = params.map_err(query_rejection)?;
    let Query(view) = view.map_err(query_rejection)?;

    let projection = NewsProjection::resolve(view.view.as_deref(), params.status.as_deref());
    let mut query = state.news.query_from(&params);

    if projection == NewsProjection::Public {
        match query.filter.status {
            None => query.filter.status = Some(NewsStatus::Published),
            Some(NewsStatus::Published) => {}
            // Nothing outside `published` is visible publicly.
            Some(_) => {
                let meta = PageMeta::new(query.page, 0);
                return Ok(Json(ApiEnvelope::page(
                    Vec::new(),
                    meta,
                    "Fetched 0 news items",
                )));
            }
        }
    }

    let page = state.news.list(&query).await?;
    let data = projection.project_all(&page.items);
    let message = format!("Fetched {} news items", data.len());

    Ok(Json(ApiEnvelope::page(data, page.meta, message)))
}

pub async fn get_news(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
    view: Result<Query<ViewQuery>, QueryRejection>,
) -> ApiResult<Json<ApiEnvelope<ProjectedNews>>> {
    let id = news_id(id)?;
    let Query(view) = view.map_err(query_rejection)?;

    let projection = NewsProjection::resolve(view.view.as_deref(), view.status.as_deref());
    let record = state.news.find(id).await?;
    let data = projection
        .project(&record)
        .ok_or_else(|| ApiError::news_not_found(id))?;

    Ok(Json(ApiEnvelope::data(data, "Fetched news item")))
}

pub async fn create_news(
    State(state): State<ApiState>,
    payload: ObjectPayload,
) -> ApiResult<impl IntoResponse> {
    let command: CreateNewsCommand = object_body(payload)?;
    let record = state.news.create(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::data(
            FullNewsView::from(&record),
            "News item created",
        )),
    ))
}

pub async fn update_news(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
    payload: ObjectPayload,
) -> ApiResult<Json<ApiEnvelope<FullNewsView>>> {
    let id = news_id(id)?;
    let command: UpdateNewsCommand = object_body(payload)?;
    let record = state.news.update(id, command).await?;

    Ok(Json(ApiEnvelope::data(
        FullNewsView::from(&record),
        "News item updated",
    )))
}

pub async fn delete_news(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    let id = news_id(id)?;
    state.news.delete(id).await?;
    Ok(Json(ApiEnvelope::message("News item deleted")))
}

pub async fn update_news_status(
    State(state): State<ApiState>,
    id: Result<Path<i64>, PathRejection>,
    payload: ObjectPayload,
) -> ApiResult<Json<ApiEnvelope<FullNewsView>>> {
    let id = news_id(id)?;
    let request: StatusChangeRequest = object_body(payload)?;
    let record = state
        .news
        .update_status(id, request.status.as_deref())
        .await?;

    let message = format!("News status updated to {}", record.status);
    Ok(Json(ApiEnvelope::data(FullNewsView::from(&record), message)))
}

/// -------- Service probes --------
pub async fn probe(State(state): State<ApiState>) -> Json<ProbeResponse> {
    Json(ProbeResponse {
        success: true,
        message: "Newsroom API is running".to_string(),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.to_string(),
    })
}

pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let database = match state.health.ping().await {
        Ok(()) => "healthy".to_string(),
        Err(err) => format!("unhealthy: {err}"),
    };

    Json(HealthResponse {
        success: true,
        status: "running",
        database,
        timestamp: OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default(),
    })
}

/// -------- Fallbacks --------
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(
        "Resource not found",
        format!("no route for `{}`", uri.path()),
    )
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

fn news_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => Err(ApiError::not_found(
            "News item not found",
            rejection.body_text(),
        )),
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::invalid_json(rejection.body_text())
}

/// Write bodies must be JSON objects keyed by field name.
fn object_body<T: DeserializeOwned>(payload: ObjectPayload) -> ApiResult<T> {
    let Json(body) = payload.map_err(json_rejection)?;
    serde_json::from_value(Value::Object(body))
        .map_err(|err| ApiError::invalid_json(err.to_string()))
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::bad_request("Invalid query string", rejection.body_text())
}
