use crate::application::error::ErrorReport;
use crate::application::news::NewsError;
use crate::application::repos::RepoError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const INVALID_JSON: &str = "invalid_json";
    pub const VALIDATION: &str = "validation_error";
    pub const NOT_FOUND: &str = "not_found";
    pub const METHOD_NOT_ALLOWED: &str = "method_not_allowed";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const INTEGRITY: &str = "integrity_error";
    pub const DB_TIMEOUT: &str = "db_timeout";
    pub const REPO: &str = "repo_error";
}

/// Error envelope: `{success: false, error, message}` plus a machine-readable code.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    error: &'static str,
    message: String,
    field: Option<&'static str>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        error: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code,
            error,
            message: message.into(),
            field: None,
        }
    }

    pub fn bad_request(error: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, error, message)
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_JSON,
            "Invalid JSON body",
            message,
        )
    }

    pub fn not_found(error: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, error, message)
    }

    pub fn news_not_found(id: i64) -> Self {
        Self::not_found(
            "News item not found",
            format!("news item {id} does not exist"),
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            codes::METHOD_NOT_ALLOWED,
            "Method not allowed",
            "the requested method is not supported for this resource",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }
}

impl From<NewsError> for ApiError {
    fn from(err: NewsError) -> Self {
        match err {
            NewsError::Validation(domain) => {
                let field = domain.field();
                let error = ApiError::new(
                    StatusCode::BAD_REQUEST,
                    codes::VALIDATION,
                    "Validation failed",
                    domain.to_string(),
                );
                match field {
                    Some(field) => error.with_field(field),
                    None => error,
                }
            }
            NewsError::NotFound { id } => ApiError::news_not_found(id),
            NewsError::Repo(repo) => repo_to_api(repo),
        }
    }
}

fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::NotFound => ApiError::not_found("Resource not found", "resource not found"),
        RepoError::InvalidInput { message } => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid input",
            message,
        ),
        RepoError::Integrity { message } => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTEGRITY,
            "Integrity constraint violated",
            message,
        ),
        RepoError::Timeout => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::DB_TIMEOUT,
            "Database timeout",
            "the database did not respond in time",
        ),
        RepoError::Persistence(message) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Internal server error",
            message,
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = format!("{}: {}", self.code, self.message);
        let body = ApiErrorBody {
            success: false,
            error: self.error.to_string(),
            message: self.message,
            code: self.code.to_string(),
            field: self.field.map(str::to_string),
        };
        let mut response = (self.status, Json(body)).into_response();
        // Shared logging middleware reads the report to emit diagnostics.
        ErrorReport::from_message("infra::http::api", self.status, detail).attach(&mut response);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;

    #[test]
    fn validation_errors_name_the_field() {
        let err = ApiError::from(NewsError::Validation(DomainError::validation(
            "date",
            "date must use the YYYY-MM-DD format",
        )));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.field, Some("date"));
        assert_eq!(err.message, "date must use the YYYY-MM-DD format");
    }

    #[test]
    fn storage_failures_are_internal_errors() {
        let err = ApiError::from(NewsError::Repo(RepoError::Timeout));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, codes::DB_TIMEOUT);

        let err = ApiError::from(NewsError::NotFound { id: 4 });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
