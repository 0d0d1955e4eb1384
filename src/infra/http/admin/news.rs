//! News list, editor and workflow handlers.

use axum::{
    extract::{
        Form, Path, Query, State,
        rejection::{FormRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    application::{
        admin::news::{NewsFormMode, NewsFormValues, form_view, list_view},
        error::{ErrorReport, HttpError},
        news::{CreateNewsCommand, NewsError},
        query::NewsListParams,
    },
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::AdminState;
use super::errors::{admin_news_error, render_error_page};
use super::flash::{Flash, redirect_with_flash, take_flash};

const LIST_PATH: &str = "/news";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AdminStatusForm {
    status: Option<String>,
}

pub(super) async fn admin_news_list(
    State(state): State<AdminState>,
    jar: CookieJar,
    params: Result<Query<NewsListParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            let err = HttpError::new(
                "infra::http::admin_news_list",
                StatusCode::BAD_REQUEST,
                "Invalid listing filters",
                rejection.body_text(),
            );
            return render_error_page(&state, LIST_PATH, err);
        }
    };
    let query = state.news.query_from(&params);
    let (page, counts) =
        match tokio::try_join!(state.news.list(&query), state.news.status_counts()) {
            Ok(result) => result,
            Err(err) => {
                return render_error_page(
                    &state,
                    LIST_PATH,
                    admin_news_error("infra::http::admin_news_list", err),
                );
            }
        };

    let content = list_view(page, counts, &query, state.news.default_per_page());
    let (jar, flash) = take_flash(jar);
    let view =
        admin_views::AdminLayout::new(state.chrome.load(LIST_PATH), content).with_flash(flash);
    (
        jar,
        render_template_response(admin_views::AdminNewsListTemplate { view }, StatusCode::OK),
    )
        .into_response()
}

pub(super) async fn admin_news_new(State(state): State<AdminState>) -> Response {
    render_form(
        &state,
        NewsFormMode::Create,
        NewsFormValues::blank(),
        None,
        StatusCode::OK,
    )
}

pub(super) async fn admin_news_create(
    State(state): State<AdminState>,
    jar: CookieJar,
    form: Result<Form<CreateNewsCommand>, FormRejection>,
) -> Response {
    let Form(command) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejection(&state, rejection),
    };

    match state.news.create(command.clone()).await {
        Ok(record) => redirect_with_flash(
            jar,
            Flash::success(format!("Created “{}”", record.title)),
            LIST_PATH,
        ),
        Err(NewsError::Validation(err)) => render_form(
            &state,
            NewsFormMode::Create,
            NewsFormValues::from_command(&command),
            Some(err.to_string()),
            StatusCode::BAD_REQUEST,
        ),
        Err(err) => render_error_page(
            &state,
            LIST_PATH,
            admin_news_error("infra::http::admin_news_create", err),
        ),
    }
}

pub(super) async fn admin_news_edit(
    State(state): State<AdminState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match news_id(id, "infra::http::admin_news_edit") {
        Ok(id) => id,
        Err(err) => return render_error_page(&state, LIST_PATH, err),
    };

    match state.news.find(id).await {
        Ok(record) => render_form(
            &state,
            NewsFormMode::Edit { id },
            NewsFormValues::from_record(&record),
            None,
            StatusCode::OK,
        ),
        Err(err) => render_error_page(
            &state,
            LIST_PATH,
            admin_news_error("infra::http::admin_news_edit", err),
        ),
    }
}

pub(super) async fn admin_news_update(
    State(state): State<AdminState>,
    jar: CookieJar,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<CreateNewsCommand>, FormRejection>,
) -> Response {
    let id = match news_id(id, "infra::http::admin_news_update") {
        Ok(id) => id,
        Err(err) => return render_error_page(&state, LIST_PATH, err),
    };
    let Form(command) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejection(&state, rejection),
    };

    match state.news.replace(id, command.clone()).await {
        Ok(record) => redirect_with_flash(
            jar,
            Flash::success(format!("Saved “{}”", record.title)),
            LIST_PATH,
        ),
        Err(NewsError::Validation(err)) => render_form(
            &state,
            NewsFormMode::Edit { id },
            NewsFormValues::from_command(&command),
            Some(err.to_string()),
            StatusCode::BAD_REQUEST,
        ),
        Err(err) => render_error_page(
            &state,
            LIST_PATH,
            admin_news_error("infra::http::admin_news_update", err),
        ),
    }
}

pub(super) async fn admin_news_delete(
    State(state): State<AdminState>,
    jar: CookieJar,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match news_id(id, "infra::http::admin_news_delete") {
        Ok(id) => id,
        Err(err) => return render_error_page(&state, LIST_PATH, err),
    };

    match state.news.delete(id).await {
        Ok(()) => redirect_with_flash(
            jar,
            Flash::success(format!("Deleted news item #{id}")),
            LIST_PATH,
        ),
        Err(err) => render_error_page(
            &state,
            LIST_PATH,
            admin_news_error("infra::http::admin_news_delete", err),
        ),
    }
}

pub(super) async fn admin_news_status(
    State(state): State<AdminState>,
    jar: CookieJar,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<AdminStatusForm>, FormRejection>,
) -> Response {
    let id = match news_id(id, "infra::http::admin_news_status") {
        Ok(id) => id,
        Err(err) => return render_error_page(&state, LIST_PATH, err),
    };
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return form_rejection(&state, rejection),
    };

    match state.news.update_status(id, form.status.as_deref()).await {
        Ok(record) => redirect_with_flash(
            jar,
            Flash::success(format!(
                "“{}” is now {}",
                record.title,
                record.status.label().to_lowercase()
            )),
            LIST_PATH,
        ),
        Err(NewsError::Validation(err)) => {
            redirect_with_flash(jar, Flash::error(err.to_string()), LIST_PATH)
        }
        Err(err) => render_error_page(
            &state,
            LIST_PATH,
            admin_news_error("infra::http::admin_news_status", err),
        ),
    }
}

fn render_form(
    state: &AdminState,
    mode: NewsFormMode,
    values: NewsFormValues,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let detail = error.clone();
    let content = form_view(mode, values, error);
    let view = admin_views::AdminLayout::new(state.chrome.load(LIST_PATH), content);
    let mut response =
        render_template_response(admin_views::AdminNewsFormTemplate { view }, status);
    if let Some(detail) = detail
        && response.status() == status
    {
        ErrorReport::from_message("infra::http::admin_news_form", status, detail)
            .attach(&mut response);
    }
    response
}

fn news_id(id: Result<Path<i64>, PathRejection>, source: &'static str) -> Result<i64, HttpError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => Err(HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "News item not found",
            rejection.body_text(),
        )),
    }
}

fn form_rejection(state: &AdminState, rejection: FormRejection) -> Response {
    let err = HttpError::new(
        "infra::http::admin_news_form",
        StatusCode::BAD_REQUEST,
        "Invalid form submission",
        rejection.body_text(),
    );
    render_error_page(state, LIST_PATH, err)
}
