use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::presentation::{admin::views as admin_views, views::render_template_response};

use super::AdminState;
use super::errors::render_error_page;
use super::flash::take_flash;

pub(super) async fn admin_dashboard(State(state): State<AdminState>, jar: CookieJar) -> Response {
    let content = match state.dashboard.overview().await {
        Ok(view) => view,
        Err(err) => return render_error_page(&state, "/", err),
    };

    let (jar, flash) = take_flash(jar);
    let view = admin_views::AdminLayout::new(state.chrome.load("/"), content).with_flash(flash);
    (
        jar,
        render_template_response(admin_views::AdminDashboardTemplate { view }, StatusCode::OK),
    )
        .into_response()
}
