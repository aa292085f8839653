use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, dashboard::DashboardViewDto},
    server::{
        controller::util::require_admin,
        error::Error,
        model::{app::AppState, session::flash::SessionFlash},
        service::dashboard::DashboardService,
        util::time::today,
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

/// Member counts for the dashboard tiles
///
/// # Responses
/// - 200 (OK): Total, active, expired and expiring-soon counts for today
/// - 303 (See Other): No admin signed in, redirect to `/login`
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardViewDto),
        (status = 303, description = "Not signed in, redirect to the login view"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let admin = require_admin(&session).await?;

    let summary = DashboardService::new(&state.db).summary(today()).await?;
    let flashes = SessionFlash::take(&session).await?;

    Ok(Json(DashboardViewDto {
        flashes,
        username: admin.username,
        summary,
    }))
}
