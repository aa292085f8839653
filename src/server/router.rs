//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every handler is registered with its utoipa path specification so the collected OpenAPI
//! document stays in sync with the router. Swagger UI is served at `/api/docs`.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's router.
///
/// `/` serves the same login view and form handler as `/login`. Files under `static_dir`,
/// including rendered invoices in its `generated` subdirectory, are served under `/static`.
pub fn routes(static_dir: &Path) -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Gymdesk", description = "Gym membership administration API"),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Admin sign in and sign out"),
            (name = controller::member::MEMBER_TAG, description = "Member records"),
            (name = controller::dashboard::DASHBOARD_TAG, description = "Membership counts"),
            (name = controller::reminder::REMINDER_TAG, description = "Invoices and renewal reminders"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login_page, controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::dashboard::dashboard))
        .routes(routes!(controller::member::list_members))
        .routes(routes!(
            controller::member::add_member_page,
            controller::member::add_member
        ))
        .routes(routes!(
            controller::member::edit_member_page,
            controller::member::edit_member
        ))
        .routes(routes!(controller::member::delete_member))
        .routes(routes!(
            controller::member::renew_member_page,
            controller::member::renew_member
        ))
        .routes(routes!(controller::reminder::generate_all_images))
        .routes(routes!(controller::reminder::send_reminder))
        .routes(routes!(controller::reminder::send_reminder_images))
        .routes(routes!(controller::reminder::get_reminder_batch))
        .split_for_parts();

    routes
        .route(
            "/",
            get(controller::auth::login_page).post(controller::auth::login),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
