use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use tower_sessions::Session;

use crate::{
    model::api::{ErrorDto, FlashDto, FlashLevel, LoginFormDto, LoginViewDto},
    server::{
        controller::util::redirect_with_flash,
        error::Error,
        model::{
            app::AppState,
            session::{admin::SessionAdmin, flash::SessionFlash},
        },
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Login view
///
/// Drains pending flash notices, such as the one left by logout.
///
/// # Responses
/// - 200 (OK): The login view
#[utoipa::path(
    get,
    path = "/login",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Login view", body = LoginViewDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login_page(session: Session) -> Result<impl IntoResponse, Error> {
    let flashes = SessionFlash::take(&session).await?;

    Ok(Json(LoginViewDto { flashes }))
}

/// Verifies admin credentials and signs the admin in
///
/// # Responses
/// - 303 (See Other): Signed in, redirect to `/dashboard`
/// - 401 (Unauthorized): Unknown username or wrong password, the login view with a notice
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body(content = LoginFormDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirect to the dashboard"),
        (status = 401, description = "Invalid credentials", body = LoginViewDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginFormDto>,
) -> Result<Response, Error> {
    let username = form.username.trim();

    let Some(admin) = AuthService::new(&state.db)
        .login(username, &form.password)
        .await?
    else {
        let mut flashes = SessionFlash::take(&session).await?;
        flashes.push(FlashDto {
            level: FlashLevel::Danger,
            message: "Invalid username or password".to_string(),
        });

        return Ok((StatusCode::UNAUTHORIZED, Json(LoginViewDto { flashes })).into_response());
    };

    // New session id on privilege change
    session.cycle_id().await?;
    SessionAdmin::insert(&session, &admin).await?;

    tracing::info!(admin_id = %admin.id, "Admin signed in");

    redirect_with_flash(
        &session,
        FlashLevel::Success,
        format!("Welcome back, {}!", admin.username),
        "/dashboard",
    )
    .await
}

/// Signs the admin out by clearing their session
///
/// # Responses
/// - 303 (See Other): Redirect to `/login` with a notice
/// - 500 (Internal Server Error): The session could not be written
#[utoipa::path(
    get,
    path = "/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Signed out, redirect to the login view"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<Response, Error> {
    session.clear().await;

    redirect_with_flash(
        &session,
        FlashLevel::Info,
        "Logged out successfully.",
        "/login",
    )
    .await
}
