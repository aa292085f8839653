use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, FlashDto, FlashLevel},
        member::{
            AddMemberViewDto, MemberFormDto, MemberListViewDto, MemberSearchParams, MemberViewDto,
            RenewFormDto,
        },
    },
    server::{
        controller::util::{redirect_with_flash, require_admin},
        error::{member::MemberError, Error},
        model::{app::AppState, session::flash::SessionFlash},
        service::member::MemberService,
        util::time::today,
    },
};

pub static MEMBER_TAG: &str = "member";

/// Turns a rejected member action into a flash notice and redirect.
///
/// A missing member always goes back to the listing; validation failures go to `retry_to`.
async fn member_rejected(
    session: &Session,
    err: MemberError,
    retry_to: &str,
) -> Result<Response, Error> {
    let to = match err {
        MemberError::NotFound(_) => "/members",
        _ => retry_to,
    };

    redirect_with_flash(session, FlashLevel::Danger, err.notice(), to).await
}

/// Member listing, optionally filtered by name or mobile
///
/// # Responses
/// - 200 (OK): Members ordered by end date with days left and status
/// - 303 (See Other): No admin signed in, redirect to `/login`
#[utoipa::path(
    get,
    path = "/members",
    tag = MEMBER_TAG,
    params(MemberSearchParams),
    responses(
        (status = 200, description = "Member listing", body = MemberListViewDto),
        (status = 303, description = "Not signed in, redirect to the login view"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_members(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<MemberSearchParams>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session).await?;

    let search_query = params.search.as_deref().unwrap_or_default().trim().to_string();
    let members = MemberService::new(&state.db)
        .list(Some(&search_query), today())
        .await?;
    let flashes = SessionFlash::take(&session).await?;

    Ok(Json(MemberListViewDto {
        flashes,
        members,
        search_query,
    }))
}

/// Add member view
#[utoipa::path(
    get,
    path = "/add",
    tag = MEMBER_TAG,
    responses(
        (status = 200, description = "Add member view", body = AddMemberViewDto),
        (status = 303, description = "Not signed in, redirect to the login view"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_member_page(session: Session) -> Result<impl IntoResponse, Error> {
    require_admin(&session).await?;

    let flashes = SessionFlash::take(&session).await?;

    Ok(Json(AddMemberViewDto {
        flashes,
        form: None,
    }))
}

/// Adds a member
///
/// # Responses
/// - 303 (See Other): Member added, redirect to `/members`
/// - 422 (Unprocessable Entity): A field was empty or a date was not `YYYY-MM-DD`, the add view
///   with the submitted values
#[utoipa::path(
    post,
    path = "/add",
    tag = MEMBER_TAG,
    request_body(content = MemberFormDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Member added, redirect to the listing"),
        (status = 422, description = "Missing fields or invalid dates", body = AddMemberViewDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_member(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MemberFormDto>,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    match MemberService::new(&state.db).add(form.clone()).await {
        Ok(_) => {
            redirect_with_flash(&session, FlashLevel::Success, "Member added!", "/members").await
        }
        Err(Error::MemberError(
            err @ (MemberError::MissingFields | MemberError::InvalidDate),
        )) => {
            let message = match err {
                MemberError::MissingFields => "Please fill all fields.",
                _ => err.notice(),
            };

            let mut flashes = SessionFlash::take(&session).await?;
            flashes.push(FlashDto {
                level: FlashLevel::Warning,
                message: message.to_string(),
            });

            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(AddMemberViewDto {
                    flashes,
                    form: Some(form),
                }),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// Edit member view
#[utoipa::path(
    get,
    path = "/edit/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Edit member view", body = MemberViewDto),
        (status = 303, description = "Member not found or not signed in"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn edit_member_page(
    State(state): State<AppState>,
    session: Session,
    Path(member_id): Path<i32>,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    member_view(&state, &session, member_id).await
}

/// Replaces every field of a member
///
/// # Responses
/// - 303 (See Other): Updated, redirect to `/members`; invalid input, redirect back to
///   `/edit/{id}`; unknown member, redirect to `/members`
#[utoipa::path(
    post,
    path = "/edit/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member id")),
    request_body(content = MemberFormDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect with a notice describing the outcome"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn edit_member(
    State(state): State<AppState>,
    session: Session,
    Path(member_id): Path<i32>,
    Form(form): Form<MemberFormDto>,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    match MemberService::new(&state.db).edit(member_id, form).await {
        Ok(_) => {
            redirect_with_flash(
                &session,
                FlashLevel::Success,
                "Updated successfully!",
                "/members",
            )
            .await
        }
        Err(Error::MemberError(err)) => {
            member_rejected(&session, err, &format!("/edit/{}", member_id)).await
        }
        Err(e) => Err(e),
    }
}

/// Deletes a member
///
/// Deleting an id that does not exist still reports success.
#[utoipa::path(
    get,
    path = "/delete/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 303, description = "Deleted, redirect to the listing"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_member(
    State(state): State<AppState>,
    session: Session,
    Path(member_id): Path<i32>,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    MemberService::new(&state.db).delete(member_id).await?;

    redirect_with_flash(&session, FlashLevel::Info, "Member deleted!", "/members").await
}

/// Renew member view
#[utoipa::path(
    get,
    path = "/renew/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Renew member view", body = MemberViewDto),
        (status = 303, description = "Member not found or not signed in"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn renew_member_page(
    State(state): State<AppState>,
    session: Session,
    Path(member_id): Path<i32>,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    member_view(&state, &session, member_id).await
}

/// Sets new joined and end dates for a member
#[utoipa::path(
    post,
    path = "/renew/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member id")),
    request_body(content = RenewFormDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect with a notice describing the outcome"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn renew_member(
    State(state): State<AppState>,
    session: Session,
    Path(member_id): Path<i32>,
    Form(form): Form<RenewFormDto>,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    match MemberService::new(&state.db).renew(member_id, form).await {
        Ok(_) => {
            redirect_with_flash(
                &session,
                FlashLevel::Success,
                "Renewed successfully!",
                "/members",
            )
            .await
        }
        Err(Error::MemberError(err)) => {
            member_rejected(&session, err, &format!("/renew/{}", member_id)).await
        }
        Err(e) => Err(e),
    }
}

/// Shared by the edit and renew views
async fn member_view(
    state: &AppState,
    session: &Session,
    member_id: i32,
) -> Result<Response, Error> {
    match MemberService::new(&state.db).get(member_id, today()).await {
        Ok(member) => {
            let flashes = SessionFlash::take(session).await?;

            Ok(Json(MemberViewDto { flashes, member }).into_response())
        }
        Err(Error::MemberError(err)) => member_rejected(session, err, "/members").await,
        Err(e) => Err(e),
    }
}
