use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, FlashDto, FlashLevel},
        reminder::{GenerateImagesDto, ReminderBatchDto, ReminderBatchViewDto, ReminderSentDto},
    },
    server::{
        controller::util::{redirect_with_flash, require_admin},
        error::Error,
        model::{app::AppState, session::flash::SessionFlash},
        service::reminder::{ImageReminderOutcome, ReminderOutcome, ReminderService},
        util::time::today,
    },
};

pub static REMINDER_TAG: &str = "reminder";

const NO_CANDIDATES_NOTICE: &str = "No members expiring soon.";

/// Renders invoice images for every member expiring within the next 4 days
///
/// # Responses
/// - 200 (OK): `nothing_to_generate`, or `generated` with the number of invoices written
/// - 500 (Internal Server Error): The template could not be loaded or an invoice not written
#[utoipa::path(
    get,
    path = "/generate_all_images",
    tag = REMINDER_TAG,
    responses(
        (status = 200, description = "Generation outcome", body = GenerateImagesDto),
        (status = 303, description = "Not signed in, redirect to the login view"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_all_images(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session).await?;

    let outcome = ReminderService::new(&state.db, &state.messaging, &state.renderer)
        .generate_invoices(today())
        .await?;

    Ok(Json(outcome))
}

/// Sends a text reminder to every member expiring within the next 4 days
///
/// # Responses
/// - 200 (OK): Number of reminders the provider accepted
/// - 303 (See Other): Nobody is expiring soon, redirect to `/members` with a notice
#[utoipa::path(
    get,
    path = "/send_reminder",
    tag = REMINDER_TAG,
    responses(
        (status = 200, description = "Reminders sent", body = ReminderSentDto),
        (status = 303, description = "No candidates or not signed in"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_reminder(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    let outcome = ReminderService::new(&state.db, &state.messaging, &state.renderer)
        .send_text_reminders(today())
        .await?;

    match outcome {
        ReminderOutcome::NoCandidates => {
            redirect_with_flash(&session, FlashLevel::Info, NO_CANDIDATES_NOTICE, "/members").await
        }
        ReminderOutcome::Sent { count } => {
            let mut flashes = SessionFlash::take(&session).await?;
            flashes.push(FlashDto {
                level: FlashLevel::Success,
                message: format!("Reminders sent to {} members.", count),
            });

            Ok(Json(ReminderSentDto { flashes, count }).into_response())
        }
    }
}

/// Queues an invoice image reminder for every member expiring within the next 4 days
///
/// Reminders are delivered in the background, one at a time with a pause between them. Poll
/// the returned `status_url` for progress.
///
/// # Responses
/// - 202 (Accepted): The queued batch
/// - 303 (See Other): Nobody is expiring soon, redirect to `/members` with a notice
#[utoipa::path(
    get,
    path = "/send_reminder_images",
    tag = REMINDER_TAG,
    responses(
        (status = 202, description = "Reminder batch queued", body = ReminderBatchViewDto),
        (status = 303, description = "No candidates or not signed in"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_reminder_images(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    require_admin(&session).await?;

    let outcome = ReminderService::new(&state.db, &state.messaging, &state.renderer)
        .queue_image_reminders(&state.worker, today())
        .await?;

    match outcome {
        ImageReminderOutcome::NoCandidates => {
            redirect_with_flash(&session, FlashLevel::Info, NO_CANDIDATES_NOTICE, "/members").await
        }
        ImageReminderOutcome::Queued(batch) => {
            let mut flashes = SessionFlash::take(&session).await?;
            flashes.push(FlashDto {
                level: FlashLevel::Success,
                message: format!("Queued reminder images for {} members.", batch.total),
            });
            let status_url = format!("/reminders/batches/{}", batch.id);

            Ok((
                StatusCode::ACCEPTED,
                Json(ReminderBatchViewDto {
                    flashes,
                    batch,
                    status_url,
                }),
            )
                .into_response())
        }
    }
}

/// Progress of a queued reminder batch
///
/// # Responses
/// - 200 (OK): Processed, sent and failed counts
/// - 404 (Not Found): No such batch since the server started
#[utoipa::path(
    get,
    path = "/reminders/batches/{id}",
    tag = REMINDER_TAG,
    params(("id" = Uuid, Path, description = "Batch id")),
    responses(
        (status = 200, description = "Batch progress", body = ReminderBatchDto),
        (status = 303, description = "Not signed in, redirect to the login view"),
        (status = 404, description = "Batch not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reminder_batch(
    State(state): State<AppState>,
    session: Session,
    Path(batch_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session).await?;

    let batch = state.worker.batch_status(batch_id).await?;

    Ok(Json(batch))
}
