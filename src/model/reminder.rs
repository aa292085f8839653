use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::api::FlashDto;

/// Result of the text reminder dispatch
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ReminderSentDto {
    pub flashes: Vec<FlashDto>,
    pub count: usize,
}

/// Result of generating invoice images for the reminder window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerateImagesDto {
    /// No member ends within the reminder window
    NothingToGenerate,
    Generated { count: usize },
}

/// Progress of a queued batch of invoice image reminders
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReminderBatchDto {
    pub id: Uuid,
    pub total: usize,
    pub processed: usize,
    pub sent: usize,
    pub failed: usize,
    pub finished: bool,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ReminderBatchViewDto {
    pub flashes: Vec<FlashDto>,
    pub batch: ReminderBatchDto,
    /// Poll this path for progress
    pub status_url: String,
}
