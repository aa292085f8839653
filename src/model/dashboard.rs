use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::FlashDto;

/// Dashboard tile counts.
///
/// `expiring_soon` is a subset of `active`; the tiles overlap on purpose.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub total_members: u64,
    pub active_members: u64,
    pub expired_members: u64,
    pub expiring_soon: u64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DashboardViewDto {
    pub flashes: Vec<FlashDto>,
    pub username: String,
    #[serde(flatten)]
    pub summary: DashboardDto,
}
