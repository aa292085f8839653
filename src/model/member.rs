use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::api::FlashDto;

/// Membership state derived from the days remaining until `end_date`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MembershipStatus {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    #[serde(rename = "Expired")]
    Expired,
    /// The stored end date could not be parsed
    #[serde(rename = "Unknown")]
    Unknown,
}

impl MembershipStatus {
    /// Label drawn on invoice badges and shown in listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
            Self::Unknown => "Unknown",
        }
    }
}

/// A member row augmented with derived fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub id: i32,
    pub name: String,
    pub mobile: String,
    pub plan: String,
    pub package: String,
    pub joined_date: String,
    pub end_date: String,
    /// Days until `end_date`; `0` when the stored date cannot be parsed
    pub days_left: i64,
    pub status: MembershipStatus,
}

/// Fields submitted by the add and edit forms.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberFormDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub joined_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Fields submitted by the renew form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RenewFormDto {
    #[serde(default)]
    pub joined_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct MemberSearchParams {
    /// Case-insensitive substring matched against name or mobile
    pub search: Option<String>,
}

/// Member listing view
#[derive(Serialize, Deserialize, ToSchema)]
pub struct MemberListViewDto {
    pub flashes: Vec<FlashDto>,
    pub members: Vec<MemberDto>,
    pub search_query: String,
}

/// Add member view, echoing back the submitted values after a rejected submission
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AddMemberViewDto {
    pub flashes: Vec<FlashDto>,
    pub form: Option<MemberFormDto>,
}

/// Edit and renew views
#[derive(Serialize, Deserialize, ToSchema)]
pub struct MemberViewDto {
    pub flashes: Vec<FlashDto>,
    pub member: MemberDto,
}
