use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct TripDto {
    pub id: i32,
    pub organizer_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub is_public: bool,
    pub max_participants: i32,
    /// Seat price in minor currency units (paise for INR).
    pub price_per_person: i64,
    pub currency: String,
    pub tags: Vec<String>,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateTripDto {
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_public: bool,
    pub max_participants: i32,
    #[serde(default)]
    pub price_per_person: i64,
    pub currency: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub cover_image_url: Option<String>,
}

/// Partial trip update. Omitted fields are left unchanged.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct UpdateTripDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only `cancelled` is accepted; other states follow the trip dates.
    pub status: Option<String>,
    pub is_public: Option<bool>,
    pub max_participants: Option<i32>,
    pub price_per_person: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub cover_image_url: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct TripMemberDto {
    pub user: UserSummaryDto,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedTripsDto {
    pub trips: Vec<TripDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

pub(crate) fn default_true() -> bool {
    true
}
