use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::trip::default_true;

/// A trip booking. `wallet_amount + gateway_amount == total_amount` always holds.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub user_id: i32,
    pub trip_id: i32,
    pub seats: i32,
    pub total_amount: i64,
    pub wallet_amount: i64,
    pub gateway_amount: i64,
    pub status: String,
    pub confirmation_code: String,
    pub payment_reference: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateBookingDto {
    #[serde(default = "default_seats")]
    pub seats: i32,
    #[serde(default = "default_true")]
    pub use_wallet: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ConfirmBookingDto {
    pub payment_reference: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedBookingsDto {
    pub bookings: Vec<BookingDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

fn default_seats() -> i32 {
    1
}
