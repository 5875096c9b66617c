//! Booking factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for bookings. Defaults to a single-seat `pending_payment` booking
/// paid entirely through the gateway and expiring in thirty minutes.
pub struct BookingFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    trip_id: i32,
    seats: i32,
    total_amount: i64,
    wallet_amount: i64,
    status: String,
    expires_at: Option<DateTime<Utc>>,
}

impl<'a> BookingFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, trip_id: i32) -> Self {
        Self {
            db,
            user_id,
            trip_id,
            seats: 1,
            total_amount: 100_000,
            wallet_amount: 0,
            status: "pending_payment".to_string(),
            expires_at: Some(Utc::now() + chrono::Duration::minutes(30)),
        }
    }

    pub fn seats(mut self, seats: i32) -> Self {
        self.seats = seats;
        self
    }

    /// Sets the total and the wallet-paid portion; the gateway portion is the difference.
    pub fn amounts(mut self, total_amount: i64, wallet_amount: i64) -> Self {
        self.total_amount = total_amount;
        self.wallet_amount = wallet_amount;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub async fn build(self) -> Result<entity::booking::Model, DbErr> {
        let now = Utc::now();
        entity::booking::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            trip_id: ActiveValue::Set(self.trip_id),
            seats: ActiveValue::Set(self.seats),
            total_amount: ActiveValue::Set(self.total_amount),
            wallet_amount: ActiveValue::Set(self.wallet_amount),
            gateway_amount: ActiveValue::Set(self.total_amount - self.wallet_amount),
            status: ActiveValue::Set(self.status),
            confirmation_code: ActiveValue::Set(format!("WS-TEST{:06}", next_id())),
            payment_reference: ActiveValue::Set(None),
            expires_at: ActiveValue::Set(self.expires_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
