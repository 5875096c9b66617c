//! Booking domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::booking::{BookingDto, PaginatedBookingsDto},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::Page,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Part of the total is still owed through the payment gateway.
    PendingPayment,
    Confirmed,
    Cancelled,
    /// The payment window passed before the booking was confirmed.
    Expired,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        match value {
            "pending_payment" => Ok(Self::PendingPayment),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            _ => Err(InternalError::UnknownEnumValue {
                kind: "booking status",
                value: value.to_string(),
            }),
        }
    }

    /// Pending and confirmed bookings hold seats on the trip.
    pub fn holds_seats(self) -> bool {
        matches!(self, Self::PendingPayment | Self::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub trip_id: i32,
    pub seats: i32,
    pub total_amount: i64,
    pub wallet_amount: i64,
    pub gateway_amount: i64,
    pub status: BookingStatus,
    pub confirmation_code: String,
    pub payment_reference: Option<String>,
    /// Deadline for gateway payment; only set while pending.
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_entity(entity: entity::booking::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            trip_id: entity.trip_id,
            seats: entity.seats,
            total_amount: entity.total_amount,
            wallet_amount: entity.wallet_amount,
            gateway_amount: entity.gateway_amount,
            status: BookingStatus::from_stored(&entity.status)?,
            confirmation_code: entity.confirmation_code,
            payment_reference: entity.payment_reference,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    pub fn into_dto(self) -> BookingDto {
        BookingDto {
            id: self.id,
            user_id: self.user_id,
            trip_id: self.trip_id,
            seats: self.seats,
            total_amount: self.total_amount,
            wallet_amount: self.wallet_amount,
            gateway_amount: self.gateway_amount,
            status: self.status.as_str().to_string(),
            confirmation_code: self.confirmation_code,
            payment_reference: self.payment_reference,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Page<Booking> {
    pub fn into_dto(self) -> PaginatedBookingsDto {
        PaginatedBookingsDto {
            bookings: self.items.into_iter().map(Booking::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookingParams {
    pub user_id: i32,
    pub trip_id: i32,
    pub seats: i32,
    /// Net the wallet balance against the total before charging the gateway.
    pub use_wallet: bool,
}

/// Row values for a new booking, computed by the booking service.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i32,
    pub trip_id: i32,
    pub seats: i32,
    pub total_amount: i64,
    pub wallet_amount: i64,
    pub status: BookingStatus,
    pub confirmation_code: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Splits a booking total into the wallet-paid part and the gateway remainder.
///
/// # Returns
/// `(wallet_amount, gateway_amount)` with `wallet_amount + gateway_amount == total`
pub fn split_payment(total: i64, wallet_balance: i64, use_wallet: bool) -> (i64, i64) {
    let wallet_amount = if use_wallet {
        wallet_balance.clamp(0, total)
    } else {
        0
    };
    (wallet_amount, total - wallet_amount)
}
