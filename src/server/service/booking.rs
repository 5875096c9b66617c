//! Trip booking service.
//!
//! A booking nets the traveller's wallet balance against the trip total. The wallet
//! debit and the booking row are written in one transaction. When the wallet covers the
//! whole total the booking is confirmed at once; otherwise the remainder is left for
//! the payment gateway and the booking waits in `pending_payment` until it is confirmed
//! or its payment window closes.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::collections::HashSet;

use crate::server::{
    data::{booking::BookingRepository, trip::TripRepository, wallet::WalletRepository},
    error::{auth::AuthError, AppError},
    model::{
        booking::{split_payment, Booking, BookingStatus, CreateBookingParams, NewBooking},
        notification::{NotificationKind, SendNotificationParams},
        pagination::Page,
        trip::{Trip, TripRole},
        wallet::{
            booking_debit_reference, booking_refund_reference, LedgerEntryParams,
            TransactionKind,
        },
    },
    service::{notification::NotificationService, wallet::apply_entry},
};

/// Attempts at drawing an unused confirmation code before giving up.
const CONFIRMATION_CODE_ATTEMPTS: usize = 5;

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    payment_window: Duration,
}

impl<'a> BookingService<'a> {
    pub fn new(db: &'a DatabaseConnection, payment_window: Duration) -> Self {
        Self { db, payment_window }
    }

    /// Books seats on a trip.
    ///
    /// Only public trips can be booked. Private trips answer 404 to outsiders and 409 to
    /// members, who already hold their place.
    ///
    /// # Returns
    /// - `Ok(Booking)` - Confirmed booking, or pending when a gateway payment remains
    /// - `Err(AppError::NotFound)` - Trip missing or private to the caller
    /// - `Err(AppError::BadRequest)` - Invalid seat count, closed trip, organizer booking
    ///   their own trip, or not enough seats left
    /// - `Err(AppError::Conflict)` - Caller already a member or holding a booking
    pub async fn create(&self, params: CreateBookingParams) -> Result<Booking, AppError> {
        if params.seats < 1 {
            return Err(AppError::BadRequest("At least one seat is required".to_string()));
        }

        let txn = self.db.begin().await?;

        let trip_repo = TripRepository::new(&txn);
        let Some(trip) = trip_repo.find_by_id(params.trip_id).await? else {
            return Err(AppError::NotFound("Trip not found".to_string()));
        };
        let role = trip_repo
            .find_member_role(trip.id, params.user_id)
            .await?;

        if !trip.is_public && role.is_none() {
            return Err(AppError::NotFound("Trip not found".to_string()));
        }
        if !trip.status.is_open() {
            return Err(AppError::BadRequest(format!(
                "Trip is {} and no longer accepts bookings",
                trip.status.as_str()
            )));
        }
        if trip.organizer_id == params.user_id {
            return Err(AppError::BadRequest(
                "Organizers cannot book their own trip".to_string(),
            ));
        }
        if role.is_some() {
            return Err(AppError::Conflict("Already a member of this trip".to_string()));
        }

        let booking_repo = BookingRepository::new(&txn);
        let holding = booking_repo.seat_holding_for_trip(trip.id).await?;
        if holding.iter().any(|b| b.user_id == params.user_id) {
            return Err(AppError::Conflict(
                "You already hold a booking for this trip".to_string(),
            ));
        }

        let occupied = occupied_seats(&txn, trip.id).await?;
        if occupied + i64::from(params.seats) > i64::from(trip.max_participants) {
            return Err(AppError::BadRequest("Not enough seats left on this trip".to_string()));
        }

        let total_amount = trip
            .price_per_person
            .checked_mul(i64::from(params.seats))
            .ok_or_else(|| AppError::BadRequest("Booking total is too large".to_string()))?;
        let balance = WalletRepository::new(&txn)
            .get_or_create(params.user_id)
            .await?
            .balance;
        let (wallet_amount, gateway_amount) =
            split_payment(total_amount, balance, params.use_wallet);

        let (status, expires_at) = if gateway_amount == 0 {
            (BookingStatus::Confirmed, None)
        } else {
            (
                BookingStatus::PendingPayment,
                Some(Utc::now() + self.payment_window),
            )
        };

        let booking = booking_repo
            .create(NewBooking {
                user_id: params.user_id,
                trip_id: trip.id,
                seats: params.seats,
                total_amount,
                wallet_amount,
                status,
                confirmation_code: unused_confirmation_code(&txn).await?,
                expires_at,
            })
            .await?;

        if wallet_amount > 0 {
            apply_entry(
                &txn,
                TransactionKind::Debit,
                LedgerEntryParams {
                    user_id: params.user_id,
                    amount: wallet_amount,
                    reference: booking_debit_reference(booking.id),
                    description: format!(
                        "Booking {} for {}",
                        booking.confirmation_code, trip.title
                    ),
                    booking_id: Some(booking.id),
                },
            )
            .await?;
        }

        if status == BookingStatus::Confirmed {
            trip_repo
                .ensure_participant(trip.id, params.user_id)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Booking {} created for user {} on trip {} ({})",
            booking.id,
            booking.user_id,
            trip.id,
            booking.status.as_str()
        );

        if booking.status == BookingStatus::Confirmed {
            self.notify_confirmed(&booking, &trip).await;
        }

        Ok(booking)
    }

    /// Confirms a pending booking once the gateway payment has been made.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Booking missing or owned by someone else
    /// - `Err(AppError::BadRequest)` - Empty payment reference, booking not pending,
    ///   or payment window closed
    pub async fn confirm(
        &self,
        booking_id: i32,
        user_id: i32,
        payment_reference: String,
    ) -> Result<Booking, AppError> {
        let payment_reference = payment_reference.trim().to_string();
        if payment_reference.is_empty() {
            return Err(AppError::BadRequest("Payment reference is required".to_string()));
        }

        let txn = self.db.begin().await?;

        let booking = find_owned(&txn, booking_id, user_id).await?;
        if booking.status != BookingStatus::PendingPayment {
            return Err(AppError::BadRequest(format!(
                "Booking is {} and cannot be confirmed",
                booking.status.as_str()
            )));
        }
        if booking.is_expired_at(Utc::now()) {
            return Err(AppError::BadRequest("The payment window has closed".to_string()));
        }

        let confirmed = update_status(
            &txn,
            booking.id,
            BookingStatus::Confirmed,
            Some(payment_reference),
        )
        .await?;
        TripRepository::new(&txn)
            .ensure_participant(confirmed.trip_id, confirmed.user_id)
            .await?;
        let trip = TripRepository::new(&txn).find_by_id(confirmed.trip_id).await?;

        txn.commit().await?;

        tracing::info!("Booking {} confirmed by user {}", confirmed.id, user_id);

        if let Some(trip) = trip {
            self.notify_confirmed(&confirmed, &trip).await;
        }

        Ok(confirmed)
    }

    /// Cancels a pending or confirmed booking and refunds its wallet portion.
    ///
    /// A confirmed booking also gives up its trip membership.
    pub async fn cancel(&self, booking_id: i32, user_id: i32) -> Result<Booking, AppError> {
        let txn = self.db.begin().await?;

        let booking = find_owned(&txn, booking_id, user_id).await?;
        if !booking.status.holds_seats() {
            return Err(AppError::BadRequest(format!(
                "Booking is {} and cannot be cancelled",
                booking.status.as_str()
            )));
        }

        let cancelled = release(&txn, &booking, BookingStatus::Cancelled).await?;

        if booking.status == BookingStatus::Confirmed {
            let trip_repo = TripRepository::new(&txn);
            if trip_repo.find_member_role(booking.trip_id, booking.user_id).await?
                == Some(TripRole::Participant)
            {
                trip_repo.remove_member(booking.trip_id, booking.user_id).await?;
            }
        }

        txn.commit().await?;

        tracing::info!("Booking {} cancelled by user {}", cancelled.id, user_id);

        NotificationService::new(self.db)
            .notify(SendNotificationParams {
                user_id: cancelled.user_id,
                kind: NotificationKind::BookingCancelled,
                title: "Booking cancelled".to_string(),
                message: refund_message(&cancelled),
                data: serde_json::json!({
                    "booking_id": cancelled.id,
                    "trip_id": cancelled.trip_id,
                    "refunded": cancelled.wallet_amount,
                }),
            })
            .await;

        Ok(cancelled)
    }

    /// Expires pending bookings whose payment window closed at or before `now`.
    ///
    /// Each booking is expired in its own transaction; one failure is logged and does not
    /// stop the rest.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of bookings expired
    pub async fn expire_overdue(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let ids = BookingRepository::new(self.db).overdue_ids(now).await?;

        let mut expired = 0;
        for id in ids {
            match self.expire_one(id, now).await {
                Ok(true) => expired += 1,
                Ok(false) => {}
                Err(e) => tracing::error!("Failed to expire booking {}: {}", id, e),
            }
        }

        Ok(expired)
    }

    /// Returns a booking visible to its owner or the trip organizer.
    pub async fn get(&self, booking_id: i32, user_id: i32) -> Result<Booking, AppError> {
        let not_found = || AppError::NotFound("Booking not found".to_string());

        let booking = BookingRepository::new(self.db)
            .find_by_id(booking_id)
            .await?
            .ok_or_else(not_found)?;
        if booking.user_id == user_id {
            return Ok(booking);
        }

        let trip = TripRepository::new(self.db).find_by_id(booking.trip_id).await?;
        match trip {
            Some(trip) if trip.organizer_id == user_id => Ok(booking),
            _ => Err(not_found()),
        }
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Booking>, AppError> {
        let (bookings, total) = BookingRepository::new(self.db)
            .list_for_user(user_id, page, per_page)
            .await?;

        Ok(Page::new(bookings, total, page, per_page))
    }

    /// Bookings on a trip, for its organizer only.
    pub async fn list_for_trip(
        &self,
        trip_id: i32,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Booking>, AppError> {
        let Some(trip) = TripRepository::new(self.db).find_by_id(trip_id).await? else {
            return Err(AppError::NotFound("Trip not found".to_string()));
        };
        if trip.organizer_id != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("User is not the organizer of trip {}", trip_id),
            )
            .into());
        }

        let (bookings, total) = BookingRepository::new(self.db)
            .list_for_trip(trip_id, page, per_page)
            .await?;

        Ok(Page::new(bookings, total, page, per_page))
    }

    async fn expire_one(&self, booking_id: i32, now: DateTime<Utc>) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        let Some(booking) = BookingRepository::new(&txn).find_by_id(booking_id).await? else {
            return Ok(false);
        };
        if booking.status != BookingStatus::PendingPayment || !booking.is_expired_at(now) {
            return Ok(false);
        }

        let expired = release(&txn, &booking, BookingStatus::Expired).await?;

        txn.commit().await?;

        tracing::info!(
            "Booking {} expired, refunded {} to user {}",
            expired.id,
            expired.wallet_amount,
            expired.user_id
        );

        NotificationService::new(self.db)
            .notify(SendNotificationParams {
                user_id: expired.user_id,
                kind: NotificationKind::BookingCancelled,
                title: "Booking expired".to_string(),
                message: refund_message(&expired),
                data: serde_json::json!({
                    "booking_id": expired.id,
                    "trip_id": expired.trip_id,
                    "refunded": expired.wallet_amount,
                }),
            })
            .await;

        Ok(true)
    }

    async fn notify_confirmed(&self, booking: &Booking, trip: &Trip) {
        NotificationService::new(self.db)
            .notify(SendNotificationParams {
                user_id: booking.user_id,
                kind: NotificationKind::BookingConfirmed,
                title: "Booking confirmed".to_string(),
                message: format!(
                    "Your booking {} for {} is confirmed",
                    booking.confirmation_code, trip.title
                ),
                data: serde_json::json!({
                    "booking_id": booking.id,
                    "trip_id": trip.id,
                    "confirmation_code": booking.confirmation_code,
                }),
            })
            .await;
    }
}

/// Seats taken on a trip.
///
/// Counts the seats of pending and confirmed bookings plus one seat for every member
/// who has no confirmed booking (the organizer and participants of free trips).
pub(crate) async fn occupied_seats<C: ConnectionTrait>(
    db: &C,
    trip_id: i32,
) -> Result<i64, AppError> {
    let holding = BookingRepository::new(db)
        .seat_holding_for_trip(trip_id)
        .await?;
    let reserved: i64 = holding.iter().map(|b| i64::from(b.seats)).sum();
    let booked_members: HashSet<i32> = holding
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .map(|b| b.user_id)
        .collect();

    let unbooked_members = TripRepository::new(db)
        .member_ids(trip_id)
        .await?
        .into_iter()
        .filter(|id| !booked_members.contains(id))
        .count();

    Ok(reserved + unbooked_members as i64)
}

/// Cancels every seat-holding booking of a trip and refunds their wallet portions.
///
/// Used when the trip itself goes away or is cancelled; memberships are left to the caller.
pub(crate) async fn release_trip_bookings(
    txn: &DatabaseTransaction,
    trip_id: i32,
) -> Result<Vec<Booking>, AppError> {
    let holding = BookingRepository::new(txn)
        .seat_holding_for_trip(trip_id)
        .await?;

    let mut released = Vec::with_capacity(holding.len());
    for booking in holding {
        released.push(release(txn, &booking, BookingStatus::Cancelled).await?);
    }

    Ok(released)
}

/// Tells each traveller that their booking ended with the trip.
pub(crate) async fn notify_trip_bookings_cancelled(
    db: &DatabaseConnection,
    trip: &Trip,
    bookings: &[Booking],
) {
    let notifications = NotificationService::new(db);
    for booking in bookings {
        notifications
            .notify(SendNotificationParams {
                user_id: booking.user_id,
                kind: NotificationKind::BookingCancelled,
                title: "Trip cancelled".to_string(),
                message: format!("{} was cancelled. {}", trip.title, refund_message(booking)),
                data: serde_json::json!({
                    "booking_id": booking.id,
                    "trip_id": trip.id,
                    "refunded": booking.wallet_amount,
                }),
            })
            .await;
    }
}

async fn find_owned(
    txn: &DatabaseTransaction,
    booking_id: i32,
    user_id: i32,
) -> Result<Booking, AppError> {
    match BookingRepository::new(txn).find_by_id(booking_id).await? {
        Some(booking) if booking.user_id == user_id => Ok(booking),
        _ => Err(AppError::NotFound("Booking not found".to_string())),
    }
}

async fn update_status(
    txn: &DatabaseTransaction,
    booking_id: i32,
    status: BookingStatus,
    payment_reference: Option<String>,
) -> Result<Booking, AppError> {
    BookingRepository::new(txn)
        .update_status(booking_id, status, payment_reference)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
}

/// Moves a seat-holding booking to `status` and refunds its wallet portion.
async fn release(
    txn: &DatabaseTransaction,
    booking: &Booking,
    status: BookingStatus,
) -> Result<Booking, AppError> {
    let updated = update_status(txn, booking.id, status, None).await?;

    if booking.wallet_amount > 0 {
        apply_entry(
            txn,
            TransactionKind::Credit,
            LedgerEntryParams {
                user_id: booking.user_id,
                amount: booking.wallet_amount,
                reference: booking_refund_reference(booking.id),
                description: format!("Refund for booking {}", booking.confirmation_code),
                booking_id: Some(booking.id),
            },
        )
        .await?;
    }

    Ok(updated)
}

fn refund_message(booking: &Booking) -> String {
    if booking.wallet_amount > 0 {
        format!(
            "Booking {} was {}; {} was refunded to your wallet",
            booking.confirmation_code,
            booking.status.as_str(),
            booking.wallet_amount
        )
    } else {
        format!(
            "Booking {} was {}",
            booking.confirmation_code,
            booking.status.as_str()
        )
    }
}

/// Draws `WS-` followed by eight uppercase alphanumerics until an unused code is found.
async fn unused_confirmation_code<C: ConnectionTrait>(db: &C) -> Result<String, AppError> {
    let repo = BookingRepository::new(db);
    for _ in 0..CONFIRMATION_CODE_ATTEMPTS {
        let code = generate_confirmation_code();
        if !repo.confirmation_code_exists(&code).await? {
            return Ok(code);
        }
    }

    Err(AppError::InternalError(
        "Could not generate a unique confirmation code".to_string(),
    ))
}

fn generate_confirmation_code() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    const CODE_LENGTH: usize = 8;

    let mut rng = rand::rng();

    let suffix: String = (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    format!("WS-{}", suffix)
}
