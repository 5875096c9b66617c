//! Booking repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::booking::{Booking, BookingStatus, NewBooking},
};

pub struct BookingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, booking: NewBooking) -> Result<Booking, AppError> {
        let now = Utc::now();
        let entity = entity::booking::ActiveModel {
            user_id: ActiveValue::Set(booking.user_id),
            trip_id: ActiveValue::Set(booking.trip_id),
            seats: ActiveValue::Set(booking.seats),
            total_amount: ActiveValue::Set(booking.total_amount),
            wallet_amount: ActiveValue::Set(booking.wallet_amount),
            gateway_amount: ActiveValue::Set(booking.total_amount - booking.wallet_amount),
            status: ActiveValue::Set(booking.status.as_str().to_string()),
            confirmation_code: ActiveValue::Set(booking.confirmation_code),
            payment_reference: ActiveValue::Set(None),
            expires_at: ActiveValue::Set(booking.expires_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Booking::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, AppError> {
        entity::prelude::Booking::find_by_id(id)
            .one(self.db)
            .await?
            .map(Booking::from_entity)
            .transpose()
    }

    /// Sets a booking's status and, when given, its payment reference.
    ///
    /// Confirmed and terminal bookings no longer expire, so `expires_at` is cleared
    /// for every status other than pending payment.
    pub async fn update_status(
        &self,
        id: i32,
        status: BookingStatus,
        payment_reference: Option<String>,
    ) -> Result<Option<Booking>, AppError> {
        let Some(entity) = entity::prelude::Booking::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::booking::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        if payment_reference.is_some() {
            active.payment_reference = ActiveValue::Set(payment_reference);
        }
        if status != BookingStatus::PendingPayment {
            active.expires_at = ActiveValue::Set(None);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;

        Ok(Some(Booking::from_entity(updated)?))
    }

    /// Bookings made by a user, newest first.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Booking>, u64), AppError> {
        let paginator = entity::prelude::Booking::find()
            .filter(entity::booking::Column::UserId.eq(user_id))
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let bookings = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Booking::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((bookings, total))
    }

    /// Bookings for a trip, newest first.
    pub async fn list_for_trip(
        &self,
        trip_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Booking>, u64), AppError> {
        let paginator = entity::prelude::Booking::find()
            .filter(entity::booking::Column::TripId.eq(trip_id))
            .order_by_desc(entity::booking::Column::CreatedAt)
            .order_by_desc(entity::booking::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let bookings = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Booking::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((bookings, total))
    }

    /// Bookings that currently hold seats on a trip (pending payment or confirmed).
    pub async fn seat_holding_for_trip(&self, trip_id: i32) -> Result<Vec<Booking>, AppError> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::TripId.eq(trip_id))
            .filter(entity::booking::Column::Status.is_in([
                BookingStatus::PendingPayment.as_str(),
                BookingStatus::Confirmed.as_str(),
            ]))
            .all(self.db)
            .await?
            .into_iter()
            .map(Booking::from_entity)
            .collect()
    }

    /// Ids of pending bookings whose payment window closed at or before `now`.
    pub async fn overdue_ids(&self, now: DateTime<Utc>) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Booking::find()
            .select_only()
            .column(entity::booking::Column::Id)
            .filter(entity::booking::Column::Status.eq(BookingStatus::PendingPayment.as_str()))
            .filter(entity::booking::Column::ExpiresAt.lte(now))
            .order_by_asc(entity::booking::Column::Id)
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn confirmation_code_exists(&self, code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Booking::find()
            .filter(entity::booking::Column::ConfirmationCode.eq(code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
