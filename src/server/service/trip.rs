//! Trip service: creation, visibility, membership and date-driven status changes.

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{trip::TripRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        notification::{NotificationKind, SendNotificationParams},
        pagination::Page,
        trip::{
            validate_trip_fields, CreateTripParams, Trip, TripFilter, TripMember, TripRole,
            TripStatus, UpdateTripParams,
        },
        user::User,
    },
    service::{
        booking::{notify_trip_bookings_cancelled, occupied_seats, release_trip_bookings},
        cache::TtlCache,
        notification::NotificationService,
    },
};

/// Trips moved by one run of the status scheduler.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransitions {
    pub started: u64,
    pub completed: u64,
}

pub struct TripService<'a> {
    db: &'a DatabaseConnection,
    trip_cache: &'a TtlCache<i32, Trip>,
}

impl<'a> TripService<'a> {
    pub fn new(db: &'a DatabaseConnection, trip_cache: &'a TtlCache<i32, Trip>) -> Self {
        Self { db, trip_cache }
    }

    /// Validates and inserts a trip along with the organizer's membership.
    pub async fn create(&self, params: CreateTripParams) -> Result<Trip, AppError> {
        params.validate()?;

        let organizer_id = params.organizer_id;
        let txn = self.db.begin().await?;

        let trip_repo = TripRepository::new(&txn);
        let trip = trip_repo.create(params).await?;
        trip_repo
            .add_member(trip.id, organizer_id, TripRole::Organizer)
            .await?;

        txn.commit().await?;

        tracing::info!("Trip {} created by user {}", trip.id, organizer_id);

        Ok(trip)
    }

    /// Returns a trip if `viewer_id` may see it.
    ///
    /// Private trips are reported as missing to anyone who is not a member.
    pub async fn get(&self, trip_id: i32, viewer_id: i32) -> Result<Trip, AppError> {
        let trip = self.load(trip_id).await?;
        self.ensure_visible(&trip, viewer_id).await?;

        Ok(trip)
    }

    pub async fn list_public(
        &self,
        filter: TripFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Trip>, AppError> {
        let (trips, total) = TripRepository::new(self.db)
            .list_public(filter, page, per_page)
            .await?;

        Ok(Page::new(trips, total, page, per_page))
    }

    /// Trips the user organizes or participates in.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Trip>, AppError> {
        let (trips, total) = TripRepository::new(self.db)
            .list_for_member(user_id, page, per_page)
            .await?;

        Ok(Page::new(trips, total, page, per_page))
    }

    /// Applies a partial update; organizer only.
    ///
    /// The merged trip is validated as a whole, so moving only the end date before the
    /// stored start date is rejected. Status moves with the dates through the scheduler;
    /// the only status an organizer may set is `cancelled`, which cancels every
    /// seat-holding booking and refunds its wallet portion in the same transaction.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Invalid merged trip, a status other than
    ///   `cancelled`, or cancelling a completed trip
    /// - `Err(AuthErr(AccessDenied))` - Caller is not the organizer
    pub async fn update(
        &self,
        trip_id: i32,
        user_id: i32,
        params: UpdateTripParams,
    ) -> Result<Trip, AppError> {
        let trip = self.load(trip_id).await?;
        if trip.organizer_id != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("User is not the organizer of trip {}", trip_id),
            )
            .into());
        }

        let cancelling = match params.status {
            None => false,
            Some(status) if status == trip.status => false,
            Some(TripStatus::Cancelled) if trip.status == TripStatus::Completed => {
                return Err(AppError::BadRequest(
                    "A completed trip cannot be cancelled".to_string(),
                ));
            }
            Some(TripStatus::Cancelled) => true,
            Some(status) => {
                return Err(AppError::BadRequest(format!(
                    "Trip status cannot be set to {}; only cancelled is allowed",
                    status.as_str()
                )));
            }
        };

        let merged = params.apply_to(&trip);
        validate_trip_fields(
            &merged.title,
            &merged.destination,
            merged.start_date,
            merged.end_date,
            merged.max_participants,
            merged.price_per_person,
        )?;

        let txn = self.db.begin().await?;

        let updated = TripRepository::new(&txn)
            .update(trip_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        let released = if cancelling {
            release_trip_bookings(&txn, trip_id).await?
        } else {
            Vec::new()
        };

        txn.commit().await?;

        self.trip_cache.invalidate(&trip_id).await;

        if cancelling {
            tracing::info!(
                "Trip {} cancelled by organizer {}; {} bookings released",
                trip_id,
                user_id,
                released.len()
            );
            notify_trip_bookings_cancelled(self.db, &updated, &released).await;
        }

        Ok(updated)
    }

    /// Deletes a trip; allowed for its organizer and for admins.
    ///
    /// Seat-holding bookings are cancelled and refunded before the trip row goes, and
    /// their travellers are notified once the deletion is committed.
    pub async fn delete(&self, trip_id: i32, user: &User) -> Result<(), AppError> {
        let trip = self.load(trip_id).await?;
        if trip.organizer_id != user.id && !user.admin {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User may not delete trip {}", trip_id),
            )
            .into());
        }

        let txn = self.db.begin().await?;
        let released = release_trip_bookings(&txn, trip_id).await?;
        TripRepository::new(&txn).delete(trip_id).await?;
        txn.commit().await?;

        self.trip_cache.invalidate(&trip_id).await;

        tracing::info!(
            "Trip {} deleted by user {}; {} bookings released",
            trip_id,
            user.id,
            released.len()
        );

        notify_trip_bookings_cancelled(self.db, &trip, &released).await;

        Ok(())
    }

    /// Joins a free trip as a participant and notifies the organizer.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Paid trip, closed trip or no seats left
    /// - `Err(AppError::Conflict)` - Already a member
    pub async fn join(&self, trip_id: i32, user_id: i32) -> Result<(), AppError> {
        let trip = self.load(trip_id).await?;
        let trip_repo = TripRepository::new(self.db);

        if trip_repo.find_member_role(trip_id, user_id).await?.is_some() {
            return Err(AppError::Conflict("Already a member of this trip".to_string()));
        }
        if !trip.is_public {
            return Err(AppError::NotFound("Trip not found".to_string()));
        }
        if !trip.is_free() {
            return Err(AppError::BadRequest(
                "Paid trips must be joined through a booking".to_string(),
            ));
        }
        if !trip.status.is_open() {
            return Err(AppError::BadRequest(format!(
                "Trip is {} and no longer accepts participants",
                trip.status.as_str()
            )));
        }
        if occupied_seats(self.db, trip_id).await? >= i64::from(trip.max_participants) {
            return Err(AppError::BadRequest("Trip is full".to_string()));
        }

        trip_repo
            .add_member(trip_id, user_id, TripRole::Participant)
            .await?;

        let name = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(|u| u.display_name)
            .unwrap_or_else(|| "Someone".to_string());

        NotificationService::new(self.db)
            .notify(SendNotificationParams {
                user_id: trip.organizer_id,
                kind: NotificationKind::TripJoin,
                title: "New trip member".to_string(),
                message: format!("{} joined {}", name, trip.title),
                data: serde_json::json!({ "trip_id": trip_id, "user_id": user_id }),
            })
            .await;

        Ok(())
    }

    /// Leaves a trip. The organizer cannot leave their own trip.
    pub async fn leave(&self, trip_id: i32, user_id: i32) -> Result<(), AppError> {
        let trip_repo = TripRepository::new(self.db);

        match trip_repo.find_member_role(trip_id, user_id).await? {
            None => Err(AppError::NotFound("Not a member of this trip".to_string())),
            Some(TripRole::Organizer) => Err(AppError::BadRequest(
                "The organizer cannot leave the trip".to_string(),
            )),
            Some(TripRole::Participant) => {
                trip_repo.remove_member(trip_id, user_id).await?;
                Ok(())
            }
        }
    }

    /// Members of a visible trip with their user summaries, in join order.
    pub async fn members(&self, trip_id: i32, viewer_id: i32) -> Result<Vec<TripMember>, AppError> {
        let trip = self.load(trip_id).await?;
        self.ensure_visible(&trip, viewer_id).await?;

        let members = TripRepository::new(self.db).members(trip_id).await?;
        let ids: Vec<i32> = members.iter().map(|(id, _, _)| *id).collect();
        let mut summaries = UserRepository::new(self.db).find_summaries(&ids).await?;

        Ok(members
            .into_iter()
            .filter_map(|(id, role, joined_at)| {
                summaries.remove(&id).map(|user| TripMember {
                    user,
                    role,
                    joined_at,
                })
            })
            .collect())
    }

    /// Starts trips whose start date has arrived and completes trips that have ended.
    pub async fn apply_status_transitions(
        &self,
        today: NaiveDate,
    ) -> Result<StatusTransitions, AppError> {
        let trip_repo = TripRepository::new(self.db);

        let starting = trip_repo.ids_due_to_start(today).await?;
        let started = trip_repo.set_status(&starting, TripStatus::Ongoing).await?;

        let ending = trip_repo.ids_due_to_complete(today).await?;
        let completed = trip_repo
            .set_status(&ending, TripStatus::Completed)
            .await?;

        for id in starting.iter().chain(ending.iter()) {
            self.trip_cache.invalidate(id).await;
        }

        Ok(StatusTransitions { started, completed })
    }

    async fn load(&self, trip_id: i32) -> Result<Trip, AppError> {
        if let Some(trip) = self.trip_cache.get(&trip_id).await {
            return Ok(trip);
        }

        let trip = TripRepository::new(self.db)
            .find_by_id(trip_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        self.trip_cache.insert(trip_id, trip.clone()).await;

        Ok(trip)
    }

    async fn ensure_visible(&self, trip: &Trip, viewer_id: i32) -> Result<(), AppError> {
        if trip.is_public || trip.organizer_id == viewer_id {
            return Ok(());
        }

        let role = TripRepository::new(self.db)
            .find_member_role(trip.id, viewer_id)
            .await?;
        if role.is_none() {
            return Err(AppError::NotFound("Trip not found".to_string()));
        }

        Ok(())
    }
}
