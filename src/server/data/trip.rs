//! Trip and trip membership repository.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    data::contains_pattern,
    error::AppError,
    model::trip::{
        CreateTripParams, Trip, TripFilter, TripRole, TripStatus, UpdateTripParams,
    },
};

pub struct TripRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TripRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a trip in the `planning` state. The organizer membership is added separately.
    pub async fn create(&self, params: CreateTripParams) -> Result<Trip, AppError> {
        let now = Utc::now();
        let entity = entity::trip::ActiveModel {
            organizer_id: ActiveValue::Set(params.organizer_id),
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            destination: ActiveValue::Set(params.destination),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            status: ActiveValue::Set(TripStatus::Planning.as_str().to_string()),
            is_public: ActiveValue::Set(params.is_public),
            max_participants: ActiveValue::Set(params.max_participants),
            price_per_person: ActiveValue::Set(params.price_per_person),
            currency: ActiveValue::Set(params.currency),
            tags: ActiveValue::Set(serde_json::json!(params.tags)),
            cover_image_url: ActiveValue::Set(params.cover_image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Trip::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Trip>, AppError> {
        entity::prelude::Trip::find_by_id(id)
            .one(self.db)
            .await?
            .map(Trip::from_entity)
            .transpose()
    }

    /// Public trips matching the filter, soonest start date first.
    pub async fn list_public(
        &self,
        filter: TripFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Trip>, u64), AppError> {
        let mut query =
            entity::prelude::Trip::find().filter(entity::trip::Column::IsPublic.eq(true));

        if let Some(destination) = filter.destination.as_deref() {
            query = query
                .filter(entity::trip::Column::Destination.like(contains_pattern(destination)));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::trip::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_asc(entity::trip::Column::StartDate)
            .order_by_asc(entity::trip::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let trips = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Trip::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((trips, total))
    }

    /// Trips the user is a member of, soonest start date first.
    pub async fn list_for_member(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Trip>, u64), AppError> {
        let trip_ids: Vec<i32> = entity::prelude::TripMember::find()
            .select_only()
            .column(entity::trip_member::Column::TripId)
            .filter(entity::trip_member::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await?;

        let paginator = entity::prelude::Trip::find()
            .filter(entity::trip::Column::Id.is_in(trip_ids))
            .order_by_asc(entity::trip::Column::StartDate)
            .order_by_asc(entity::trip::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let trips = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Trip::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((trips, total))
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Trip))` - Updated trip
    /// - `Ok(None)` - No trip with that id
    pub async fn update(&self, id: i32, params: UpdateTripParams) -> Result<Option<Trip>, AppError> {
        let Some(entity) = entity::prelude::Trip::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::trip::ActiveModel = entity.into();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(destination) = params.destination {
            active.destination = ActiveValue::Set(destination);
        }
        if let Some(start_date) = params.start_date {
            active.start_date = ActiveValue::Set(start_date);
        }
        if let Some(end_date) = params.end_date {
            active.end_date = ActiveValue::Set(end_date);
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(is_public) = params.is_public {
            active.is_public = ActiveValue::Set(is_public);
        }
        if let Some(max_participants) = params.max_participants {
            active.max_participants = ActiveValue::Set(max_participants);
        }
        if let Some(price) = params.price_per_person {
            active.price_per_person = ActiveValue::Set(price);
        }
        if let Some(tags) = params.tags {
            active.tags = ActiveValue::Set(serde_json::json!(tags));
        }
        if let Some(cover_image_url) = params.cover_image_url {
            active.cover_image_url = ActiveValue::Set(Some(cover_image_url));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;

        Ok(Some(Trip::from_entity(updated)?))
    }

    /// Deletes a trip; memberships, bookings and budgets linked to it cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Trip::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn add_member(&self, trip_id: i32, user_id: i32, role: TripRole) -> Result<(), DbErr> {
        entity::trip_member::ActiveModel {
            trip_id: ActiveValue::Set(trip_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.as_str().to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Adds a participant unless the user is already a member.
    pub async fn ensure_participant(&self, trip_id: i32, user_id: i32) -> Result<(), AppError> {
        if self.find_member_role(trip_id, user_id).await?.is_none() {
            self.add_member(trip_id, user_id, TripRole::Participant)
                .await?;
        }
        Ok(())
    }

    pub async fn remove_member(&self, trip_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::TripMember::delete_by_id((trip_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_member_role(
        &self,
        trip_id: i32,
        user_id: i32,
    ) -> Result<Option<TripRole>, AppError> {
        let member = entity::prelude::TripMember::find_by_id((trip_id, user_id))
            .one(self.db)
            .await?;

        Ok(member
            .map(|m| TripRole::from_stored(&m.role))
            .transpose()?)
    }

    /// Members of a trip in join order as `(user_id, role, joined_at)`.
    pub async fn members(
        &self,
        trip_id: i32,
    ) -> Result<Vec<(i32, TripRole, DateTime<Utc>)>, AppError> {
        let members = entity::prelude::TripMember::find()
            .filter(entity::trip_member::Column::TripId.eq(trip_id))
            .order_by_asc(entity::trip_member::Column::JoinedAt)
            .all(self.db)
            .await?;

        members
            .into_iter()
            .map(|m| -> Result<_, AppError> {
                Ok((m.user_id, TripRole::from_stored(&m.role)?, m.joined_at))
            })
            .collect()
    }

    pub async fn member_ids(&self, trip_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::TripMember::find()
            .select_only()
            .column(entity::trip_member::Column::UserId)
            .filter(entity::trip_member::Column::TripId.eq(trip_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn count_members(&self, trip_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TripMember::find()
            .filter(entity::trip_member::Column::TripId.eq(trip_id))
            .count(self.db)
            .await
    }

    /// Number of trips the user belongs to, as organizer or participant.
    pub async fn count_for_member(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TripMember::find()
            .filter(entity::trip_member::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Ids of planning/upcoming trips whose start date has arrived.
    pub async fn ids_due_to_start(&self, today: NaiveDate) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Trip::find()
            .select_only()
            .column(entity::trip::Column::Id)
            .filter(entity::trip::Column::Status.is_in([
                TripStatus::Planning.as_str(),
                TripStatus::Upcoming.as_str(),
            ]))
            .filter(entity::trip::Column::StartDate.lte(today))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Ids of ongoing trips whose end date has passed.
    pub async fn ids_due_to_complete(&self, today: NaiveDate) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Trip::find()
            .select_only()
            .column(entity::trip::Column::Id)
            .filter(entity::trip::Column::Status.eq(TripStatus::Ongoing.as_str()))
            .filter(entity::trip::Column::EndDate.lt(today))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Sets the status of several trips at once.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of trips updated
    pub async fn set_status(&self, ids: &[i32], status: TripStatus) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Trip::update_many()
            .col_expr(entity::trip::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::trip::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::trip::Column::Id.is_in(ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
