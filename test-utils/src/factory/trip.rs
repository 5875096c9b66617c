//! Trip factory for creating test trips and memberships.

use crate::factory::helpers::next_id;
use chrono::{Days, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test trips with customizable fields.
///
/// Defaults to a free, public trip in the `upcoming` state starting thirty
/// days from today.
pub struct TripFactory<'a> {
    db: &'a DatabaseConnection,
    organizer_id: i32,
    title: String,
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
    is_public: bool,
    max_participants: i32,
    price_per_person: i64,
    tags: Vec<String>,
}

impl<'a> TripFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, organizer_id: i32) -> Self {
        let id = next_id();
        let today = Utc::now().date_naive();
        let start_date = today.checked_add_days(Days::new(30)).unwrap_or(today);
        let end_date = start_date.checked_add_days(Days::new(5)).unwrap_or(start_date);

        Self {
            db,
            organizer_id,
            title: format!("Trip {}", id),
            destination: format!("Destination {}", id),
            start_date,
            end_date,
            status: "upcoming".to_string(),
            is_public: true,
            max_participants: 10,
            price_per_person: 0,
            tags: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn max_participants(mut self, max_participants: i32) -> Self {
        self.max_participants = max_participants;
        self
    }

    pub fn price_per_person(mut self, price_per_person: i64) -> Self {
        self.price_per_person = price_per_person;
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builds and inserts the trip. No membership row is created.
    pub async fn build(self) -> Result<entity::trip::Model, DbErr> {
        let now = Utc::now();
        entity::trip::ActiveModel {
            organizer_id: ActiveValue::Set(self.organizer_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            destination: ActiveValue::Set(self.destination),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            status: ActiveValue::Set(self.status),
            is_public: ActiveValue::Set(self.is_public),
            max_participants: ActiveValue::Set(self.max_participants),
            price_per_person: ActiveValue::Set(self.price_per_person),
            currency: ActiveValue::Set("INR".to_string()),
            tags: ActiveValue::Set(serde_json::json!(self.tags)),
            cover_image_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Factory for trip membership rows.
pub struct TripMemberFactory<'a> {
    db: &'a DatabaseConnection,
    trip_id: i32,
    user_id: i32,
    role: String,
}

impl<'a> TripMemberFactory<'a> {
    /// Defaults to the `participant` role.
    pub fn new(db: &'a DatabaseConnection, trip_id: i32, user_id: i32) -> Self {
        Self {
            db,
            trip_id,
            user_id,
            role: "participant".to_string(),
        }
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub async fn build(self) -> Result<entity::trip_member::Model, DbErr> {
        entity::trip_member::ActiveModel {
            trip_id: ActiveValue::Set(self.trip_id),
            user_id: ActiveValue::Set(self.user_id),
            role: ActiveValue::Set(self.role),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a trip with default values for the given organizer.
pub async fn create_trip(
    db: &DatabaseConnection,
    organizer_id: i32,
) -> Result<entity::trip::Model, DbErr> {
    TripFactory::new(db, organizer_id).build().await
}

/// Adds a participant membership.
pub async fn create_trip_member(
    db: &DatabaseConnection,
    trip_id: i32,
    user_id: i32,
) -> Result<entity::trip_member::Model, DbErr> {
    TripMemberFactory::new(db, trip_id, user_id).build().await
}
