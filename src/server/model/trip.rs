//! Trip domain models and parameters.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::trip::{CreateTripDto, PaginatedTripsDto, TripDto, TripMemberDto, UpdateTripDto},
    server::{
        error::{internal::InternalError, AppError},
        model::{pagination::Page, user::UserSummary},
        util::parse::parse_tags,
    },
};

pub const DEFAULT_CURRENCY: &str = "INR";

/// Lifecycle state of a trip.
///
/// `Planning` and `Upcoming` move to `Ongoing` on the start date, and `Ongoing` moves
/// to `Completed` after the end date. `Cancelled` is only set by the organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripStatus {
    Planning,
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "planning" => Some(Self::Planning),
            "upcoming" => Some(Self::Upcoming),
            "ongoing" => Some(Self::Ongoing),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Parses a status read from the database.
    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        Self::parse(value).ok_or_else(|| InternalError::UnknownEnumValue {
            kind: "trip status",
            value: value.to_string(),
        })
    }

    /// Parses a status supplied by a client.
    pub fn from_request(value: &str) -> Result<Self, AppError> {
        Self::parse(value).ok_or_else(|| AppError::BadRequest(format!("Unknown trip status '{}'", value)))
    }

    /// Whether new participants or bookings are accepted in this state.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripRole {
    Organizer,
    Participant,
}

impl TripRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organizer => "organizer",
            Self::Participant => "participant",
        }
    }

    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        match value {
            "organizer" => Ok(Self::Organizer),
            "participant" => Ok(Self::Participant),
            _ => Err(InternalError::UnknownEnumValue {
                kind: "trip member role",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: i32,
    pub organizer_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
    pub is_public: bool,
    pub max_participants: i32,
    /// Seat price in minor currency units.
    pub price_per_person: i64,
    pub currency: String,
    pub tags: Vec<String>,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Converts an entity model to a trip domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Trip)` - Converted trip
    /// - `Err(AppError::InternalErr(_))` - Unknown stored status or malformed tags
    pub fn from_entity(entity: entity::trip::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            organizer_id: entity.organizer_id,
            title: entity.title,
            description: entity.description,
            destination: entity.destination,
            start_date: entity.start_date,
            end_date: entity.end_date,
            status: TripStatus::from_stored(&entity.status)?,
            is_public: entity.is_public,
            max_participants: entity.max_participants,
            price_per_person: entity.price_per_person,
            currency: entity.currency,
            tags: parse_tags(entity.tags)?,
            cover_image_url: entity.cover_image_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Free trips can be joined directly; paid trips go through a booking.
    pub fn is_free(&self) -> bool {
        self.price_per_person == 0
    }

    pub fn into_dto(self) -> TripDto {
        TripDto {
            id: self.id,
            organizer_id: self.organizer_id,
            title: self.title,
            description: self.description,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status.as_str().to_string(),
            is_public: self.is_public,
            max_participants: self.max_participants,
            price_per_person: self.price_per_person,
            currency: self.currency,
            tags: self.tags,
            cover_image_url: self.cover_image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Page<Trip> {
    pub fn into_dto(self) -> PaginatedTripsDto {
        PaginatedTripsDto {
            trips: self.items.into_iter().map(Trip::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Trip member with display information.
#[derive(Debug, Clone, PartialEq)]
pub struct TripMember {
    pub user: UserSummary,
    pub role: TripRole,
    pub joined_at: DateTime<Utc>,
}

impl TripMember {
    pub fn into_dto(self) -> TripMemberDto {
        TripMemberDto {
            user: self.user.into_dto(),
            role: self.role.as_str().to_string(),
            joined_at: self.joined_at,
        }
    }
}

/// Parameters for creating a trip.
#[derive(Debug, Clone)]
pub struct CreateTripParams {
    pub organizer_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_public: bool,
    pub max_participants: i32,
    pub price_per_person: i64,
    pub currency: String,
    pub tags: Vec<String>,
    pub cover_image_url: Option<String>,
}

impl CreateTripParams {
    pub fn from_dto(organizer_id: i32, dto: CreateTripDto) -> Self {
        Self {
            organizer_id,
            title: dto.title.trim().to_string(),
            description: dto.description,
            destination: dto.destination.trim().to_string(),
            start_date: dto.start_date,
            end_date: dto.end_date,
            is_public: dto.is_public,
            max_participants: dto.max_participants,
            price_per_person: dto.price_per_person,
            currency: dto
                .currency
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            tags: dto.tags,
            cover_image_url: dto.cover_image_url,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_trip_fields(
            &self.title,
            &self.destination,
            self.start_date,
            self.end_date,
            self.max_participants,
            self.price_per_person,
        )
    }
}

/// Partial trip update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTripParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<TripStatus>,
    pub is_public: Option<bool>,
    pub max_participants: Option<i32>,
    pub price_per_person: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub cover_image_url: Option<String>,
}

impl UpdateTripParams {
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Unknown status value
    pub fn from_dto(dto: UpdateTripDto) -> Result<Self, AppError> {
        Ok(Self {
            title: dto.title.map(|t| t.trim().to_string()),
            description: dto.description,
            destination: dto.destination.map(|d| d.trim().to_string()),
            start_date: dto.start_date,
            end_date: dto.end_date,
            status: dto
                .status
                .as_deref()
                .map(TripStatus::from_request)
                .transpose()?,
            is_public: dto.is_public,
            max_participants: dto.max_participants,
            price_per_person: dto.price_per_person,
            tags: dto.tags,
            cover_image_url: dto.cover_image_url,
        })
    }

    /// Applies the update to a copy of `trip` so the merged result can be validated.
    pub fn apply_to(&self, trip: &Trip) -> Trip {
        let mut merged = trip.clone();
        if let Some(title) = &self.title {
            merged.title = title.clone();
        }
        if let Some(description) = &self.description {
            merged.description = Some(description.clone());
        }
        if let Some(destination) = &self.destination {
            merged.destination = destination.clone();
        }
        if let Some(start_date) = self.start_date {
            merged.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            merged.end_date = end_date;
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        if let Some(is_public) = self.is_public {
            merged.is_public = is_public;
        }
        if let Some(max_participants) = self.max_participants {
            merged.max_participants = max_participants;
        }
        if let Some(price) = self.price_per_person {
            merged.price_per_person = price;
        }
        if let Some(tags) = &self.tags {
            merged.tags = tags.clone();
        }
        if let Some(cover_image_url) = &self.cover_image_url {
            merged.cover_image_url = Some(cover_image_url.clone());
        }
        merged
    }
}

/// Optional filters for the public trip listing.
#[derive(Debug, Clone, Default)]
pub struct TripFilter {
    /// Case-insensitive substring match on the destination.
    pub destination: Option<String>,
    pub status: Option<TripStatus>,
}

/// Checks the invariants every stored trip must satisfy.
pub fn validate_trip_fields(
    title: &str,
    destination: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    max_participants: i32,
    price_per_person: i64,
) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Trip title is required".to_string()));
    }
    if destination.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Trip destination is required".to_string(),
        ));
    }
    if end_date < start_date {
        return Err(AppError::BadRequest(
            "Trip end date must not be before the start date".to_string(),
        ));
    }
    if max_participants < 1 {
        return Err(AppError::BadRequest(
            "A trip needs room for at least one participant".to_string(),
        ));
    }
    if price_per_person < 0 {
        return Err(AppError::BadRequest(
            "Price per person cannot be negative".to_string(),
        ));
    }
    Ok(())
}
