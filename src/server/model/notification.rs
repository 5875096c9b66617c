//! In-app notification domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::notification::{NotificationDto, PaginatedNotificationsDto},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::Page,
    },
};

/// What caused a notification to be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Follow,
    StoryLike,
    TripJoin,
    ClubJoin,
    BookingConfirmed,
    BookingCancelled,
    Wallet,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::StoryLike => "story_like",
            Self::TripJoin => "trip_join",
            Self::ClubJoin => "club_join",
            Self::BookingConfirmed => "booking_confirmed",
            Self::BookingCancelled => "booking_cancelled",
            Self::Wallet => "wallet",
        }
    }

    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        match value {
            "follow" => Ok(Self::Follow),
            "story_like" => Ok(Self::StoryLike),
            "trip_join" => Ok(Self::TripJoin),
            "club_join" => Ok(Self::ClubJoin),
            "booking_confirmed" => Ok(Self::BookingConfirmed),
            "booking_cancelled" => Ok(Self::BookingCancelled),
            "wallet" => Ok(Self::Wallet),
            _ => Err(InternalError::UnknownEnumValue {
                kind: "notification kind",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: NotificationKind::from_stored(&entity.kind)?,
            title: entity.title,
            message: entity.message,
            data: entity.data,
            read: entity.read,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind.as_str().to_string(),
            title: self.title,
            message: self.message,
            data: self.data,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

impl Page<Notification> {
    pub fn into_dto(self) -> PaginatedNotificationsDto {
        PaginatedNotificationsDto {
            notifications: self.items.into_iter().map(Notification::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// A notification to deliver to one user.
#[derive(Debug, Clone)]
pub struct SendNotificationParams {
    pub user_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
}
