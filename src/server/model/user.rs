//! User domain models and parameters.
//!
//! Provides the full user model (including private account fields), the public summary
//! embedded in lists, and the profile with social counters that is served from the
//! profile cache.

use chrono::{DateTime, Utc};

use crate::{
    model::user::{
        FollowEntryDto, PaginatedFollowsDto, PaginatedUsersDto, RegisterDto, UpdateProfileDto,
        UserDto, UserProfileDto, UserSummaryDto,
    },
    server::model::pagination::Page,
};

/// Registered user account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    /// Whether the user has admin privileges.
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// The password hash stays in the data layer.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            username: entity.username,
            display_name: entity.display_name,
            bio: entity.bio,
            avatar_url: entity.avatar_url,
            location: entity.location,
            admin: entity.admin,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            username: self.username,
            display_name: self.display_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
            location: self.location,
            admin: self.admin,
            created_at: self.created_at,
        }
    }
}

/// Public identity of a user shown in member, follower and search lists.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl UserSummary {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            display_name: entity.display_name,
            avatar_url: entity.avatar_url,
        }
    }

    pub fn into_dto(self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            username: self.username,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
        }
    }
}

/// Public profile with follower, following, trip and story counts.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user: User,
    pub followers_count: u64,
    pub following_count: u64,
    /// Trips the user is a member of, organizer included.
    pub trips_count: u64,
    /// Public stories written by the user.
    pub stories_count: u64,
}

impl UserProfile {
    pub fn into_dto(self) -> UserProfileDto {
        UserProfileDto {
            id: self.user.id,
            username: self.user.username,
            display_name: self.user.display_name,
            bio: self.user.bio,
            avatar_url: self.user.avatar_url,
            location: self.user.location,
            created_at: self.user.created_at,
            followers_count: self.followers_count,
            following_count: self.following_count,
            trips_count: self.trips_count,
            stories_count: self.stories_count,
        }
    }
}

/// A user in a follower/following list with the time the follow was created.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowEntry {
    pub user: UserSummary,
    pub since: DateTime<Utc>,
}

impl FollowEntry {
    pub fn into_dto(self) -> FollowEntryDto {
        FollowEntryDto {
            user: self.user.into_dto(),
            since: self.since,
        }
    }
}

impl Page<UserSummary> {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.items.into_iter().map(UserSummary::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

impl Page<FollowEntry> {
    pub fn into_dto(self) -> PaginatedFollowsDto {
        PaginatedFollowsDto {
            users: self.items.into_iter().map(FollowEntry::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for inserting a user row. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub admin: bool,
}

/// Registration input as submitted by the client.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub email: String,
    pub username: String,
    pub password: String,
    pub display_name: String,
}

impl RegisterParams {
    /// Normalizes the email to lowercase and trims the identifying fields.
    pub fn from_dto(dto: RegisterDto) -> Self {
        Self {
            email: dto.email.trim().to_lowercase(),
            username: dto.username.trim().to_string(),
            password: dto.password,
            display_name: dto.display_name.trim().to_string(),
        }
    }
}

/// Partial profile update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            display_name: dto.display_name.map(|n| n.trim().to_string()),
            bio: dto.bio,
            avatar_url: dto.avatar_url,
            location: dto.location,
        }
    }
}
