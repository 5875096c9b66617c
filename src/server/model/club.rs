//! Club domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::club::{ClubDto, ClubMemberDto, CreateClubDto, PaginatedClubsDto},
    server::{
        error::internal::InternalError,
        model::{pagination::Page, user::UserSummary},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubRole {
    Owner,
    Admin,
    Member,
}

impl ClubRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        match value {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(InternalError::UnknownEnumValue {
                kind: "club member role",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Club {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i32,
    pub is_private: bool,
    pub member_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Club {
    pub fn from_entity(entity: entity::club::Model, member_count: u64) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            owner_id: entity.owner_id,
            is_private: entity.is_private,
            member_count,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ClubDto {
        ClubDto {
            id: self.id,
            name: self.name,
            description: self.description,
            owner_id: self.owner_id,
            is_private: self.is_private,
            member_count: self.member_count,
            created_at: self.created_at,
        }
    }
}

impl Page<Club> {
    pub fn into_dto(self) -> PaginatedClubsDto {
        PaginatedClubsDto {
            clubs: self.items.into_iter().map(Club::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClubMember {
    pub user: UserSummary,
    pub role: ClubRole,
    pub joined_at: DateTime<Utc>,
}

impl ClubMember {
    pub fn into_dto(self) -> ClubMemberDto {
        ClubMemberDto {
            user: self.user.into_dto(),
            role: self.role.as_str().to_string(),
            joined_at: self.joined_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateClubParams {
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_private: bool,
}

impl CreateClubParams {
    pub fn from_dto(owner_id: i32, dto: CreateClubDto) -> Self {
        Self {
            owner_id,
            name: dto.name.trim().to_string(),
            description: dto.description,
            is_private: dto.is_private,
        }
    }
}
