//! Club and club membership repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::{
    error::AppError,
    model::club::{Club, ClubRole, CreateClubParams},
};

pub struct ClubRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ClubRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the club row only; the owner membership is added by the caller.
    pub async fn create(&self, params: CreateClubParams) -> Result<Club, DbErr> {
        let entity = entity::club::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            owner_id: ActiveValue::Set(params.owner_id),
            is_private: ActiveValue::Set(params.is_private),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Club::from_entity(entity, 0))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Club>, DbErr> {
        let Some(entity) = entity::prelude::Club::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let member_count = self.count_members(id).await?;

        Ok(Some(Club::from_entity(entity, member_count)))
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Club::find()
            .filter(entity::club::Column::Name.eq(name))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// All clubs ordered by name.
    pub async fn list(&self, page: u64, per_page: u64) -> Result<(Vec<Club>, u64), DbErr> {
        let paginator = entity::prelude::Club::find()
            .order_by_asc(entity::club::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        let ids: Vec<i32> = entities.iter().map(|c| c.id).collect();
        let mut counts: HashMap<i32, u64> = HashMap::new();
        if !ids.is_empty() {
            let member_club_ids: Vec<i32> = entity::prelude::ClubMember::find()
                .select_only()
                .column(entity::club_member::Column::ClubId)
                .filter(entity::club_member::Column::ClubId.is_in(ids))
                .into_tuple()
                .all(self.db)
                .await?;
            for club_id in member_club_ids {
                *counts.entry(club_id).or_default() += 1;
            }
        }

        let clubs = entities
            .into_iter()
            .map(|e| {
                let member_count = counts.get(&e.id).copied().unwrap_or(0);
                Club::from_entity(e, member_count)
            })
            .collect();

        Ok((clubs, total))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Club::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn add_member(&self, club_id: i32, user_id: i32, role: ClubRole) -> Result<(), DbErr> {
        entity::club_member::ActiveModel {
            club_id: ActiveValue::Set(club_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.as_str().to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn remove_member(&self, club_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ClubMember::delete_by_id((club_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_member_role(
        &self,
        club_id: i32,
        user_id: i32,
    ) -> Result<Option<ClubRole>, AppError> {
        let member = entity::prelude::ClubMember::find_by_id((club_id, user_id))
            .one(self.db)
            .await?;

        Ok(member.map(|m| ClubRole::from_stored(&m.role)).transpose()?)
    }

    /// Memberships of a club in join order.
    pub async fn members(
        &self,
        club_id: i32,
    ) -> Result<Vec<(i32, ClubRole, DateTime<Utc>)>, AppError> {
        entity::prelude::ClubMember::find()
            .filter(entity::club_member::Column::ClubId.eq(club_id))
            .order_by_asc(entity::club_member::Column::JoinedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(|m| -> Result<_, AppError> {
                Ok((m.user_id, ClubRole::from_stored(&m.role)?, m.joined_at))
            })
            .collect()
    }

    pub async fn count_members(&self, club_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ClubMember::find()
            .filter(entity::club_member::Column::ClubId.eq(club_id))
            .count(self.db)
            .await
    }
}
