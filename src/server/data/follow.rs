//! Follow relationship repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub struct FollowRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> FollowRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records that `follower_id` follows `following_id`.
    ///
    /// # Returns
    /// - `Ok(DateTime)` - When the follow was created
    /// - `Err(DbErr)` - Database error, including a primary key violation if it already exists
    pub async fn create(&self, follower_id: i32, following_id: i32) -> Result<DateTime<Utc>, DbErr> {
        let entity = entity::follow::ActiveModel {
            follower_id: ActiveValue::Set(follower_id),
            following_id: ActiveValue::Set(following_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(entity.created_at)
    }

    pub async fn exists(&self, follower_id: i32, following_id: i32) -> Result<bool, DbErr> {
        let entity = entity::prelude::Follow::find_by_id((follower_id, following_id))
            .one(self.db)
            .await?;

        Ok(entity.is_some())
    }

    /// Removes a follow.
    ///
    /// # Returns
    /// - `Ok(true)` - Follow existed and was removed
    /// - `Ok(false)` - No such follow
    pub async fn delete(&self, follower_id: i32, following_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Follow::delete_by_id((follower_id, following_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Users following `user_id`, newest follow first.
    ///
    /// # Returns
    /// - `Ok((entries, total))` - `(follower_id, followed_at)` pairs for the page and the total count
    pub async fn followers_paginated(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<(i32, DateTime<Utc>)>, u64), DbErr> {
        let paginator = entity::prelude::Follow::find()
            .filter(entity::follow::Column::FollowingId.eq(user_id))
            .order_by_desc(entity::follow::Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(|f| (f.follower_id, f.created_at))
            .collect();

        Ok((entries, total))
    }

    /// Users that `user_id` follows, newest follow first.
    pub async fn following_paginated(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<(i32, DateTime<Utc>)>, u64), DbErr> {
        let paginator = entity::prelude::Follow::find()
            .filter(entity::follow::Column::FollowerId.eq(user_id))
            .order_by_desc(entity::follow::Column::CreatedAt)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(|f| (f.following_id, f.created_at))
            .collect();

        Ok((entries, total))
    }

    /// Ids of every user `user_id` follows.
    pub async fn following_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Follow::find()
            .select_only()
            .column(entity::follow::Column::FollowingId)
            .filter(entity::follow::Column::FollowerId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    pub async fn count_followers(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Follow::find()
            .filter(entity::follow::Column::FollowingId.eq(user_id))
            .count(self.db)
            .await
    }

    pub async fn count_following(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Follow::find()
            .filter(entity::follow::Column::FollowerId.eq(user_id))
            .count(self.db)
            .await
    }
}
