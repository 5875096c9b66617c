//! Follow graph service.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{follow::FollowRepository, user::UserRepository},
    error::AppError,
    model::{
        notification::{NotificationKind, SendNotificationParams},
        pagination::Page,
        user::{FollowEntry, UserProfile},
    },
    service::{cache::TtlCache, notification::NotificationService},
};

pub struct FollowService<'a> {
    db: &'a DatabaseConnection,
    profile_cache: &'a TtlCache<i32, UserProfile>,
}

impl<'a> FollowService<'a> {
    pub fn new(db: &'a DatabaseConnection, profile_cache: &'a TtlCache<i32, UserProfile>) -> Self {
        Self { db, profile_cache }
    }

    /// Makes `follower_id` follow `target_id` and notifies the target.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Attempt to follow oneself
    /// - `Err(AppError::NotFound)` - Target user does not exist
    /// - `Err(AppError::Conflict)` - Already following
    pub async fn follow(&self, follower_id: i32, target_id: i32) -> Result<(), AppError> {
        if follower_id == target_id {
            return Err(AppError::BadRequest("You cannot follow yourself".to_string()));
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_id(target_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let follow_repo = FollowRepository::new(self.db);
        if follow_repo.exists(follower_id, target_id).await? {
            return Err(AppError::Conflict("Already following this user".to_string()));
        }

        follow_repo.create(follower_id, target_id).await?;
        self.invalidate_profiles(follower_id, target_id).await;

        let follower_name = user_repo
            .find_by_id(follower_id)
            .await?
            .map(|u| u.display_name)
            .unwrap_or_else(|| "Someone".to_string());

        NotificationService::new(self.db)
            .notify(SendNotificationParams {
                user_id: target_id,
                kind: NotificationKind::Follow,
                title: "New follower".to_string(),
                message: format!("{} started following you", follower_name),
                data: serde_json::json!({ "follower_id": follower_id }),
            })
            .await;

        Ok(())
    }

    /// # Returns
    /// - `Err(AppError::NotFound)` - Not following the target
    pub async fn unfollow(&self, follower_id: i32, target_id: i32) -> Result<(), AppError> {
        if !FollowRepository::new(self.db)
            .delete(follower_id, target_id)
            .await?
        {
            return Err(AppError::NotFound("Not following this user".to_string()));
        }

        self.invalidate_profiles(follower_id, target_id).await;

        Ok(())
    }

    /// Users following `user_id`, newest first.
    pub async fn followers(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<FollowEntry>, AppError> {
        self.ensure_user_exists(user_id).await?;

        let (entries, total) = FollowRepository::new(self.db)
            .followers_paginated(user_id, page, per_page)
            .await?;

        self.build_page(entries, total, page, per_page).await
    }

    /// Users that `user_id` follows, newest first.
    pub async fn following(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<FollowEntry>, AppError> {
        self.ensure_user_exists(user_id).await?;

        let (entries, total) = FollowRepository::new(self.db)
            .following_paginated(user_id, page, per_page)
            .await?;

        self.build_page(entries, total, page, per_page).await
    }

    async fn ensure_user_exists(&self, user_id: i32) -> Result<(), AppError> {
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    async fn build_page(
        &self,
        entries: Vec<(i32, chrono::DateTime<chrono::Utc>)>,
        total: u64,
        page: u64,
        per_page: u64,
    ) -> Result<Page<FollowEntry>, AppError> {
        let ids: Vec<i32> = entries.iter().map(|(id, _)| *id).collect();
        let mut summaries = UserRepository::new(self.db).find_summaries(&ids).await?;

        let items = entries
            .into_iter()
            .filter_map(|(id, since)| {
                summaries
                    .remove(&id)
                    .map(|user| FollowEntry { user, since })
            })
            .collect();

        Ok(Page::new(items, total, page, per_page))
    }

    async fn invalidate_profiles(&self, follower_id: i32, target_id: i32) {
        self.profile_cache.invalidate(&follower_id).await;
        self.profile_cache.invalidate(&target_id).await;
    }
}
