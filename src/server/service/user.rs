//! User profile service.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        follow::FollowRepository, story::StoryRepository, trip::TripRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        pagination::Page,
        user::{UpdateProfileParams, User, UserProfile, UserSummary},
    },
    service::cache::TtlCache,
};

/// Service for reading and updating user profiles.
///
/// Profiles carry follower, following, trip and story counts, which take several
/// queries to assemble, so they are served from `profile_cache` while fresh.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    profile_cache: &'a TtlCache<i32, UserProfile>,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, profile_cache: &'a TtlCache<i32, UserProfile>) -> Self {
        Self { db, profile_cache }
    }

    /// # Returns
    /// - `Ok(UserProfile)` - Cached or freshly assembled profile
    /// - `Err(AppError::NotFound)` - No such user
    pub async fn get_profile(&self, user_id: i32) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.profile_cache.get(&user_id).await {
            return Ok(profile);
        }

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        let follow_repo = FollowRepository::new(self.db);
        let profile = UserProfile {
            user,
            followers_count: follow_repo.count_followers(user_id).await?,
            following_count: follow_repo.count_following(user_id).await?,
            trips_count: TripRepository::new(self.db)
                .count_for_member(user_id)
                .await?,
            stories_count: StoryRepository::new(self.db)
                .count_public_by_author(user_id)
                .await?,
        };

        self.profile_cache.insert(user_id, profile.clone()).await;

        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        if params
            .display_name
            .as_ref()
            .is_some_and(|name| name.is_empty())
        {
            return Err(AppError::BadRequest(
                "Display name cannot be empty".to_string(),
            ));
        }

        let Some(user) = UserRepository::new(self.db)
            .update_profile(user_id, params)
            .await?
        else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        self.profile_cache.invalidate(&user_id).await;

        Ok(user)
    }

    /// Users whose username or display name contains `query`, ordered by username.
    pub async fn search(
        &self,
        query: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Page<UserSummary>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .search(query.trim(), page, per_page)
            .await?;

        Ok(Page::new(users, total, page, per_page))
    }
}
