//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles user creation, profile updates, credential lookup and search with
//! conversion between entity models and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::{
    data::contains_pattern,
    model::user::{CreateUserParams, UpdateProfileParams, User, UserSummary},
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on email or username
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(params.email),
            username: ActiveValue::Set(params.username),
            password_hash: ActiveValue::Set(params.password_hash),
            display_name: ActiveValue::Set(params.display_name),
            bio: ActiveValue::Set(None),
            avatar_url: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            admin: ActiveValue::Set(params.admin),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user together with their stored password hash for login.
    ///
    /// # Returns
    /// - `Ok(Some((User, password_hash)))` - User found
    /// - `Ok(None)` - No user with that email
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(|e| {
            let hash = e.password_hash.clone();
            (User::from_entity(e), hash)
        }))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used during registration so the first account on a fresh install becomes admin.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Admin.eq(true))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    pub async fn update_profile(
        &self,
        id: i32,
        params: UpdateProfileParams,
    ) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.into();
        if let Some(display_name) = params.display_name {
            active.display_name = ActiveValue::Set(display_name);
        }
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(Some(bio));
        }
        if let Some(avatar_url) = params.avatar_url {
            active.avatar_url = ActiveValue::Set(Some(avatar_url));
        }
        if let Some(location) = params.location {
            active.location = ActiveValue::Set(Some(location));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;

        Ok(Some(User::from_entity(updated)))
    }

    /// Searches users whose username or display name contains `query`, ordered by username.
    ///
    /// `query` is matched literally; `%` and `_` are not wildcards.
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and the total match count
    pub async fn search(
        &self,
        query: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<UserSummary>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Username.like(contains_pattern(query)))
                    .add(entity::user::Column::DisplayName.like(contains_pattern(query))),
            )
            .order_by_asc(entity::user::Column::Username)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((
            entities.into_iter().map(UserSummary::from_entity).collect(),
            total,
        ))
    }

    /// Loads summaries for a set of users keyed by id.
    ///
    /// Ids without a matching user are absent from the map.
    pub async fn find_summaries(&self, ids: &[i32]) -> Result<HashMap<i32, UserSummary>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|e| (e.id, UserSummary::from_entity(e)))
            .collect())
    }
}
