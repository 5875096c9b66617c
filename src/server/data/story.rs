//! Story and story like repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::story::{CreateStoryParams, Story};

pub struct StoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateStoryParams,
        content_html: String,
    ) -> Result<Story, DbErr> {
        let now = Utc::now();
        let entity = entity::story::ActiveModel {
            author_id: ActiveValue::Set(params.author_id),
            trip_id: ActiveValue::Set(params.trip_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            content_html: ActiveValue::Set(content_html),
            location: ActiveValue::Set(params.location),
            is_public: ActiveValue::Set(params.is_public),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Story::from_entity(entity, 0))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Story>, DbErr> {
        let Some(entity) = entity::prelude::Story::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let like_count = self.like_count(id).await?;

        Ok(Some(Story::from_entity(entity, like_count)))
    }

    /// Stories by one author, newest first. Private stories are included only when asked.
    pub async fn list_by_author(
        &self,
        author_id: i32,
        include_private: bool,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Story>, u64), DbErr> {
        let mut query =
            entity::prelude::Story::find().filter(entity::story::Column::AuthorId.eq(author_id));
        if !include_private {
            query = query.filter(entity::story::Column::IsPublic.eq(true));
        }

        let paginator = query
            .order_by_desc(entity::story::Column::CreatedAt)
            .order_by_desc(entity::story::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.with_like_counts(entities).await?, total))
    }

    /// Public stories by `followed_ids` plus every story by `viewer_id`, newest first.
    pub async fn feed(
        &self,
        viewer_id: i32,
        followed_ids: Vec<i32>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Story>, u64), DbErr> {
        let mut condition = Condition::any().add(entity::story::Column::AuthorId.eq(viewer_id));
        if !followed_ids.is_empty() {
            condition = condition.add(
                Condition::all()
                    .add(entity::story::Column::AuthorId.is_in(followed_ids))
                    .add(entity::story::Column::IsPublic.eq(true)),
            );
        }

        let paginator = entity::prelude::Story::find()
            .filter(condition)
            .order_by_desc(entity::story::Column::CreatedAt)
            .order_by_desc(entity::story::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.with_like_counts(entities).await?, total))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Story::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_public_by_author(&self, author_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Story::find()
            .filter(entity::story::Column::AuthorId.eq(author_id))
            .filter(entity::story::Column::IsPublic.eq(true))
            .count(self.db)
            .await
    }

    pub async fn add_like(&self, story_id: i32, user_id: i32) -> Result<(), DbErr> {
        entity::story_like::ActiveModel {
            story_id: ActiveValue::Set(story_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    pub async fn remove_like(&self, story_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::StoryLike::delete_by_id((story_id, user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn has_liked(&self, story_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let like = entity::prelude::StoryLike::find_by_id((story_id, user_id))
            .one(self.db)
            .await?;

        Ok(like.is_some())
    }

    pub async fn like_count(&self, story_id: i32) -> Result<u64, DbErr> {
        entity::prelude::StoryLike::find()
            .filter(entity::story_like::Column::StoryId.eq(story_id))
            .count(self.db)
            .await
    }

    /// Attaches like counts to a page of stories with a single extra query.
    async fn with_like_counts(
        &self,
        entities: Vec<entity::story::Model>,
    ) -> Result<Vec<Story>, DbErr> {
        let ids: Vec<i32> = entities.iter().map(|s| s.id).collect();

        let mut counts: HashMap<i32, u64> = HashMap::new();
        if !ids.is_empty() {
            let liked: Vec<i32> = entity::prelude::StoryLike::find()
                .select_only()
                .column(entity::story_like::Column::StoryId)
                .filter(entity::story_like::Column::StoryId.is_in(ids))
                .into_tuple()
                .all(self.db)
                .await?;
            for story_id in liked {
                *counts.entry(story_id).or_default() += 1;
            }
        }

        Ok(entities
            .into_iter()
            .map(|e| {
                let like_count = counts.get(&e.id).copied().unwrap_or(0);
                Story::from_entity(e, like_count)
            })
            .collect())
    }
}
