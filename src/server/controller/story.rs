use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        story::{CreateStoryDto, PaginatedStoriesDto, StoryDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        model::story::CreateStoryParams,
        service::story::StoryService,
        state::AppState,
    },
};

/// Tag for grouping story endpoints in OpenAPI documentation
pub static STORY_TAG: &str = "story";

/// Publish a travel story written in markdown.
///
/// The markdown is rendered to HTML on write; raw HTML in the source is dropped.
///
/// # Returns
/// - `201 Created` - Story published
/// - `400 Bad Request` - Empty title or content
/// - `404 Not Found` - Linked trip does not exist
#[utoipa::path(
    post,
    path = "/api/stories",
    tag = STORY_TAG,
    request_body = CreateStoryDto,
    responses(
        (status = 201, description = "Story published", body = StoryDto),
        (status = 400, description = "Invalid story data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_story(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateStoryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let story = StoryService::new(&state.db)
        .create(CreateStoryParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(story.into_dto())))
}

/// Public stories from followed users plus the caller's own, newest first.
#[utoipa::path(
    get,
    path = "/api/stories/feed",
    tag = STORY_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Story feed", body = PaginatedStoriesDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_feed(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let stories = StoryService::new(&state.db)
        .feed(user.id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(stories.into_dto())))
}

/// Stories by one author. Private stories are included only for the author.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/stories",
    tag = STORY_TAG,
    params(("user_id" = i32, Path, description = "Author ID"), PaginationParams),
    responses(
        (status = 200, description = "Stories by the author", body = PaginatedStoriesDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_user_stories(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let stories = StoryService::new(&state.db)
        .list_by_author(user_id, user.id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(stories.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/stories/{story_id}",
    tag = STORY_TAG,
    params(("story_id" = i32, Path, description = "Story ID")),
    responses(
        (status = 200, description = "Story", body = StoryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Story not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_story(
    State(state): State<AppState>,
    session: Session,
    Path(story_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let story = StoryService::new(&state.db).get(story_id, user.id).await?;

    Ok((StatusCode::OK, Json(story.into_dto())))
}

/// Delete a story.
///
/// # Access Control
/// - Author or admin
#[utoipa::path(
    delete,
    path = "/api/stories/{story_id}",
    tag = STORY_TAG,
    params(("story_id" = i32, Path, description = "Story ID")),
    responses(
        (status = 204, description = "Story deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author or an admin", body = ErrorDto),
        (status = 404, description = "Story not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_story(
    State(state): State<AppState>,
    session: Session,
    Path(story_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    StoryService::new(&state.db).delete(story_id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/stories/{story_id}/like",
    tag = STORY_TAG,
    params(("story_id" = i32, Path, description = "Story ID")),
    responses(
        (status = 204, description = "Story liked"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Story not found", body = ErrorDto),
        (status = 409, description = "Already liked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn like_story(
    State(state): State<AppState>,
    session: Session,
    Path(story_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    StoryService::new(&state.db).like(story_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/stories/{story_id}/like",
    tag = STORY_TAG,
    params(("story_id" = i32, Path, description = "Story ID")),
    responses(
        (status = 204, description = "Like removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Story not liked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unlike_story(
    State(state): State<AppState>,
    session: Session,
    Path(story_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    StoryService::new(&state.db).unlike(story_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
