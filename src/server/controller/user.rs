use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        user::{
            PaginatedFollowsDto, PaginatedUsersDto, UpdateProfileDto, UserDto, UserProfileDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::UpdateProfileParams,
        service::{follow::FollowService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping user and follow endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring matched against username and display name
    #[serde(default)]
    pub q: String,
}

/// Search users by username or display name.
///
/// # Access Control
/// - Any logged-in user
///
/// # Returns
/// - `200 OK` - Matching users ordered by username
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = USER_TAG,
    params(SearchParams, PaginationParams),
    responses(
        (status = 200, description = "Matching users", body = PaginatedUsersDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_users(
    State(state): State<AppState>,
    session: Session,
    Query(search): Query<SearchParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let users = UserService::new(&state.db, &state.profile_cache)
        .search(&search.q, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto())))
}

/// Get a user's public profile with follower, following, trip and story counts.
///
/// # Returns
/// - `200 OK` - Profile
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - Unknown user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserProfileDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let profile = UserService::new(&state.db, &state.profile_cache)
        .get_profile(user_id)
        .await?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Update the logged-in user's profile. Omitted fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated account", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let updated = UserService::new(&state.db, &state.profile_cache)
        .update_profile(user.id, UpdateProfileParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(updated.into_dto())))
}

/// Follow a user.
///
/// # Returns
/// - `204 No Content` - Now following
/// - `400 Bad Request` - Attempt to follow yourself
/// - `404 Not Found` - Unknown user
/// - `409 Conflict` - Already following
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/follow",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User to follow")),
    responses(
        (status = 204, description = "Followed"),
        (status = 400, description = "Cannot follow yourself", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Already following", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn follow(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    FollowService::new(&state.db, &state.profile_cache)
        .follow(user.id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/follow",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User to unfollow")),
    responses(
        (status = 204, description = "Unfollowed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Not following this user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unfollow(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    FollowService::new(&state.db, &state.profile_cache)
        .unfollow(user.id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Users following `user_id`, newest first.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/followers",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID"), PaginationParams),
    responses(
        (status = 200, description = "Followers", body = PaginatedFollowsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_followers(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let followers = FollowService::new(&state.db, &state.profile_cache)
        .followers(user_id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(followers.into_dto())))
}

/// Users `user_id` follows, newest first.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/following",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID"), PaginationParams),
    responses(
        (status = 200, description = "Followed users", body = PaginatedFollowsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_following(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let following = FollowService::new(&state.db, &state.profile_cache)
        .following(user_id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(following.into_dto())))
}
