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
        club::{ClubDto, ClubMemberDto, CreateClubDto, PaginatedClubsDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        model::club::CreateClubParams,
        service::club::ClubService,
        state::AppState,
    },
};

/// Tag for grouping club endpoints in OpenAPI documentation
pub static CLUB_TAG: &str = "club";

/// Create a club owned by the logged-in user.
///
/// # Returns
/// - `201 Created` - Club created with the caller as owner
/// - `400 Bad Request` - Empty name
/// - `409 Conflict` - Name already taken
#[utoipa::path(
    post,
    path = "/api/clubs",
    tag = CLUB_TAG,
    request_body = CreateClubDto,
    responses(
        (status = 201, description = "Club created", body = ClubDto),
        (status = 400, description = "Invalid club data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 409, description = "Club name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_club(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateClubDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let club = ClubService::new(&state.db)
        .create(CreateClubParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(club.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/clubs",
    tag = CLUB_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Clubs ordered by name", body = PaginatedClubsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_clubs(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let clubs = ClubService::new(&state.db)
        .list(params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(clubs.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/clubs/{club_id}",
    tag = CLUB_TAG,
    params(("club_id" = i32, Path, description = "Club ID")),
    responses(
        (status = 200, description = "Club with member count", body = ClubDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Club not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_club(
    State(state): State<AppState>,
    session: Session,
    Path(club_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let club = ClubService::new(&state.db).get(club_id).await?;

    Ok((StatusCode::OK, Json(club.into_dto())))
}

/// Delete a club.
///
/// # Access Control
/// - Owner or admin
#[utoipa::path(
    delete,
    path = "/api/clubs/{club_id}",
    tag = CLUB_TAG,
    params(("club_id" = i32, Path, description = "Club ID")),
    responses(
        (status = 204, description = "Club deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the owner or an admin", body = ErrorDto),
        (status = 404, description = "Club not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_club(
    State(state): State<AppState>,
    session: Session,
    Path(club_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ClubService::new(&state.db).delete(club_id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join a public club.
///
/// # Returns
/// - `204 No Content` - Joined
/// - `403 Forbidden` - Club is private
/// - `404 Not Found` - Unknown club
/// - `409 Conflict` - Already a member
#[utoipa::path(
    post,
    path = "/api/clubs/{club_id}/join",
    tag = CLUB_TAG,
    params(("club_id" = i32, Path, description = "Club ID")),
    responses(
        (status = 204, description = "Joined the club"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Club is private", body = ErrorDto),
        (status = 404, description = "Club not found", body = ErrorDto),
        (status = 409, description = "Already a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_club(
    State(state): State<AppState>,
    session: Session,
    Path(club_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ClubService::new(&state.db).join(club_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/clubs/{club_id}/leave",
    tag = CLUB_TAG,
    params(("club_id" = i32, Path, description = "Club ID")),
    responses(
        (status = 204, description = "Left the club"),
        (status = 400, description = "The owner cannot leave", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Not a member of this club", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_club(
    State(state): State<AppState>,
    session: Session,
    Path(club_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ClubService::new(&state.db).leave(club_id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/clubs/{club_id}/members",
    tag = CLUB_TAG,
    params(("club_id" = i32, Path, description = "Club ID")),
    responses(
        (status = 200, description = "Club members", body = Vec<ClubMemberDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Club not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_club_members(
    State(state): State<AppState>,
    session: Session,
    Path(club_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let members = ClubService::new(&state.db).members(club_id).await?;

    let members_dto: Vec<_> = members.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(members_dto)))
}
