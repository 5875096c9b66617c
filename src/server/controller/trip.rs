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
        trip::{CreateTripDto, PaginatedTripsDto, TripDto, TripMemberDto, UpdateTripDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        model::trip::{CreateTripParams, TripFilter, TripStatus, UpdateTripParams},
        service::trip::TripService,
        state::AppState,
    },
};

/// Tag for grouping trip endpoints in OpenAPI documentation
pub static TRIP_TAG: &str = "trip";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TripFilterParams {
    /// Case-insensitive substring of the destination
    pub destination: Option<String>,
    /// One of planning, upcoming, ongoing, completed, cancelled
    pub status: Option<String>,
}

impl TripFilterParams {
    fn into_filter(self) -> Result<TripFilter, AppError> {
        Ok(TripFilter {
            destination: self.destination.filter(|d| !d.trim().is_empty()),
            status: self.status.as_deref().map(TripStatus::from_request).transpose()?,
        })
    }
}

/// Create a trip organized by the logged-in user.
///
/// The organizer is added as the first member in the same transaction.
///
/// # Returns
/// - `201 Created` - Trip created
/// - `400 Bad Request` - Empty title or destination, end before start,
///   non-positive capacity or negative price
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    post,
    path = "/api/trips",
    tag = TRIP_TAG,
    request_body = CreateTripDto,
    responses(
        (status = 201, description = "Trip created", body = TripDto),
        (status = 400, description = "Invalid trip data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_trip(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateTripDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let trip = TripService::new(&state.db, &state.trip_cache)
        .create(CreateTripParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(trip.into_dto())))
}

/// List public trips, ordered by start date.
#[utoipa::path(
    get,
    path = "/api/trips",
    tag = TRIP_TAG,
    params(TripFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Public trips", body = PaginatedTripsDto),
        (status = 400, description = "Unknown status filter", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_public_trips(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<TripFilterParams>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let trips = TripService::new(&state.db, &state.trip_cache)
        .list_public(filter.into_filter()?, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(trips.into_dto())))
}

/// List trips the logged-in user organizes or has joined.
#[utoipa::path(
    get,
    path = "/api/trips/mine",
    tag = TRIP_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "The user's trips", body = PaginatedTripsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_trips(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let trips = TripService::new(&state.db, &state.trip_cache)
        .list_for_user(user.id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(trips.into_dto())))
}

/// Get a trip.
///
/// Private trips are reported as missing to anyone who is not a member.
#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}",
    tag = TRIP_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip", body = TripDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let trip = TripService::new(&state.db, &state.trip_cache)
        .get(trip_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(trip.into_dto())))
}

/// Update a trip. Omitted fields are left unchanged.
///
/// # Access Control
/// - Organizer only
///
/// # Returns
/// - `200 OK` - Updated trip
/// - `400 Bad Request` - Resulting trip would be invalid, or `status` is anything
///   other than `cancelled`
/// - `403 Forbidden` - Caller is not the organizer
/// - `404 Not Found` - Unknown trip
#[utoipa::path(
    put,
    path = "/api/trips/{trip_id}",
    tag = TRIP_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID")),
    request_body = UpdateTripDto,
    responses(
        (status = 200, description = "Trip updated", body = TripDto),
        (status = 400, description = "Invalid trip data or status change", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the organizer", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
    Json(payload): Json<UpdateTripDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let trip = TripService::new(&state.db, &state.trip_cache)
        .update(trip_id, user.id, UpdateTripParams::from_dto(payload)?)
        .await?;

    Ok((StatusCode::OK, Json(trip.into_dto())))
}

/// Delete a trip together with its memberships and bookings.
///
/// # Access Control
/// - Organizer or admin
#[utoipa::path(
    delete,
    path = "/api/trips/{trip_id}",
    tag = TRIP_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the organizer or an admin", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TripService::new(&state.db, &state.trip_cache)
        .delete(trip_id, &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join a free public trip.
///
/// Paid trips are joined by confirming a booking instead.
///
/// # Returns
/// - `204 No Content` - Joined
/// - `400 Bad Request` - Trip is paid, full, cancelled or completed
/// - `404 Not Found` - Unknown or private trip
/// - `409 Conflict` - Already a member
#[utoipa::path(
    post,
    path = "/api/trips/{trip_id}/join",
    tag = TRIP_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 204, description = "Joined the trip"),
        (status = 400, description = "Trip cannot be joined", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 409, description = "Already a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn join_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TripService::new(&state.db, &state.trip_cache)
        .join(trip_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/trips/{trip_id}/leave",
    tag = TRIP_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 204, description = "Left the trip"),
        (status = 400, description = "The organizer cannot leave", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Not a member of this trip", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn leave_trip(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    TripService::new(&state.db, &state.trip_cache)
        .leave(trip_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}/members",
    tag = TRIP_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip members", body = Vec<TripMemberDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_trip_members(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let members = TripService::new(&state.db, &state.trip_cache)
        .members(trip_id, user.id)
        .await?;

    let members_dto: Vec<_> = members.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(members_dto)))
}
