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
        booking::{BookingDto, ConfirmBookingDto, CreateBookingDto, PaginatedBookingsDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        model::booking::CreateBookingParams,
        service::booking::BookingService,
        state::AppState,
    },
};

/// Tag for grouping booking endpoints in OpenAPI documentation
pub static BOOKING_TAG: &str = "booking";

/// Book seats on a trip.
///
/// With `use_wallet` the wallet balance is applied first, in the same transaction
/// as the booking. When the wallet covers the total the booking is confirmed at
/// once and the caller joins the trip; otherwise it waits for the gateway payment
/// until the payment window closes.
///
/// Only public trips accept bookings. A private trip is hidden from non-members
/// (404) and its members already hold a place (409), so a private trip takes no
/// new participants until the organizer makes it public.
///
/// # Returns
/// - `201 Created` - Booking created (confirmed or pending payment)
/// - `400 Bad Request` - No seats requested, trip closed or full, or caller organizes the trip
/// - `404 Not Found` - Unknown trip, or a private trip the caller is not part of
/// - `409 Conflict` - Caller already belongs to the trip or holds a booking
#[utoipa::path(
    post,
    path = "/api/trips/{trip_id}/bookings",
    tag = BOOKING_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID")),
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 400, description = "Booking not possible", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 409, description = "Already booked or a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
    Json(payload): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let booking = BookingService::new(&state.db, state.payment_window)
        .create(CreateBookingParams {
            user_id: user.id,
            trip_id,
            seats: payload.seats,
            use_wallet: payload.use_wallet,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into_dto())))
}

/// Bookings on a trip.
///
/// # Access Control
/// - Trip organizer only
#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}/bookings",
    tag = BOOKING_TAG,
    params(("trip_id" = i32, Path, description = "Trip ID"), PaginationParams),
    responses(
        (status = 200, description = "Trip bookings", body = PaginatedBookingsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the organizer", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_trip_bookings(
    State(state): State<AppState>,
    session: Session,
    Path(trip_id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let bookings = BookingService::new(&state.db, state.payment_window)
        .list_for_trip(trip_id, user.id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(bookings.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "The caller's bookings, newest first", body = PaginatedBookingsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_my_bookings(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let bookings = BookingService::new(&state.db, state.payment_window)
        .list_for_user(user.id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(bookings.into_dto())))
}

/// Get a booking. Visible to its owner and the trip organizer.
#[utoipa::path(
    get,
    path = "/api/bookings/{booking_id}",
    tag = BOOKING_TAG,
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = BookingDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let booking = BookingService::new(&state.db, state.payment_window)
        .get(booking_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Confirm a pending booking with the gateway's payment reference.
///
/// # Returns
/// - `200 OK` - Booking confirmed and trip joined
/// - `400 Bad Request` - Empty reference, booking not pending, or window closed
/// - `404 Not Found` - Unknown booking or owned by someone else
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/confirm",
    tag = BOOKING_TAG,
    params(("booking_id" = i32, Path, description = "Booking ID")),
    request_body = ConfirmBookingDto,
    responses(
        (status = 200, description = "Booking confirmed", body = BookingDto),
        (status = 400, description = "Booking cannot be confirmed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn confirm_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<i32>,
    Json(payload): Json<ConfirmBookingDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let booking = BookingService::new(&state.db, state.payment_window)
        .confirm(booking_id, user.id, payload.payment_reference)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}

/// Cancel a pending or confirmed booking. The wallet portion is refunded.
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/cancel",
    tag = BOOKING_TAG,
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDto),
        (status = 400, description = "Booking already closed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let booking = BookingService::new(&state.db, state.payment_window)
        .cancel(booking_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(booking.into_dto())))
}
