//! API route table and OpenAPI document.
//!
//! Every handler is registered through `utoipa-axum` so the generated document
//! always matches the mounted routes. Handlers sharing a path are registered in
//! the same `routes!` group.

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{admin, auth, booking, budget, club, notification, story, trip, user, wallet},
    state::AppState,
};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "id",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Wander Sphere API",
        description = "Trips, budgets, stories, clubs, wallet and bookings for group travel."
    ),
    security(("SessionCookie" = [])),
    tags(
        (name = "auth", description = "Registration and session login"),
        (name = "user", description = "Profiles, search and follows"),
        (name = "trip", description = "Trips and trip membership"),
        (name = "budget", description = "Budgets and expenses"),
        (name = "story", description = "Travel stories, likes and feed"),
        (name = "club", description = "Clubs and club membership"),
        (name = "notification", description = "In-app notifications"),
        (name = "wallet", description = "Wallet balance and ledger"),
        (name = "booking", description = "Trip bookings and payment confirmation"),
        (name = "admin", description = "Administrative operations")
    )
)]
pub struct ApiDoc;

/// Builds the API router with Swagger UI mounted at `/api/docs`.
pub fn router() -> Router<AppState> {
    let (router, api) = api_router().split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        // Auth
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::current_user))
        // Users
        .routes(routes!(user::search_users))
        .routes(routes!(user::update_profile))
        .routes(routes!(user::get_profile))
        .routes(routes!(user::follow, user::unfollow))
        .routes(routes!(user::get_followers))
        .routes(routes!(user::get_following))
        .routes(routes!(story::list_user_stories))
        // Trips
        .routes(routes!(trip::create_trip, trip::list_public_trips))
        .routes(routes!(trip::list_my_trips))
        .routes(routes!(trip::get_trip, trip::update_trip, trip::delete_trip))
        .routes(routes!(trip::join_trip))
        .routes(routes!(trip::leave_trip))
        .routes(routes!(trip::get_trip_members))
        .routes(routes!(
            booking::create_booking,
            booking::list_trip_bookings
        ))
        // Budgets
        .routes(routes!(budget::create_budget, budget::list_budgets))
        .routes(routes!(
            budget::get_budget,
            budget::update_budget,
            budget::delete_budget
        ))
        .routes(routes!(budget::add_expense, budget::list_expenses))
        .routes(routes!(budget::delete_expense))
        // Stories
        .routes(routes!(story::create_story))
        .routes(routes!(story::get_feed))
        .routes(routes!(story::get_story, story::delete_story))
        .routes(routes!(story::like_story, story::unlike_story))
        // Clubs
        .routes(routes!(club::create_club, club::list_clubs))
        .routes(routes!(club::get_club, club::delete_club))
        .routes(routes!(club::join_club))
        .routes(routes!(club::leave_club))
        .routes(routes!(club::get_club_members))
        // Notifications
        .routes(routes!(notification::list_notifications))
        .routes(routes!(notification::get_unread_count))
        .routes(routes!(notification::mark_all_notifications_read))
        .routes(routes!(notification::mark_notification_read))
        .routes(routes!(notification::delete_notification))
        // Wallet
        .routes(routes!(wallet::get_wallet))
        .routes(routes!(wallet::get_transactions))
        .routes(routes!(wallet::top_up))
        // Bookings
        .routes(routes!(booking::list_my_bookings))
        .routes(routes!(booking::get_booking))
        .routes(routes!(booking::confirm_booking))
        .routes(routes!(booking::cancel_booking))
        // Admin
        .routes(routes!(admin::adjust_wallet))
}
