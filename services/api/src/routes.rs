//! API routes
//!
//! Three tiers: public (catalog browsing, register/login), authenticated
//! (profile, own bookings), and admin (catalog mutation, booking list,
//! stats). Auth and admin guards are applied per tier as route layers.

use axum::{
    Json, Router,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{
    middleware::{admin_middleware, auth_middleware},
    state::AppState,
};

pub mod auth;
pub mod bookings;
pub mod categories;
pub mod rooms;
pub mod stats;

/// Create the router for the booking service
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms/featured", get(rooms::featured_rooms))
        .route("/rooms/:id", get(rooms::get_room))
        .route("/rooms/:id/availability", get(rooms::check_availability))
        .route("/categories", get(categories::list_categories))
        .route("/categories/:id", get(categories::get_category))
        .route("/categories/:id/stats", get(categories::category_stats));

    let protected_routes = Router::new()
        .route("/auth/profile", get(auth::get_profile))
        .route("/auth/profile", put(auth::update_profile))
        .route("/auth/logout", post(auth::logout))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/me", get(bookings::my_bookings))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id", put(bookings::update_booking))
        .route("/bookings/:id", delete(bookings::cancel_booking))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/rooms", post(rooms::create_room))
        .route("/rooms/:id", put(rooms::update_room))
        .route("/rooms/:id", delete(rooms::delete_room))
        .route("/categories", post(categories::create_category))
        .route("/categories/:id", put(categories::update_category))
        .route("/categories/:id", delete(categories::delete_category))
        .route("/bookings", get(bookings::list_bookings))
        .route("/stats/rooms", get(stats::room_stats))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "booking-api"
    }))
}
