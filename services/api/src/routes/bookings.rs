//! Booking lifecycle handlers
//!
//! Read, update, and cancel are guarded by the owner-or-admin policy; a
//! policy violation is a 403 and is distinct from a 404.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{
        ALLOWED_BOOKING_UPDATES, Booking, BookingQuery, CreateBookingRequest,
        UpdateBookingRequest, check_update_whitelist,
    },
    policy::can_access,
    state::AppState,
};

/// Create a booking for the requesting user
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateBookingRequest>,
) -> ApiResult<impl IntoResponse> {
    let booking = state.booking_repository.create(auth.id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": booking,
        })),
    ))
}

/// Admin listing with filters and sorting
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> ApiResult<impl IntoResponse> {
    let bookings = state.booking_repository.list_all(&query).await?;

    Ok(Json(json!({
        "success": true,
        "count": bookings.len(),
        "data": bookings,
    })))
}

/// The requester's own bookings, newest first
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let bookings = state.booking_repository.list_for_user(auth.id).await?;

    Ok(Json(json!({
        "success": true,
        "count": bookings.len(),
        "data": bookings,
    })))
}

/// Booking detail, owner or admin only
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let details = state
        .booking_repository
        .find_details(id)
        .await?
        .ok_or(ApiError::NotFound("Booking"))?;

    if !can_access(details.booking.user_id, &auth) {
        return Err(ApiError::Forbidden);
    }

    Ok(Json(json!({
        "success": true,
        "data": details,
    })))
}

/// Fetch a booking and enforce the owner-or-admin policy
async fn load_guarded(state: &AppState, id: Uuid, auth: &AuthUser) -> ApiResult<Booking> {
    let booking = state
        .booking_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Booking"))?;

    if !can_access(booking.user_id, auth) {
        return Err(ApiError::Forbidden);
    }

    Ok(booking)
}

/// Update a booking, owner or admin only
///
/// The body may only carry startDate, endDate, guests, and specialRequests;
/// anything else fails the whole request before any field is applied.
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<impl IntoResponse> {
    check_update_whitelist(&body, ALLOWED_BOOKING_UPDATES).map_err(ApiError::Validation)?;

    let changes: UpdateBookingRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("Invalid update payload: {}", e)))?;

    let booking = load_guarded(&state, id, &auth).await?;
    let updated = state.booking_repository.update(&booking, &changes).await?;

    Ok(Json(json!({
        "success": true,
        "data": updated,
    })))
}

/// Cancel a booking, owner or admin only; idempotent
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let booking = load_guarded(&state, id, &auth).await?;
    let cancelled = state.booking_repository.cancel(&booking).await?;

    Ok(Json(json!({
        "success": true,
        "data": cancelled,
    })))
}
