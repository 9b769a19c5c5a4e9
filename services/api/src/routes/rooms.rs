//! Room catalog handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{AvailabilityQuery, CreateRoomRequest, UpdateRoomRequest},
    state::AppState,
    validation::validate_date_order,
};

/// List all rooms, newest first
pub async fn list_rooms(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rooms = state.room_repository.list_all().await?;
    let summaries: Vec<_> = rooms.iter().map(|r| r.summary()).collect();

    Ok(Json(json!({
        "success": true,
        "count": summaries.len(),
        "data": summaries,
    })))
}

/// Featured rooms: the three highest-priced
pub async fn featured_rooms(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rooms = state.room_repository.featured().await?;
    let summaries: Vec<_> = rooms.iter().map(|r| r.summary()).collect();

    Ok(Json(json!({
        "success": true,
        "count": summaries.len(),
        "data": summaries,
    })))
}

/// Room detail with its category name
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let room = state
        .room_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Room"))?;

    let category = state
        .category_repository
        .find_by_id(room.category_id)
        .await?
        .map(|c| c.name)
        .unwrap_or_default();

    Ok(Json(json!({
        "success": true,
        "data": room.detail(category),
    })))
}

/// Availability probe for a date range
pub async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<impl IntoResponse> {
    validate_date_order(query.start_date, query.end_date).map_err(ApiError::Validation)?;

    let room = state
        .room_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Room"))?;

    let is_available = state
        .booking_repository
        .room_is_available(room.id, query.start_date, query.end_date, None)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "isAvailable": is_available,
            "room": room.id,
        }
    })))
}

/// Create a room (admin)
pub async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoomRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.price < 0.0 {
        return Err(ApiError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    if payload.capacity < 1 {
        return Err(ApiError::Validation(
            "Capacity must be at least 1".to_string(),
        ));
    }

    state
        .category_repository
        .find_by_id(payload.category_id)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

    let room = state.room_repository.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": room,
        })),
    ))
}

/// Update a room (admin)
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.price.is_some_and(|p| p < 0.0) {
        return Err(ApiError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    if payload.capacity.is_some_and(|c| c < 1) {
        return Err(ApiError::Validation(
            "Capacity must be at least 1".to_string(),
        ));
    }
    if let Some(category_id) = payload.category_id {
        state
            .category_repository
            .find_by_id(category_id)
            .await?
            .ok_or(ApiError::NotFound("Category"))?;
    }

    let room = state
        .room_repository
        .update(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Room"))?;

    Ok(Json(json!({
        "success": true,
        "data": room,
    })))
}

/// Delete a room (admin)
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.room_repository.delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Room"));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Room deleted successfully",
    })))
}
