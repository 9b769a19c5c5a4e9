//! Category catalog handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{CategoryWithRooms, CreateCategoryRequest, UpdateCategoryRequest},
    state::AppState,
};

/// List all categories with their rooms attached
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = state.category_repository.list_all().await?;

    let mut views = Vec::with_capacity(categories.len());
    for category in categories {
        let rooms = state
            .category_repository
            .rooms_for_category(category.id)
            .await?;
        views.push(CategoryWithRooms { category, rooms });
    }

    Ok(Json(json!({
        "success": true,
        "count": views.len(),
        "data": views,
    })))
}

/// Category detail with its rooms attached
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .category_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

    let rooms = state.category_repository.rooms_for_category(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": CategoryWithRooms { category, rooms },
    })))
}

/// Occupancy statistics for a category's rooms
pub async fn category_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state
        .category_repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

    let stats = state.category_repository.room_stats(id).await?;

    Ok(Json(json!({
        "success": true,
        "data": stats,
    })))
}

/// Create a category (admin)
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }

    if state
        .category_repository
        .find_by_name(&payload.name)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation(
            "A category with this name already exists".to_string(),
        ));
    }

    let category = state.category_repository.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": category,
        })),
    ))
}

/// Update a category (admin)
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .category_repository
        .update(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

    Ok(Json(json!({
        "success": true,
        "data": category,
    })))
}

/// Delete a category (admin); refused while rooms still reference it
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let room_count = state.category_repository.count_rooms(id).await?;
    if room_count > 0 {
        return Err(ApiError::Validation(
            "Category still has rooms attached".to_string(),
        ));
    }

    let deleted = state.category_repository.delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Category"));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Category deleted successfully",
    })))
}
