//! Account registration, login, and profile handlers

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{
        ALLOWED_PROFILE_UPDATES, LoginRequest, RegisterRequest, UpdateProfileRequest,
        check_update_whitelist,
    },
    state::AppState,
    validation::{validate_email, validate_password},
};

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_email(&payload.email).map_err(ApiError::Validation)?;
    validate_password(&payload.password).map_err(ApiError::Validation)?;

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Validation(
            "An account with this email already exists".to_string(),
        ));
    }

    let user = state.user_repository.create(&payload).await?;
    let token = state.jwt_service.generate_token(user.id, user.role)?;

    info!("Registered new account: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "token": token,
                "user": user.public_profile(),
            }
        })),
    ))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    state.user_repository.record_login(user.id).await?;
    let token = state.jwt_service.generate_token(user.id, user.role)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "user": user.public_profile(),
        }
    })))
}

/// Public profile of the requester
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(json!({
        "success": true,
        "data": user.public_profile(),
    })))
}

/// Update the requester's profile
///
/// Only firstName, lastName, phoneNumber, and password may change; any
/// other key rejects the whole request.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<impl IntoResponse> {
    check_update_whitelist(&body, ALLOWED_PROFILE_UPDATES).map_err(ApiError::Validation)?;

    let changes: UpdateProfileRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("Invalid update payload: {}", e)))?;

    if let Some(password) = &changes.password {
        validate_password(password).map_err(ApiError::Validation)?;
    }

    let user = state
        .user_repository
        .update_profile(auth.id, &changes)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(json!({
        "success": true,
        "data": user.public_profile(),
    })))
}

/// Stateless logout acknowledgement
pub async fn logout() -> ApiResult<impl IntoResponse> {
    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully",
    })))
}
