//! Authentication middleware for bearer token validation

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::ApiError, models::UserRole, state::AppState};

/// Authenticated user information
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

/// Authentication middleware
///
/// Validates the bearer token and confirms the account still exists; the
/// role is taken from the database rather than the token so revoked admins
/// do not keep admin access for the token lifetime.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let claims = state
        .jwt_service
        .validate_token(token)
        .map_err(|_| ApiError::Unauthenticated)?;

    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        role: user.role,
    });

    Ok(next.run(req).await)
}

/// Admin guard; must run after `auth_middleware`
pub async fn admin_middleware(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(ApiError::Unauthenticated)?;

    if user.role != UserRole::Admin {
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}
