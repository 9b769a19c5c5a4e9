//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad or missing fields, disallowed update fields
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid bearer token
    #[error("Authentication required")]
    Unauthenticated,

    /// Wrong email/password combination
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Access policy violation
    #[error("Access denied")]
    Forbidden,

    /// Entity absent; the payload names what was missing
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Date-range overlap with an existing booking
    #[error("Room is not available for these dates")]
    RoomUnavailable,

    /// Unhandled internal failure
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    /// Database error
    #[error("Internal server error")]
    Database(#[from] sqlx::Error),
}

impl From<common::error::DatabaseError> for ApiError {
    fn from(err: common::error::DatabaseError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl ApiError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::RoomUnavailable => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(err) => tracing::error!("Internal error: {:#}", err),
            ApiError::Database(err) => tracing::error!("Database error: {}", err),
            _ => {}
        }

        let status = self.status_code();
        // Internal failures surface a fixed message, no detail leakage.
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Errors raised by the booking lifecycle manager
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Room is not available for these dates")]
    RoomUnavailable,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::RoomNotFound => ApiError::NotFound("Room"),
            BookingError::RoomUnavailable => ApiError::RoomUnavailable,
            BookingError::Validation(msg) => ApiError::Validation(msg),
            BookingError::Database(e) => ApiError::Database(e),
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(
            ApiError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::RoomUnavailable.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("Booking").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn booking_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(BookingError::RoomNotFound),
            ApiError::NotFound("Room")
        ));
        assert!(matches!(
            ApiError::from(BookingError::RoomUnavailable),
            ApiError::RoomUnavailable
        ));
        assert!(matches!(
            ApiError::from(BookingError::Validation("x".into())),
            ApiError::Validation(_)
        ));
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(ApiError::NotFound("Booking").to_string(), "Booking not found");
    }
}
