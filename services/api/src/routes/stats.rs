//! Reporting handlers (admin)

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{error::ApiResult, state::AppState};

/// Room statistics: most-booked rooms and bookings per month
pub async fn room_stats(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let most_booked = state.booking_repository.most_booked().await?;
    let bookings_by_month = state.booking_repository.bookings_per_month().await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "mostBooked": most_booked,
            "bookingsByMonth": bookings_by_month,
        }
    })))
}
