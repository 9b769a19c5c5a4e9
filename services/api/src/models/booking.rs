//! Booking model, date-range arithmetic, and related payloads
//!
//! Booking intervals are half-open: `[start_date, end_date)`. A booking
//! ending exactly when another starts does not overlap it, so same-day
//! checkout/check-in turnover is allowed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Booking lifecycle status
///
/// `Confirmed` and `Completed` are valid states reserved for payment and
/// stay-completion collaborators; no operation here transitions into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

/// Default check-in time of day
pub const DEFAULT_CHECK_IN_TIME: &str = "14:00";
/// Default check-out time of day
pub const DEFAULT_CHECK_OUT_TIME: &str = "12:00";

const SECONDS_PER_DAY: i64 = 86_400;

/// Half-open interval overlap test: `[a_start, a_end)` and
/// `[b_start, b_end)` intersect iff `a_start < b_end && b_start < a_end`.
pub fn ranges_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Stay duration in whole days, rounding partial days up.
///
/// Requires `end > start` (enforced by validation upstream).
pub fn stay_nights(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds();
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// Total price for a stay: nightly rate times the ceiling-day duration.
pub fn total_price(nightly_rate: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    nightly_rate * stay_nights(start, end) as f64
}

/// Booking entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub guests: i32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub special_requests: Option<String>,
    pub check_in_time: String,
    pub check_out_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short room reference attached to a booking view
#[derive(Debug, Serialize)]
pub struct BookingRoomSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

/// Short user reference attached to a booking view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Booking with room and user summaries attached
#[derive(Debug, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub room: BookingRoomSummary,
    pub user: BookingUserSummary,
}

/// Request for creating a booking
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
}

/// Booking update payload
///
/// Only these four fields are mutable; the handler rejects request bodies
/// carrying any other key before this struct is ever deserialized.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub guests: Option<i32>,
    pub special_requests: Option<String>,
}

impl UpdateBookingRequest {
    /// Whether the update changes the booked date range
    pub fn changes_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

/// Fields accepted by the booking update endpoint
pub const ALLOWED_BOOKING_UPDATES: &[&str] =
    &["startDate", "endDate", "guests", "specialRequests"];

/// Reject a JSON body containing any key outside the whitelist.
///
/// All-or-nothing: one disallowed key fails the whole operation, nothing is
/// applied partially.
pub fn check_update_whitelist(
    body: &serde_json::Value,
    allowed: &[&str],
) -> Result<(), String> {
    let map = body
        .as_object()
        .ok_or_else(|| "Request body must be a JSON object".to_string())?;

    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(format!("Field '{}' cannot be updated", key));
        }
    }
    Ok(())
}

/// Query parameters for the admin booking list
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
    /// Lower bound on the booking start date
    pub start_date: Option<DateTime<Utc>>,
    /// Upper bound on the booking start date
    pub end_date: Option<DateTime<Utc>>,
    pub sort: Option<String>,
}

/// Resolve a sort parameter against the column whitelist.
///
/// A leading `-` means descending. Accepts both camelCase and snake_case
/// spellings; anything else is rejected.
pub fn sort_clause(sort: &str) -> Option<&'static str> {
    let (column, descending) = match sort.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (sort, false),
    };

    let column = match column {
        "createdAt" | "created_at" => "created_at",
        "startDate" | "start_date" => "start_date",
        "totalPrice" | "total_price" => "total_price",
        _ => return None,
    };

    Some(match (column, descending) {
        ("created_at", true) => "created_at DESC",
        ("created_at", false) => "created_at ASC",
        ("start_date", true) => "start_date DESC",
        ("start_date", false) => "start_date ASC",
        ("total_price", true) => "total_price DESC",
        ("total_price", false) => "total_price ASC",
        _ => unreachable!(),
    })
}

/// Default sort for booking lists: newest first
pub const DEFAULT_BOOKING_SORT: &str = "-createdAt";

/// Most-booked room statistics entry
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MostBookedRoom {
    pub id: Uuid,
    pub name: String,
    pub booking_count: i64,
}

/// Bookings-per-month statistics entry
#[derive(Debug, Serialize, FromRow)]
pub struct MonthlyBookings {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn overlap_detects_intersecting_ranges() {
        assert!(ranges_overlap(at(1, 0), at(5, 0), at(3, 0), at(7, 0)));
        assert!(ranges_overlap(at(3, 0), at(7, 0), at(1, 0), at(5, 0)));
        assert!(ranges_overlap(at(1, 0), at(10, 0), at(3, 0), at(4, 0)));
    }

    #[test]
    fn overlap_ignores_disjoint_ranges() {
        assert!(!ranges_overlap(at(1, 0), at(3, 0), at(5, 0), at(7, 0)));
        assert!(!ranges_overlap(at(5, 0), at(7, 0), at(1, 0), at(3, 0)));
    }

    #[test]
    fn same_day_turnover_is_not_an_overlap() {
        // One stay ends exactly when the next begins.
        assert!(!ranges_overlap(at(1, 0), at(3, 0), at(3, 0), at(5, 0)));
        assert!(!ranges_overlap(at(3, 0), at(5, 0), at(1, 0), at(3, 0)));
    }

    #[test]
    fn stay_nights_counts_whole_days() {
        assert_eq!(stay_nights(at(1, 0), at(2, 0)), 1);
        assert_eq!(stay_nights(at(1, 0), at(4, 0)), 3);
    }

    #[test]
    fn stay_nights_rounds_partial_days_up() {
        // 2.5 days charge as 3
        assert_eq!(stay_nights(at(1, 0), at(3, 12)), 3);
        // a few hours charge as a full day
        assert_eq!(stay_nights(at(1, 10), at(1, 15)), 1);
    }

    #[test]
    fn total_price_is_rate_times_ceiling_days() {
        assert_eq!(total_price(100.0, at(1, 0), at(3, 12)), 300.0);
        assert_eq!(total_price(80.0, at(1, 0), at(3, 0)), 160.0);
        // deterministic for identical inputs
        assert_eq!(
            total_price(99.5, at(2, 0), at(6, 0)),
            total_price(99.5, at(2, 0), at(6, 0)),
        );
    }

    #[test]
    fn whitelist_accepts_allowed_fields() {
        let body = serde_json::json!({
            "startDate": "2030-06-01T00:00:00Z",
            "guests": 2,
            "specialRequests": "late arrival"
        });
        assert!(check_update_whitelist(&body, ALLOWED_BOOKING_UPDATES).is_ok());
    }

    #[test]
    fn whitelist_rejects_any_disallowed_field() {
        let body = serde_json::json!({
            "guests": 2,
            "status": "confirmed"
        });
        let err = check_update_whitelist(&body, ALLOWED_BOOKING_UPDATES).unwrap_err();
        assert!(err.contains("status"));

        let body = serde_json::json!({ "totalPrice": 1.0 });
        assert!(check_update_whitelist(&body, ALLOWED_BOOKING_UPDATES).is_err());
    }

    #[test]
    fn whitelist_rejects_non_object_bodies() {
        let body = serde_json::json!(["startDate"]);
        assert!(check_update_whitelist(&body, ALLOWED_BOOKING_UPDATES).is_err());
    }

    #[test]
    fn sort_clause_resolves_whitelisted_columns() {
        assert_eq!(sort_clause("-createdAt"), Some("created_at DESC"));
        assert_eq!(sort_clause("created_at"), Some("created_at ASC"));
        assert_eq!(sort_clause("startDate"), Some("start_date ASC"));
        assert_eq!(sort_clause("-total_price"), Some("total_price DESC"));
    }

    #[test]
    fn sort_clause_rejects_unknown_columns() {
        assert_eq!(sort_clause("id; DROP TABLE bookings"), None);
        assert_eq!(sort_clause("-status"), None);
        assert_eq!(sort_clause(""), None);
    }
}
