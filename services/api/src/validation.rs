//! Input validation utilities

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a requested booking window at creation time
///
/// The start must not lie in the past and the end must come strictly after
/// the start. `now` is passed in so the rule stays deterministic under test.
pub fn validate_booking_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), String> {
    if start < now {
        return Err("Start date must not be in the past".to_string());
    }
    validate_date_order(start, end)
}

/// Validate that the end date comes strictly after the start date
pub fn validate_date_order(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), String> {
    if end <= start {
        return Err("End date must be after start date".to_string());
    }
    Ok(())
}

/// Validate guest count
pub fn validate_guests(guests: i32) -> Result<(), String> {
    if guests < 1 {
        return Err("At least one guest is required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn accepts_well_formed_emails() {
        assert!(validate_email("guest@example.com").is_ok());
        assert!(validate_email("first.last+tag@hotel.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("").is_err());
        assert!(validate_password("longenough1").is_ok());
    }

    #[test]
    fn booking_window_rejects_past_start() {
        let now = day(10);
        assert!(validate_booking_window(day(5), day(6), now).is_err());
        assert!(validate_booking_window(day(10), day(12), now).is_ok());
        assert!(validate_booking_window(day(11), day(12), now).is_ok());
    }

    #[test]
    fn booking_window_rejects_inverted_or_empty_ranges() {
        let now = day(1);
        assert!(validate_booking_window(day(5), day(5), now).is_err());
        assert!(validate_booking_window(day(5), day(3), now).is_err());
    }

    #[test]
    fn guest_count_must_be_positive() {
        assert!(validate_guests(0).is_err());
        assert!(validate_guests(-2).is_err());
        assert!(validate_guests(1).is_ok());
    }
}
