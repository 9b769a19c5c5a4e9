//! Booking repository and lifecycle manager
//!
//! Create and update run inside a transaction that first locks the room row
//! (`SELECT ... FOR UPDATE`), so two concurrent mutations against the same
//! room serialize and the check-then-act window disappears: exactly one of
//! two overlapping create requests can succeed. The exclusion constraint on
//! `(room_id, tstzrange(start_date, end_date))` for non-cancelled rows is
//! the database-level backstop for the same invariant.
//!
//! The room's cached `status` field is mutated in the same transaction as
//! the booking write; it is a denormalized hint, availability is always
//! answered from the booking set.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::{
    Booking, BookingDetails, BookingQuery, BookingRoomSummary, BookingStatus,
    BookingUserSummary, CreateBookingRequest, DEFAULT_BOOKING_SORT, DEFAULT_CHECK_IN_TIME,
    DEFAULT_CHECK_OUT_TIME, MonthlyBookings, MostBookedRoom, UpdateBookingRequest, sort_clause,
    total_price,
};
use crate::validation::{validate_booking_window, validate_date_order, validate_guests};

/// PostgreSQL error code for an exclusion constraint violation
const EXCLUSION_VIOLATION: &str = "23P01";

/// Booking repository
#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

/// Whether any non-cancelled booking for the room overlaps the half-open
/// interval `[start, end)`. `exclude` removes the booking under update from
/// the scan so it is never compared against itself.
async fn overlap_exists<'e, E>(
    executor: E,
    room_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM bookings
            WHERE room_id = $1
              AND status <> 'cancelled'
              AND start_date < $3
              AND end_date > $2
              AND ($4::uuid IS NULL OR id <> $4)
        )
        "#,
    )
    .bind(room_id)
    .bind(start)
    .bind(end)
    .bind(exclude)
    .fetch_one(executor)
    .await?;

    Ok(exists)
}

fn map_conflict(err: sqlx::Error) -> BookingError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(EXCLUSION_VIOLATION) => {
            BookingError::RoomUnavailable
        }
        _ => BookingError::Database(err),
    }
}

fn details_from_row(row: &PgRow) -> Result<BookingDetails, sqlx::Error> {
    let booking = Booking::from_row(row)?;
    let room = BookingRoomSummary {
        id: booking.room_id,
        name: row.try_get("room_name")?,
        price: row.try_get("room_price")?,
    };
    let user = BookingUserSummary {
        id: booking.user_id,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
    };

    Ok(BookingDetails {
        room,
        user,
        booking,
    })
}

// Rooms may be deleted while their bookings survive, hence the left join.
const DETAILS_SELECT: &str = r#"
    SELECT b.*,
           u.first_name, u.last_name, u.email,
           COALESCE(r.name, '') AS room_name,
           COALESCE(r.price, 0) AS room_price
    FROM bookings b
    JOIN users u ON u.id = b.user_id
    LEFT JOIN rooms r ON r.id = b.room_id
"#;

impl BookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Availability probe: true iff no non-cancelled booking for the room
    /// overlaps `[start, end)`. Read-only.
    pub async fn room_is_available(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> Result<bool, BookingError> {
        let taken = overlap_exists(&self.pool, room_id, start, end, exclude).await?;
        Ok(!taken)
    }

    /// Create a booking for a user against an available room
    ///
    /// Fails with `RoomUnavailable` without persisting anything when the
    /// requested range overlaps an existing non-cancelled booking.
    pub async fn create(
        &self,
        user_id: Uuid,
        payload: &CreateBookingRequest,
    ) -> Result<Booking, BookingError> {
        validate_booking_window(payload.start_date, payload.end_date, Utc::now())
            .map_err(BookingError::Validation)?;
        validate_guests(payload.guests).map_err(BookingError::Validation)?;

        let mut tx = self.pool.begin().await?;

        // Locks the room row for the rest of the transaction; concurrent
        // booking mutations against the same room queue up here.
        let room: Option<(Uuid, f64)> =
            sqlx::query_as("SELECT id, price FROM rooms WHERE id = $1 FOR UPDATE")
                .bind(payload.room)
                .fetch_optional(&mut *tx)
                .await?;
        let (room_id, nightly_rate) = room.ok_or(BookingError::RoomNotFound)?;

        if overlap_exists(&mut *tx, room_id, payload.start_date, payload.end_date, None).await? {
            return Err(BookingError::RoomUnavailable);
        }

        let total = total_price(nightly_rate, payload.start_date, payload.end_date);

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (user_id, room_id, start_date, end_date, guests, total_price,
                 special_requests, check_in_time, check_out_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(room_id)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.guests)
        .bind(total)
        .bind(&payload.special_requests)
        .bind(payload.check_in_time.as_deref().unwrap_or(DEFAULT_CHECK_IN_TIME))
        .bind(payload.check_out_time.as_deref().unwrap_or(DEFAULT_CHECK_OUT_TIME))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_conflict)?;

        sqlx::query("UPDATE rooms SET status = 'occupied', updated_at = now() WHERE id = $1")
            .bind(room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Created booking {} for room {}", booking.id, room_id);
        Ok(booking)
    }

    /// Apply a whitelisted update to a booking
    ///
    /// On a date change the availability check runs against the new range
    /// with the booking itself excluded from the scan. The total price is
    /// recomputed from the room's current nightly rate either way.
    pub async fn update(
        &self,
        current: &Booking,
        changes: &UpdateBookingRequest,
    ) -> Result<Booking, BookingError> {
        let start = changes.start_date.unwrap_or(current.start_date);
        let end = changes.end_date.unwrap_or(current.end_date);
        validate_date_order(start, end).map_err(BookingError::Validation)?;
        if let Some(guests) = changes.guests {
            validate_guests(guests).map_err(BookingError::Validation)?;
        }

        let mut tx = self.pool.begin().await?;

        let room: Option<(Uuid, f64)> =
            sqlx::query_as("SELECT id, price FROM rooms WHERE id = $1 FOR UPDATE")
                .bind(current.room_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (room_id, nightly_rate) = room.ok_or(BookingError::RoomNotFound)?;

        if changes.changes_dates()
            && overlap_exists(&mut *tx, room_id, start, end, Some(current.id)).await?
        {
            return Err(BookingError::RoomUnavailable);
        }

        let total = total_price(nightly_rate, start, end);
        let special_requests = changes
            .special_requests
            .clone()
            .or_else(|| current.special_requests.clone());

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET start_date = $2,
                end_date = $3,
                guests = $4,
                special_requests = $5,
                total_price = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(start)
        .bind(end)
        .bind(changes.guests.unwrap_or(current.guests))
        .bind(&special_requests)
        .bind(total)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_conflict)?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Cancel a booking and free the room
    ///
    /// Cancelling an already-cancelled booking is an idempotent no-op.
    pub async fn cancel(&self, current: &Booking) -> Result<Booking, BookingError> {
        if current.status == BookingStatus::Cancelled {
            return Ok(current.clone());
        }

        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'cancelled', updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE rooms SET status = 'available', updated_at = now() WHERE id = $1")
            .bind(current.room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Cancelled booking {}", booking.id);
        Ok(booking)
    }

    /// Find a booking by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// Find a booking by ID with room and user summaries attached
    pub async fn find_details(&self, id: Uuid) -> Result<Option<BookingDetails>, BookingError> {
        let sql = format!("{DETAILS_SELECT} WHERE b.id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;

        match row {
            Some(row) => Ok(Some(details_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Admin listing with status/start-date filters and whitelisted sorting
    pub async fn list_all(
        &self,
        query: &BookingQuery,
    ) -> Result<Vec<BookingDetails>, BookingError> {
        let sort = query.sort.as_deref().unwrap_or(DEFAULT_BOOKING_SORT);
        let order = sort_clause(sort)
            .ok_or_else(|| BookingError::Validation(format!("Invalid sort field '{}'", sort)))?;

        let sql = format!(
            r#"
            {DETAILS_SELECT}
            WHERE ($1::booking_status IS NULL OR b.status = $1)
              AND ($2::timestamptz IS NULL OR b.start_date >= $2)
              AND ($3::timestamptz IS NULL OR b.start_date <= $3)
            ORDER BY b.{order}
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(query.status)
            .bind(query.start_date)
            .bind(query.end_date)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| details_from_row(row).map_err(BookingError::from))
            .collect()
    }

    /// A user's own bookings, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BookingDetails>, BookingError> {
        let sql = format!("{DETAILS_SELECT} WHERE b.user_id = $1 ORDER BY b.created_at DESC");
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| details_from_row(row).map_err(BookingError::from))
            .collect()
    }

    /// Reporting: the five most-booked rooms
    pub async fn most_booked(&self) -> Result<Vec<MostBookedRoom>, BookingError> {
        let rooms = sqlx::query_as::<_, MostBookedRoom>(
            r#"
            SELECT r.id, r.name, COUNT(*) AS booking_count
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            GROUP BY r.id, r.name
            ORDER BY booking_count DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Reporting: booking counts grouped by start-date month
    pub async fn bookings_per_month(&self) -> Result<Vec<MonthlyBookings>, BookingError> {
        let months = sqlx::query_as::<_, MonthlyBookings>(
            r#"
            SELECT EXTRACT(YEAR FROM start_date)::int4 AS year,
                   EXTRACT(MONTH FROM start_date)::int4 AS month,
                   COUNT(*) AS count
            FROM bookings
            GROUP BY 1, 2
            ORDER BY 1, 2
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(months)
    }
}
