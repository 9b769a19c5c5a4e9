//! Room repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use crate::models::{CreateRoomRequest, Room, UpdateRoomRequest};

/// Room repository
#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new room
    pub async fn create(&self, payload: &CreateRoomRequest) -> Result<Room> {
        info!("Creating new room: {}", payload.name);

        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (name, description, price, category_id, capacity, images, amenities)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.category_id)
        .bind(payload.capacity)
        .bind(Json(&payload.images))
        .bind(&payload.amenities)
        .fetch_one(&self.pool)
        .await?;

        Ok(room)
    }

    /// Find a room by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Get all rooms, newest first
    pub async fn list_all(&self) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Featured selection: the three highest-priced rooms
    pub async fn featured(&self) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms ORDER BY price DESC LIMIT 3
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Update room fields; absent fields are left unchanged
    pub async fn update(&self, id: Uuid, changes: &UpdateRoomRequest) -> Result<Option<Room>> {
        info!("Updating room: {}", id);

        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category_id = COALESCE($5, category_id),
                capacity = COALESCE($6, capacity),
                images = COALESCE($7, images),
                amenities = COALESCE($8, amenities),
                status = COALESCE($9, status),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(changes.category_id)
        .bind(changes.capacity)
        .bind(changes.images.as_ref().map(Json))
        .bind(&changes.amenities)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Delete a room by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
