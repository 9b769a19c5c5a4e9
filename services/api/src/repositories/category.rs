//! Category repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    Category, CategoryRoomRef, CategoryStats, CreateCategoryRequest, UpdateCategoryRequest,
};

/// Category repository
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new category
    pub async fn create(&self, payload: &CreateCategoryRequest) -> Result<Category> {
        info!("Creating new category: {}", payload.name);

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, image)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Find a category by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Find a category by name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Get all categories
    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Short references to the rooms of a category
    pub async fn rooms_for_category(&self, id: Uuid) -> Result<Vec<CategoryRoomRef>> {
        let rooms = sqlx::query_as::<_, CategoryRoomRef>(
            r#"
            SELECT id, name, status FROM rooms WHERE category_id = $1 ORDER BY name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    /// Number of rooms referencing a category
    pub async fn count_rooms(&self, id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Occupancy stats for a category's rooms
    pub async fn room_stats(&self, id: Uuid) -> Result<CategoryStats> {
        let (total, available): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'available')
            FROM rooms
            WHERE category_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(CategoryStats::from_counts(total, available))
    }

    /// Update category fields; absent fields are left unchanged
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UpdateCategoryRequest,
    ) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.image)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Delete a category by ID; the handler checks the room count first
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
