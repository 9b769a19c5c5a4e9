//! Category model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::room::RoomStatus;

/// Room category entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short room reference attached to a category view
#[derive(Debug, Serialize, FromRow)]
pub struct CategoryRoomRef {
    pub id: Uuid,
    pub name: String,
    pub status: RoomStatus,
}

/// Category with its rooms back-reference
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithRooms {
    #[serde(flatten)]
    pub category: Category,
    pub rooms: Vec<CategoryRoomRef>,
}

/// Occupancy statistics for a category's rooms
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_rooms: i64,
    pub available_rooms: i64,
    /// Share of rooms not currently available, as a percentage
    pub occupancy_rate: f64,
}

impl CategoryStats {
    /// Derive the stats from room counts. A category without rooms has an
    /// occupancy rate of zero.
    pub fn from_counts(total_rooms: i64, available_rooms: i64) -> Self {
        let occupancy_rate = if total_rooms > 0 {
            (total_rooms - available_rooms) as f64 / total_rooms as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_rooms,
            available_rooms,
            occupancy_rate,
        }
    }
}

/// Request for creating a category (admin)
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

/// Request for updating a category (admin); absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_rate_is_share_of_unavailable_rooms() {
        let stats = CategoryStats::from_counts(10, 4);
        assert_eq!(stats.total_rooms, 10);
        assert_eq!(stats.available_rooms, 4);
        assert_eq!(stats.occupancy_rate, 60.0);

        assert_eq!(CategoryStats::from_counts(3, 3).occupancy_rate, 0.0);
        assert_eq!(CategoryStats::from_counts(2, 0).occupancy_rate, 100.0);
    }

    #[test]
    fn occupancy_rate_of_empty_category_is_zero() {
        let stats = CategoryStats::from_counts(0, 0);
        assert_eq!(stats.occupancy_rate, 0.0);
    }
}
