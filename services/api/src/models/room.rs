//! Room model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Cached room status hint
///
/// This field mirrors the booking set and is updated inside the same
/// transaction as the booking write. True availability is always computed
/// from the non-cancelled bookings, never from this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

/// Room amenity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "amenity", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Amenity {
    Wifi,
    Tv,
    AirConditioning,
    Minibar,
    Safe,
    RoomService,
    SeaView,
    Balcony,
    Jacuzzi,
}

/// Room image with an optional alt text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomImage {
    pub url: String,
    pub alt: Option<String>,
}

/// Room entity
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub capacity: i32,
    #[sqlx(json)]
    pub images: Vec<RoomImage>,
    pub amenities: Vec<Amenity>,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    fn first_image(&self) -> String {
        self.images.first().map(|i| i.url.clone()).unwrap_or_default()
    }

    /// Condensed listing view
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            image: self.first_image(),
            rating: DEFAULT_RATING,
            reviews: 0,
            size: format!("{}m²", self.capacity * 10),
            max_guests: self.capacity,
        }
    }

    /// Full detail view with the category name attached
    pub fn detail(&self, category: String) -> RoomDetail {
        RoomDetail {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            long_description: self.description.clone(),
            price: self.price,
            image: self.first_image(),
            images: self.images.iter().map(|i| i.url.clone()).collect(),
            amenities: self.amenities.clone(),
            size: format!("{}m²", self.capacity * 10),
            max_guests: self.capacity,
            rating: DEFAULT_RATING,
            reviews: 0,
            category,
        }
    }
}

// Placeholder until a review collaborator exists.
const DEFAULT_RATING: f64 = 4.5;

/// Room listing view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub rating: f64,
    pub reviews: i64,
    pub size: String,
    pub max_guests: i32,
}

/// Room detail view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub price: f64,
    pub image: String,
    pub images: Vec<String>,
    pub amenities: Vec<Amenity>,
    pub size: String,
    pub max_guests: i32,
    pub rating: f64,
    pub reviews: i64,
    pub category: String,
}

/// Request for creating a room (admin)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub capacity: i32,
    #[serde(default)]
    pub images: Vec<RoomImage>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

/// Request for updating a room (admin); absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<Uuid>,
    pub capacity: Option<i32>,
    pub images: Option<Vec<RoomImage>>,
    pub amenities: Option<Vec<Amenity>>,
    pub status: Option<RoomStatus>,
}

/// Query parameters for the availability probe
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
