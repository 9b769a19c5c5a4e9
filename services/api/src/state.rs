//! Application state shared across handlers

use sqlx::PgPool;

use crate::jwt::JwtService;
use crate::repositories::{
    BookingRepository, CategoryRepository, RoomRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub room_repository: RoomRepository,
    pub category_repository: CategoryRepository,
    pub booking_repository: BookingRepository,
    pub jwt_service: JwtService,
}
