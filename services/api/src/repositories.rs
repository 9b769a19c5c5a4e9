//! Repositories for database operations

pub mod booking;
pub mod category;
pub mod room;
pub mod user;

pub use booking::BookingRepository;
pub use category::CategoryRepository;
pub use room::RoomRepository;
pub use user::UserRepository;
