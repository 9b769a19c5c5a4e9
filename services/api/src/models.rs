//! Domain entities and request/response payloads
//!
//! Request and response bodies use camelCase keys on the wire.

pub mod booking;
pub mod category;
pub mod room;
pub mod user;

pub use booking::*;
pub use category::*;
pub use room::*;
pub use user::*;
