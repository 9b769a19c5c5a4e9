//! Common library for the hotel booking backend
//!
//! This crate provides shared functionality used by the booking services,
//! including database connectivity and error handling.

pub mod database;
pub mod error;
