//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle database transactions, validation, and complex operations.

pub mod access_key_service;
pub mod auth_service;
pub mod booking_service;
pub mod code_allocator;
