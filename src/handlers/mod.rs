//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Calls into a service for the business logic
//! 3. Returns HTTP response (JSON, status code)

/// Access key validation and admin key management
pub mod access_keys;
/// Admin booking overview and edits
pub mod admin_bookings;
/// Client and admin login
pub mod auth;
/// Booking submission and client self-service
pub mod bookings;
pub mod health;
