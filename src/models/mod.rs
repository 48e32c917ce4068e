//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request and response bodies built from them.

/// Access key model
pub mod access_key;
/// Administrator and login models
pub mod admin;
/// Booking model
pub mod booking;
